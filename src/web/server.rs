use crate::config::Configuration;
use crate::docs::DocGenerator;
use crate::docs::example::{EXAMPLE_PANEL, EXAMPLE_PARAMETERS, example_request};
use crate::error::StoreError;
use crate::models::{DocumentationRecord, DocumentationRequest, HttpMethod, Parameters};
use crate::store::{DEFAULT_FILENAME, SessionStore};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::Mutex;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Reply};

/// Shared state for the single session served by this process.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Configuration>,
    store: Arc<Mutex<SessionStore>>,
}

impl AppState {
    pub fn new(config: Configuration) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(Mutex::new(SessionStore::new())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    api_name: String,
    method: String,
    endpoint: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    parameters: String,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    documentation: String,
    warning: Option<String>,
    total: usize,
}

#[derive(Debug, Serialize)]
struct DocsResponse<'a> {
    total: usize,
    documents: &'a [DocumentationRecord],
}

#[derive(Debug, Deserialize)]
struct FileRequest {
    filename: Option<String>,
}

impl FileRequest {
    fn filename(&self) -> String {
        self.filename
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_FILENAME)
            .to_string()
    }
}

fn error_reply(status: StatusCode, message: impl Into<String>) -> Response {
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "error": message.into() })),
        status,
    )
    .into_response()
}

fn store_error_reply(err: &StoreError) -> Response {
    let status = match err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StoreError::Io { .. } | StoreError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_reply(status, err.to_string())
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

async fn generate(body: GenerateRequest, state: AppState) -> Result<Response, warp::Rejection> {
    let generator = match DocGenerator::from_config(&state.config) {
        Ok(generator) => generator,
        Err(e) => return Ok(error_reply(StatusCode::SERVICE_UNAVAILABLE, e.to_string())),
    };

    let method = match body.method.parse::<HttpMethod>() {
        Ok(method) => method,
        Err(e) => return Ok(error_reply(StatusCode::BAD_REQUEST, e)),
    };

    let parsed = Parameters::parse_input(&body.parameters);
    let request = DocumentationRequest {
        api_name: body.api_name,
        method,
        endpoint: body.endpoint,
        description: body.description,
        parameters: parsed.parameters,
    };
    if let Err(e) = request.validate() {
        return Ok(error_reply(StatusCode::BAD_REQUEST, e.to_string()));
    }

    let mut store = state.store.lock().await;
    match generator.generate(&request, &mut store).await {
        Ok(documentation) => Ok(warp::reply::json(&GenerateResponse {
            documentation,
            warning: parsed.warning,
            total: store.len(),
        })
        .into_response()),
        Err(e) => {
            tracing::warn!(error = %e, "Documentation generation failed");
            Ok(error_reply(StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

async fn list_docs(state: AppState) -> Result<Response, warp::Rejection> {
    let store = state.store.lock().await;
    Ok(warp::reply::json(&DocsResponse {
        total: store.len(),
        documents: store.list(),
    })
    .into_response())
}

async fn save(body: FileRequest, state: AppState) -> Result<Response, warp::Rejection> {
    let store = state.store.lock().await;
    if store.is_empty() {
        return Ok(error_reply(StatusCode::CONFLICT, "No documentation to save!"));
    }

    let filename = body.filename();
    match store.save_to_file(&filename) {
        Ok(()) => Ok(warp::reply::json(&serde_json::json!({
            "message": format!("Documentation saved to {}", filename),
            "total": store.len(),
        }))
        .into_response()),
        Err(e) => Ok(store_error_reply(&e)),
    }
}

async fn load(body: FileRequest, state: AppState) -> Result<Response, warp::Rejection> {
    let mut store = state.store.lock().await;
    let filename = body.filename();
    match store.load_from_file(&filename) {
        Ok(count) => Ok(warp::reply::json(&serde_json::json!({
            "message": format!("Loaded {} documents from {}", count, filename),
            "total": count,
        }))
        .into_response()),
        Err(e) => Ok(store_error_reply(&e)),
    }
}

async fn download(state: AppState) -> Result<Response, warp::Rejection> {
    let store = state.store.lock().await;
    if store.is_empty() {
        return Ok(error_reply(StatusCode::NOT_FOUND, "No documentation to download"));
    }

    match store.serialize() {
        Ok(json) => {
            let reply = warp::reply::with_header(json, "Content-Type", "application/json");
            let reply = warp::reply::with_header(
                reply,
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", DEFAULT_FILENAME),
            );
            Ok(reply.into_response())
        }
        Err(e) => Ok(store_error_reply(&e)),
    }
}

async fn reset(state: AppState) -> Result<Response, warp::Rejection> {
    state.store.lock().await.clear();
    Ok(warp::reply::json(&serde_json::json!({ "total": 0 })).into_response())
}

fn example() -> Response {
    let request = example_request();
    warp::reply::json(&serde_json::json!({
        "api_name": request.api_name,
        "method": request.method,
        "endpoint": request.endpoint,
        "description": request.description,
        "parameters": EXAMPLE_PARAMETERS,
        "panel": EXAMPLE_PANEL,
    }))
    .into_response()
}

pub fn routes(
    state: AppState,
) -> impl Filter<Extract = (Response,), Error = warp::Rejection> + Clone {
    let generate_route = warp::path("generate")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(generate);

    let docs_route = warp::path("docs")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(list_docs);

    let save_route = warp::path("save")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(save);

    let load_route = warp::path("load")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(load);

    let download_route = warp::path("download")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(download);

    let reset_route = warp::path("reset")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_state(state))
        .and_then(reset);

    let example_route = warp::path("example")
        .and(warp::path::end())
        .and(warp::get())
        .map(example);

    let health_route = warp::path("health")
        .and(warp::path::end())
        .map(|| warp::reply::json(&serde_json::json!({"status": "healthy"})).into_response());

    generate_route
        .or(docs_route)
        .unify()
        .or(save_route)
        .unify()
        .or(load_route)
        .unify()
        .or(download_route)
        .unify()
        .or(reset_route)
        .unify()
        .or(example_route)
        .unify()
        .or(health_route)
        .unify()
}

pub async fn run_server(port: u16, config: Configuration) -> Result<()> {
    if let Err(e) = config.validate() {
        tracing::warn!("{}; generation requests will be rejected", e);
    }

    let routes = routes(AppState::new(config)).with(warp::cors().allow_any_origin());

    tracing::info!(port, "Server running on http://localhost:{}", port);
    warp::serve(routes).run(([127, 0, 0, 1], port)).await;

    Ok(())
}

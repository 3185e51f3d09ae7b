mod config;
mod docs;
mod error;
mod llm;
mod models;
mod store;
mod web;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use config::Configuration;
use docs::DocGenerator;
use models::{DocumentationRequest, HttpMethod, Parameters};
use std::path::{Path, PathBuf};
use store::{DEFAULT_FILENAME, SessionStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "api-doc-gen")]
#[command(about = "AI-powered API documentation generator using Azure OpenAI")]
struct Cli {
    #[command(flatten)]
    azure: AzureArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the values read from the environment.
#[derive(Args)]
struct AzureArgs {
    /// Azure OpenAI endpoint URL
    #[arg(long, global = true)]
    azure_endpoint: Option<String>,
    /// Azure OpenAI API key
    #[arg(long, global = true)]
    api_key: Option<String>,
    /// Deployment name (e.g. gpt-4, gpt-35-turbo)
    #[arg(long, global = true)]
    deployment: Option<String>,
    /// Azure OpenAI API version
    #[arg(long, global = true)]
    api_version: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documentation for one endpoint
    Generate {
        /// API name, e.g. "User Login"
        #[arg(short, long)]
        name: String,
        #[arg(short, long, value_enum, ignore_case = true, default_value = "get")]
        method: HttpMethod,
        /// Endpoint path, e.g. /api/v1/users
        #[arg(short, long)]
        endpoint: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Parameters as a JSON object; anything else is sent as plain text
        #[arg(short, long, default_value = "")]
        parameters: String,
        /// Documentation file to load before and save after generating
        #[arg(short, long)]
        store: Option<PathBuf>,
    },
    /// List every record in a saved documentation file
    List {
        #[arg(short, long, default_value = DEFAULT_FILENAME)]
        file: PathBuf,
    },
    /// Show the Sum Calculator walkthrough
    Example,
    /// Start the web interface
    Serve {
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let AzureArgs {
        azure_endpoint,
        api_key,
        deployment,
        api_version,
    } = cli.azure;
    let config = Configuration::load().with_overrides(azure_endpoint, api_key, deployment, api_version);

    match cli.command {
        Commands::Generate {
            name,
            method,
            endpoint,
            description,
            parameters,
            store,
        } => {
            let generator = DocGenerator::from_config(&config)?;

            let parsed = Parameters::parse_input(&parameters);
            if let Some(warning) = &parsed.warning {
                println!("Warning: {}", warning);
            }
            let request = DocumentationRequest {
                api_name: name,
                method,
                endpoint,
                description,
                parameters: parsed.parameters,
            };
            request.validate()?;

            let mut session = SessionStore::new();
            if let Some(path) = store.as_deref().filter(|p| p.exists()) {
                let count = session.load_from_file(path)?;
                println!("Loaded {} documents from {}", count, path.display());
            }

            println!("Generating documentation using AI...");
            match generator.generate(&request, &mut session).await {
                Ok(documentation) => {
                    println!("Documentation generated successfully!\n");
                    println!("{}", documentation);
                }
                Err(e) => {
                    println!("{}", e);
                    return Ok(());
                }
            }

            if let Some(path) = store {
                save_session(&session, &path);
            }
        }
        Commands::List { file } => {
            let mut session = SessionStore::new();
            if let Err(e) = session.load_from_file(&file) {
                println!("{}", e);
                return Ok(());
            }
            print_records(&session);
        }
        Commands::Example => {
            println!("{}", docs::example::EXAMPLE_PANEL);
        }
        Commands::Serve { port } => {
            println!("Starting web server on port {}...", port);
            web::run_server(port, config).await?;
        }
    }

    Ok(())
}

fn save_session(session: &SessionStore, path: &Path) {
    if session.is_empty() {
        println!("No documentation to save!");
        return;
    }
    match session.save_to_file(path) {
        Ok(()) => println!("Documentation saved to {}", path.display()),
        Err(e) => println!("Error saving file: {}", e),
    }
}

fn print_records(session: &SessionStore) {
    if session.is_empty() {
        println!("No documentation generated yet.");
        return;
    }

    println!("Total Documents: {}\n", session.len());
    for (i, doc) in session.list().iter().enumerate() {
        println!("{}. {} - {} {}", i + 1, doc.api_name, doc.method, doc.endpoint);
        println!("   Description: {}", doc.description);
        if !doc.parameters.is_absent() {
            println!("   Parameters:  {}", doc.parameters);
        }
        println!("   Generated:   {}", doc.timestamp);
        println!("\n{}\n", doc.generated_doc);
        println!("---");
    }
}

use crate::error::RequestError;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

pub const INVALID_PARAMETERS_WARNING: &str = "Invalid JSON for parameters, using as text";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            other => Err(format!("unsupported HTTP method: {}", other)),
        }
    }
}

/// Endpoint parameters as the user supplied them.
///
/// On disk this is a JSON object, a JSON string, or `null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Parameters {
    Structured(Map<String, Value>),
    Freeform(String),
    #[default]
    Absent,
}

/// Outcome of parsing the raw parameters field.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedParameters {
    pub parameters: Parameters,
    pub warning: Option<String>,
}

impl Parameters {
    /// Blank input is `Absent`; a JSON object is `Structured`; anything else
    /// is kept verbatim as `Freeform` with a warning for the user.
    pub fn parse_input(input: &str) -> ParsedParameters {
        if input.trim().is_empty() {
            return ParsedParameters {
                parameters: Parameters::Absent,
                warning: None,
            };
        }

        match serde_json::from_str::<Value>(input) {
            Ok(Value::Object(map)) => ParsedParameters {
                parameters: Parameters::Structured(map),
                warning: None,
            },
            _ => ParsedParameters {
                parameters: Parameters::Freeform(input.to_string()),
                warning: Some(INVALID_PARAMETERS_WARNING.to_string()),
            },
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Parameters::Absent)
    }

    fn to_value(&self) -> Value {
        match self {
            Parameters::Structured(map) => Value::Object(map.clone()),
            Parameters::Freeform(text) => Value::String(text.clone()),
            Parameters::Absent => Value::Null,
        }
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Parameters::Absent,
            Value::Object(map) => Parameters::Structured(map),
            Value::String(text) => Parameters::Freeform(text),
            // Arrays and scalars from older files stay loadable as text
            other => Parameters::Freeform(other.to_string()),
        }
    }
}

/// Prompt rendering. Structured parameters are written as compact JSON, not
/// as a Python-style dict repr. Empty values render as `None`.
impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameters::Structured(map) if !map.is_empty() => {
                write!(f, "{}", Value::Object(map.clone()))
            }
            Parameters::Freeform(text) if !text.is_empty() => f.write_str(text),
            _ => f.write_str("None"),
        }
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Parameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Parameters::from_value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentationRequest {
    pub api_name: String,
    pub method: HttpMethod,
    pub endpoint: String,
    pub description: String,
    pub parameters: Parameters,
}

impl DocumentationRequest {
    /// Required-field check done by the caller before generating.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.api_name.trim().is_empty() {
            return Err(RequestError::MissingField("api_name"));
        }
        if self.endpoint.trim().is_empty() {
            return Err(RequestError::MissingField("endpoint"));
        }
        Ok(())
    }
}

/// One stored result of a successful generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentationRecord {
    pub api_name: String,
    pub method: HttpMethod,
    pub endpoint: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Parameters,
    pub generated_doc: String,
    /// ISO-8601, with or without a UTC offset.
    #[serde(deserialize_with = "iso_timestamp")]
    pub timestamp: String,
}

fn iso_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = String::deserialize(deserializer)?;
    let valid = value.parse::<NaiveDateTime>().is_ok()
        || DateTime::parse_from_rfc3339(&value).is_ok()
        || value.parse::<DateTime<chrono::FixedOffset>>().is_ok();
    if !valid {
        return Err(serde::de::Error::custom(format!(
            "invalid ISO-8601 timestamp: {}",
            value
        )));
    }
    Ok(value)
}

impl DocumentationRecord {
    pub fn from_request(
        request: &DocumentationRequest,
        generated_doc: String,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            api_name: request.api_name.clone(),
            method: request.method,
            endpoint: request.endpoint.clone(),
            description: request.description.clone(),
            parameters: request.parameters.clone(),
            generated_doc,
            timestamp: timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        }
    }
}

use reqwest::blocking::Client;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::FetchError;

pub const DEFAULT_BASE_URL:   &str = "https://api.poeditor.com/v2";
pub const DEFAULT_PROJECT_ID: &str = "517589";
pub const DEFAULT_TOKEN_ENV:  &str = "POEDITOR_RO_KEY";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoEditorOptions {
    pub base_url:   String,
    pub project_id: String,
    /// Environment variable holding the read-only API token.
    pub token_env:  String,
}

impl Default for PoEditorOptions {
    fn default() -> Self {
        PoEditorOptions {
            base_url:   DEFAULT_BASE_URL.to_string(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
            token_env:  DEFAULT_TOKEN_ENV.to_string(),
        }
    }
}

/// Upstream reads needed to mirror a project. Every read returns the raw
/// JSON objects so they are written back unchanged.
pub trait TranslationSource {
    fn list_terms(&self) -> Result<Vec<Value>, FetchError>;

    fn list_languages(&self) -> Result<Vec<Value>, FetchError>;

    fn export_language(&self, code: &str) -> Result<Vec<Value>, FetchError>;
}

/// Read the API token from `var`. Must succeed before any request is made.
pub fn api_token_from_env(var: &str) -> Result<String, FetchError> {
    token_from(var, std::env::var(var).ok())
}

fn token_from(var: &str, value: Option<String>) -> Result<String, FetchError> {
    match value {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(FetchError::MissingEnv(var.to_string())),
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    response: Status,
    #[serde(default)]
    result:   Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Status {
    status:  String,
    #[serde(default)]
    message: String,
}

/// Unwrap `result.<field>` from an API response body.
fn decode_result<T: DeserializeOwned>(endpoint: &str, body: &str, field: &str) -> Result<T, FetchError> {
    let decode = |source| FetchError::Decode {
        endpoint: endpoint.to_string(),
        source,
    };

    let envelope: Envelope = serde_json::from_str(body).map_err(decode)?;
    if envelope.response.status != "success" {
        return Err(FetchError::Api {
            endpoint: endpoint.to_string(),
            message:  envelope.response.message,
        });
    }

    let value = envelope
        .result
        .and_then(|mut result| result.get_mut(field).map(Value::take))
        .ok_or_else(|| FetchError::Api {
            endpoint: endpoint.to_string(),
            message:  format!("response has no result.{}", field),
        })?;
    serde_json::from_value(value).map_err(decode)
}

#[derive(Debug, Clone)]
pub struct PoEditorClient {
    http:      Client,
    options:   PoEditorOptions,
    api_token: String,
}

impl PoEditorClient {
    pub fn new(options: PoEditorOptions, api_token: String) -> Result<Self, FetchError> {
        let http = Client::builder().build()?;
        Ok(PoEditorClient {
            http,
            options,
            api_token,
        })
    }

    /// Build a client with the token from `options.token_env`.
    pub fn from_env(options: PoEditorOptions) -> Result<Self, FetchError> {
        let token = api_token_from_env(&options.token_env)?;
        Self::new(options, token)
    }

    fn post(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<String, FetchError> {
        let mut form = vec![
            ("id", self.options.project_id.as_str()),
            ("api_token", self.api_token.as_str()),
        ];
        form.extend_from_slice(extra);

        let url = format!("{}{}", self.options.base_url.trim_end_matches('/'), endpoint);
        debug!(%url, "POST");
        let body = self.http.post(&url).form(&form).send()?.error_for_status()?.text()?;
        Ok(body)
    }
}

impl TranslationSource for PoEditorClient {
    fn list_terms(&self) -> Result<Vec<Value>, FetchError> {
        let body = self.post("/terms/list", &[])?;
        decode_result("/terms/list", &body, "terms")
    }

    fn list_languages(&self) -> Result<Vec<Value>, FetchError> {
        let body = self.post("/languages/list", &[])?;
        decode_result("/languages/list", &body, "languages")
    }

    fn export_language(&self, code: &str) -> Result<Vec<Value>, FetchError> {
        let body = self.post("/projects/export", &[("language", code), ("type", "json")])?;
        let url: String = decode_result("/projects/export", &body, "url")?;

        info!(language = code, "downloading export");
        let export = self.http.get(&url).send()?.error_for_status()?.text()?;
        serde_json::from_str(&export).map_err(|source| FetchError::Decode { endpoint: url, source })
    }
}

//! HTTP client for the APIHub validation endpoint

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::{CliError, CliResult};

/// Connection settings for the APIHub API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout_secs: 30,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}

/// One problem the server found in a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub location: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(location: &str, message: &str) -> Self {
        Self {
            location: location.to_string(),
            message: message.to_string(),
        }
    }
}

/// Body of a validation request.
///
/// Identifier arguments are sent as ids when they look like UUIDs and as
/// slugs otherwise, so users can pass either form.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hub_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hub_slug: Option<String>,
    pub definition: String,
    /// Always empty: referenced documents are imported into `definition`
    /// before upload, never shipped separately.
    pub references: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specification: Option<String>,
    pub validation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_create_documentation: Option<bool>,
}

impl ValidationRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        documentation: Option<String>,
        documentation_name: Option<String>,
        hub: Option<String>,
        definition: String,
        specification: Option<String>,
        validation: String,
        auto_create: bool,
    ) -> Self {
        let (documentation_id, documentation_slug) = split_identifier(documentation);
        let (hub_id, hub_slug) = split_identifier(hub);
        Self {
            documentation_id,
            documentation_slug,
            documentation_name,
            hub_id,
            hub_slug,
            definition,
            references: Vec::new(),
            specification,
            validation,
            auto_create_documentation: auto_create.then_some(true),
        }
    }

    /// Force the documentation id. Legacy identifiers are always ids,
    /// never slugs, whatever they look like.
    pub fn with_documentation_id(mut self, id: String) -> Self {
        self.documentation_id = Some(id);
        self.documentation_slug = None;
        self
    }
}

fn is_uuid(value: &str) -> bool {
    value.len() == 36 && Uuid::parse_str(value).is_ok()
}

fn split_identifier(value: Option<String>) -> (Option<String>, Option<String>) {
    match value {
        Some(v) if is_uuid(&v) => (Some(v), None),
        Some(v) => (None, Some(v)),
        None => (None, None),
    }
}

/// Server verdict on a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(Vec<ValidationIssue>),
    ServerError { status: u16, body: String },
}

/// Client for POSTing validation requests.
#[derive(Debug, Clone)]
pub struct ValidationClient {
    client: reqwest::Client,
    base_url: String,
}

impl ValidationClient {
    pub fn new(config: ClientConfig) -> CliResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| CliError::InvalidArgument(format!("invalid token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("apihub/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit a definition and classify the server's answer.
    ///
    /// Only transport failures surface as errors. HTTP-level rejections
    /// come back as `Invalid` or `ServerError` outcomes so the caller
    /// decides how to report them.
    pub async fn validate(&self, request: &ValidationRequest) -> CliResult<ValidationOutcome> {
        let url = format!("{}/validations", self.base_url);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(ValidationOutcome::Valid);
        }

        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            return Ok(ValidationOutcome::Invalid(parse_issues(&body)));
        }
        Ok(ValidationOutcome::ServerError {
            status: status.as_u16(),
            body,
        })
    }
}

fn parse_issues(body: &str) -> Vec<ValidationIssue> {
    let Ok(payload) = serde_json::from_str::<Value>(body) else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    if let Some(errors) = payload.get("errors").and_then(Value::as_object) {
        for (key, detail) in errors {
            collect_issues(key, detail, &mut issues);
        }
    }
    if issues.is_empty() {
        if let Some(message) = payload.get("message").and_then(Value::as_str) {
            issues.push(ValidationIssue::new("definition", message));
        }
    }
    issues
}

// Error values nest arbitrarily; keys join into a dotted location path.
fn collect_issues(location: &str, detail: &Value, issues: &mut Vec<ValidationIssue>) {
    match detail {
        Value::String(message) => issues.push(ValidationIssue::new(location, message)),
        Value::Array(items) => {
            for item in items {
                match item.as_str() {
                    Some(message) => issues.push(ValidationIssue::new(location, message)),
                    None => issues.push(ValidationIssue::new(location, &item.to_string())),
                }
            }
        }
        Value::Object(map) => {
            for (key, value) in map {
                let nested = format!("{}.{}", location, key);
                collect_issues(&nested, value, issues);
            }
        }
        other => issues.push(ValidationIssue::new(location, &other.to_string())),
    }
}

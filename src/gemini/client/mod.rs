use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;

use super::config::GeminiConfig;
use super::error::GenerateError;
use super::prompt;
use super::schema;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use crate::report::types::{BugInput, ReportBody};


const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Near-deterministic sampling: consistent structure over creative variation
const TEMPERATURE: f32 = 0.2;

/// How much raw model text to keep for diagnostics
const RAW_SNIPPET_LEN: usize = 200;

/// Trait for report generation (enables mocking in tests)
pub trait GenerateApi: Send + Sync {
    /// Generate one structured report body for one bug entry
    fn generate(
        &self,
        bug: &BugInput,
    ) -> impl Future<Output = Result<ReportBody, GenerateError>> + Send;
}

/// Gemini generateContent client
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    timeout_secs: Option<u64>,
}

impl GeminiClient {
    /// Create a client from config; fails when no API key is available
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        if !config.is_configured() {
            anyhow::bail!(
                "Gemini not configured. Run: bugsmith gemini auth <api-key>\n\
                 Or set the GEMINI_API_KEY environment variable."
            );
        }
        let http = reqwest::Client::builder()
            .user_agent("bugsmith/0.3")
            .build()?;
        Ok(Self {
            http,
            api_key: config.api_key.clone().unwrap_or_default(),
            model: config.model().to_string(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", API_BASE, self.model)
    }
}

impl GenerateApi for GeminiClient {
    async fn generate(&self, bug: &BugInput) -> Result<ReportBody, GenerateError> {
        let request = build_request(bug);

        let mut call = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request);
        if let Some(secs) = self.timeout_secs {
            call = call.timeout(Duration::from_secs(secs));
        }

        let response = call
            .send()
            .await
            .map_err(|e| classify_send_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Upstream(format!("unreadable response envelope: {}", e)))?;

        let text = envelope
            .first_text()
            .ok_or_else(|| GenerateError::InvalidResponseFormat {
                reason: "response contained no candidate text".to_string(),
                raw: String::new(),
            })?;

        parse_report_body(&text)
    }
}

/// Build the request payload: [image, text] when a screenshot exists so the
/// model can ground its inferences in the image, text alone otherwise
pub fn build_request(bug: &BugInput) -> GenerateContentRequest {
    let mut parts = Vec::new();
    if let Some(screenshot) = &bug.screenshot {
        parts.push(Part::inline_data(&screenshot.mime_type, &screenshot.data));
    }
    parts.push(Part::text(prompt::build_prompt(bug)));

    GenerateContentRequest {
        contents: vec![Content {
            parts,
            role: Some("user".to_string()),
        }],
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
            response_mime_type: "application/json".to_string(),
            response_schema: schema::response_schema(),
        },
    }
}

/// Parse and validate model output text (pure function, testable).
///
/// Typed deserialization is the schema check: a missing required field or
/// malformed JSON is a hard failure, never a partially-filled report.
pub fn parse_report_body(text: &str) -> Result<ReportBody, GenerateError> {
    serde_json::from_str(text).map_err(|e| GenerateError::InvalidResponseFormat {
        reason: e.to_string(),
        raw: text.chars().take(RAW_SNIPPET_LEN).collect(),
    })
}

fn classify_send_error(e: reqwest::Error, timeout_secs: Option<u64>) -> GenerateError {
    if e.is_timeout() {
        GenerateError::Timeout(timeout_secs.unwrap_or_default())
    } else {
        GenerateError::Upstream(e.to_string())
    }
}

fn classify_status(status: StatusCode, body: &str) -> GenerateError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerateError::Auth,
        StatusCode::TOO_MANY_REQUESTS => GenerateError::RateLimited,
        _ => GenerateError::Upstream(format!(
            "HTTP {}: {}",
            status.as_u16(),
            body.chars().take(RAW_SNIPPET_LEN).collect::<String>()
        )),
    }
}

use thiserror::Error;

/// Failure classes for a single generation call.
///
/// None of these are retried internally; each one fails the whole batch.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Model output was not parseable JSON or missed required fields.
    /// `raw` keeps a truncated copy of the response text for diagnosis.
    #[error("model response did not match the report schema: {reason}")]
    InvalidResponseFormat { reason: String, raw: String },

    #[error("Gemini API rejected the credentials")]
    Auth,

    #[error("Gemini API rate limit exceeded")]
    RateLimited,

    #[error("Gemini API request failed: {0}")]
    Upstream(String),

    #[error("Gemini API request timed out after {0}s")]
    Timeout(u64),
}

impl GenerateError {
    /// Generic user-facing message; upstream detail stays out of the banner
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerateError::InvalidResponseFormat { .. } => {
                "The model returned an unexpected response. Check your inputs and try again."
            }
            GenerateError::Auth => {
                "Gemini credentials are missing or invalid. Run `bugsmith gemini auth`."
            }
            GenerateError::RateLimited => {
                "The Gemini API is rate limiting requests. Try again shortly."
            }
            GenerateError::Upstream(_) | GenerateError::Timeout(_) => {
                "Report generation failed. Check your inputs and try again."
            }
        }
    }
}

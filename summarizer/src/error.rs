use thiserror::Error;

/// Failures of the model-backed operations.
///
/// Extraction never fails with one of these: an unreadable PDF simply yields
/// empty text, which callers check for themselves.
#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("no Gemini API key configured; set GEMINI_API_KEY or pass a key with the request")]
    MissingApiKey,

    /// Transport or decode failure, stored with its URL stripped.
    #[error("request to Gemini failed: {0}")]
    Http(reqwest::Error),

    #[error("Gemini API error ({status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Gemini returned no text in its response")]
    EmptyResponse,
}

impl SummarizerError {
    /// Short machine-readable code, used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            SummarizerError::MissingApiKey => "missing_api_key",
            SummarizerError::Http(_) => "model_unreachable",
            SummarizerError::Upstream { .. } => "model_error",
            SummarizerError::EmptyResponse => "empty_model_response",
        }
    }
}

pub type SummarizerResult<T> = Result<T, SummarizerError>;

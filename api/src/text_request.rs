use pdf_summarizer::SummaryMode;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
    #[serde(default)]
    pub summary_type: SummaryMode,
    pub api_key: Option<String>, // falls back to the server's GEMINI_API_KEY
}

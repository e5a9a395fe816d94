use serde::Deserialize;

#[derive(Deserialize)]
pub struct QaRequest {
    pub text: String,
    pub api_key: Option<String>, // falls back to the server's GEMINI_API_KEY
}

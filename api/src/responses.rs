use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

#[derive(Deserialize, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Deserialize, Serialize)]
pub struct QaResponse {
    pub qa_pairs: String,
}

use crate::api_error::ApiError;
use crate::auth::{request_api_key, BearerHeader};
use crate::qa_request::QaRequest;
use crate::responses::{ExtractResponse, QaResponse, SummaryResponse};
use crate::text_request::TextRequest;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Json, Router,
};
use pdf_summarizer::document_processor::{clean_text, extract_text_from_bytes, is_pdf};
use pdf_summarizer::{Config, QuestionService, SummaryService, TextGenerator};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

pub struct AppState<G: TextGenerator> {
    pub summaries: Arc<SummaryService<G>>,
    pub questions: Arc<QuestionService<G>>,
}

impl<G: TextGenerator> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            summaries: self.summaries.clone(),
            questions: self.questions.clone(),
        }
    }
}

impl<G: TextGenerator> AppState<G> {
    pub fn new(generator: G, config: &Config) -> Self {
        Self {
            summaries: Arc::new(SummaryService::new(generator.clone(), config.summary_char_limit)),
            questions: Arc::new(QuestionService::new(generator, config.qa_char_limit)),
        }
    }
}

pub fn app<G: TextGenerator>(state: AppState<G>, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/extract-text", post(extract_text))
        .route("/summarize", post(summarize::<G>))
        .route("/generate-qa", post(generate_qa::<G>))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to Intelligent PDF Summarizer API" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn extract_text(mut multipart: Multipart) -> Result<Json<ExtractResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| ApiError::InvalidUpload {
        status: e.status(),
        message: e.body_text(),
    })? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| ApiError::InvalidUpload {
            status: e.status(),
            message: e.body_text(),
        })?;
        upload = Some((filename, content_type, bytes));
        break;
    }

    let (filename, content_type, bytes) = upload.ok_or(ApiError::MissingFile)?;
    log::info!("[{}] Extracting text from {} ({} bytes)", request_id, filename, bytes.len());

    if !is_pdf(content_type.as_deref(), &bytes) {
        log::warn!(
            "[{}] {} is not a PDF (content type {:?})",
            request_id,
            filename,
            content_type
        );
    }

    let raw_text = tokio::task::spawn_blocking(move || extract_text_from_bytes(&bytes))
        .await
        .unwrap_or_else(|e| {
            log::error!("[{}] Extraction task failed: {}", request_id, e);
            String::new()
        });

    let text = clean_text(&raw_text);
    if text.is_empty() {
        return Err(ApiError::EmptyExtraction);
    }

    log::info!("[{}] Extracted {} characters", request_id, text.chars().count());
    Ok(Json(ExtractResponse { text }))
}

async fn summarize<G: TextGenerator>(
    State(state): State<AppState<G>>,
    bearer: BearerHeader,
    Json(request): Json<TextRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    log::info!(
        "[{}] {} summary requested for {} characters",
        request_id,
        request.summary_type,
        request.text.chars().count()
    );

    let api_key = request_api_key(bearer, request.api_key);
    let summary = state
        .summaries
        .summarize(&request.text, request.summary_type, api_key.as_deref())
        .await?;
    Ok(Json(SummaryResponse { summary }))
}

async fn generate_qa<G: TextGenerator>(
    State(state): State<AppState<G>>,
    bearer: BearerHeader,
    Json(request): Json<QaRequest>,
) -> Result<Json<QaResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    log::info!(
        "[{}] Q&A requested for {} characters",
        request_id,
        request.text.chars().count()
    );

    let api_key = request_api_key(bearer, request.api_key);
    let qa_pairs = state
        .questions
        .generate_qa(&request.text, api_key.as_deref())
        .await?;
    Ok(Json(QaResponse { qa_pairs }))
}

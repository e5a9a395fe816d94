use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pdf_summarizer::SummarizerError;
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    MissingFile,
    InvalidUpload { status: StatusCode, message: String },
    EmptyExtraction,
    Model(SummarizerError),
}

impl From<SummarizerError> for ApiError {
    fn from(err: SummarizerError) -> Self {
        ApiError::Model(err)
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::MissingFile => (
                StatusCode::BAD_REQUEST,
                "missing_file",
                "Multipart field 'file' with a PDF is required".to_string(),
            ),
            ApiError::InvalidUpload { status, message } => {
                (*status, "invalid_upload", message.clone())
            }
            ApiError::EmptyExtraction => (
                StatusCode::BAD_REQUEST,
                "empty_extraction",
                "Could not extract text from PDF. It might be empty or scanned (image-based)."
                    .to_string(),
            ),
            ApiError::Model(err) => {
                let status = match err {
                    SummarizerError::MissingApiKey => StatusCode::UNAUTHORIZED,
                    SummarizerError::Http(_) => StatusCode::SERVICE_UNAVAILABLE,
                    SummarizerError::Upstream { .. } | SummarizerError::EmptyResponse => {
                        StatusCode::BAD_GATEWAY
                    }
                };
                (status, err.code(), err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            log::error!("{}: {}", code, message);
        } else {
            log::warn!("{}: {}", code, message);
        }

        (
            status,
            Json(ErrorBody {
                error: code.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

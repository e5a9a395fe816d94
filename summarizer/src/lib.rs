pub mod config;
pub mod document_processor;
pub mod error;
pub mod gemini_service;
pub mod models;
pub mod question_service;
pub mod summary_service;

pub use config::Config;
pub use error::{SummarizerError, SummarizerResult};
pub use gemini_service::{GeminiService, TextGenerator};
pub use models::*;
pub use question_service::QuestionService;
pub use summary_service::SummaryService;

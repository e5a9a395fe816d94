mod api_error;
mod auth;
mod qa_request;
mod responses;
mod routes;
mod text_request;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use pdf_summarizer::{Config, GeminiService};
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    let config = Config::from_env()?;
    env_logger::init();

    let gemini = GeminiService::new(&config);
    if gemini.has_api_key() {
        log::info!("Using Gemini model {}", gemini.model());
    } else {
        log::warn!("GEMINI_API_KEY not set, requests must supply their own key");
    }

    let app = routes::app(AppState::new(gemini, &config), config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

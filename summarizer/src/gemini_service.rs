use crate::config::Config;
use crate::error::{SummarizerError, SummarizerResult};
use crate::models::*;
use reqwest::Client;
use std::future::Future;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Anything that turns a prompt into model text.
///
/// The summary and Q&A services are generic over this so they can run
/// against a stub in tests.
pub trait TextGenerator: Clone + Send + Sync + 'static {
    fn generate(&self, prompt: &str) -> impl Future<Output = SummarizerResult<String>> + Send;

    /// A copy of this generator that authenticates with `api_key` instead.
    fn with_api_key(&self, api_key: &str) -> Self;
}

#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    generation_config: GeminiGenerationConfig,
}

impl GeminiService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
            generation_config: GeminiGenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(&self, prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(self.generation_config.clone()),
        }
    }
}

impl TextGenerator for GeminiService {
    async fn generate(&self, prompt: &str) -> SummarizerResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SummarizerError::MissingApiKey)?;

        log::debug!(
            "Sending {} character prompt to {}",
            prompt.chars().count(),
            self.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(transport_error)?;
            log::error!("Gemini API returned {}: {}", status, body);
            return Err(SummarizerError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(transport_error)?;
        answer_text(gemini_response)
    }

    fn with_api_key(&self, api_key: &str) -> Self {
        Self {
            api_key: Some(api_key.to_string()),
            ..self.clone()
        }
    }
}

// Error text reaches API clients, so it must never carry the request URL.
fn transport_error(err: reqwest::Error) -> SummarizerError {
    SummarizerError::Http(err.without_url())
}

/// Joins the text parts of the first candidate.
pub fn answer_text(response: GeminiResponse) -> SummarizerResult<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .map(|c| {
            c.content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(SummarizerError::EmptyResponse)
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(api_key: Option<&str>) -> GeminiService {
        GeminiService::new(&Config {
            gemini_api_key: api_key.map(str::to_string),
            gemini_base_url: "http://127.0.0.1:9/v1beta".to_string(),
            ..Config::default()
        })
    }

    #[test]
    fn endpoint_includes_model() {
        assert_eq!(
            service(None).endpoint(),
            "http://127.0.0.1:9/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_carries_prompt_and_generation_config() {
        let request = service(None).build_request("Summarize this");
        assert_eq!(request.contents[0].parts[0].text, "Summarize this");
        assert_eq!(request.generation_config.unwrap().max_output_tokens, 8192);
    }

    #[test]
    fn with_api_key_overrides_only_the_key() {
        let base = service(None);
        let keyed = base.with_api_key("user-key");

        assert!(!base.has_api_key());
        assert_eq!(keyed.api_key.as_deref(), Some("user-key"));
        assert_eq!(keyed.model(), base.model());
    }

    #[tokio::test]
    async fn generate_without_key_fails_before_any_request() {
        let err = service(None).generate("hello").await.unwrap_err();
        assert!(matches!(err, SummarizerError::MissingApiKey));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        // Nothing listens on the discard port; a proxy in between may answer instead.
        let err = service(Some("k")).generate("hello").await.unwrap_err();
        assert!(matches!(
            err,
            SummarizerError::Http(_) | SummarizerError::Upstream { .. }
        ));
    }

    #[tokio::test]
    async fn transport_error_does_not_reveal_the_key() {
        let err = service(Some("SERVER-SECRET-KEY-42"))
            .generate("hello")
            .await
            .unwrap_err();
        let message = err.to_string();

        assert!(!message.contains("SERVER-SECRET-KEY-42"), "leaked: {}", message);
    }

    #[test]
    fn answer_text_joins_parts_of_first_candidate() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello, "},{"text":"world"}]}},
                              {"content":{"parts":[{"text":"ignored"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(answer_text(response).unwrap(), "Hello, world");
    }

    #[test]
    fn answer_text_without_candidates_is_an_error() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(
            answer_text(response),
            Err(SummarizerError::EmptyResponse)
        ));
    }
}

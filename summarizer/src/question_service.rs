use crate::document_processor::truncate_chars;
use crate::error::SummarizerResult;
use crate::gemini_service::TextGenerator;

/// Returned instead of calling the model when there is nothing to ask about.
pub const EMPTY_QA: &str = "No text available to generate questions.";

/// The Q&A prompt; only the first `char_limit` characters of `text` are included.
pub fn build_qa_prompt(text: &str, char_limit: usize) -> String {
    let text = truncate_chars(text, char_limit);
    format!(
        r#"You are a helpful teacher.

Generate important questions and answers from the text.

Rules:
- Each question must be on a new line
- Each answer must be on a new line
- Leave one blank line between each Q&A
- Do NOT put question and answer on same line

Format EXACTLY like this:

Q1: What is AI?
A1: AI is artificial intelligence.

Q2: What is machine learning?
A2: Machine learning is a subset of AI.

Text:
{text}"#
    )
}

pub struct QuestionService<G: TextGenerator> {
    generator: G,
    char_limit: usize,
}

impl<G: TextGenerator> QuestionService<G> {
    pub fn new(generator: G, char_limit: usize) -> Self {
        Self {
            generator,
            char_limit,
        }
    }

    /// Generates the Q&A block, authenticating with `api_key` when one is given.
    pub async fn generate_qa(&self, text: &str, api_key: Option<&str>) -> SummarizerResult<String> {
        if text.trim().is_empty() {
            log::info!("Empty text submitted for Q&A generation");
            return Ok(EMPTY_QA.to_string());
        }

        let prompt = build_qa_prompt(text, self.char_limit);
        let qa = match api_key {
            Some(key) => self.generator.with_api_key(key).generate(&prompt).await?,
            None => self.generator.generate(&prompt).await?,
        };

        log::info!("Generated Q&A block ({} characters)", qa.chars().count());
        Ok(qa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SummarizerError;
    use crate::models::QaPair;
    use std::sync::{Arc, Mutex};

    /// Answers in Q&A format and remembers which key each call used.
    #[derive(Clone, Default)]
    struct KeyedGenerator {
        key: Option<String>,
        seen_keys: Arc<Mutex<Vec<Option<String>>>>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl TextGenerator for KeyedGenerator {
        async fn generate(&self, prompt: &str) -> SummarizerResult<String> {
            self.seen_keys.lock().unwrap().push(self.key.clone());
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.key.as_deref() == Some("bad") {
                return Err(SummarizerError::Upstream {
                    status: 400,
                    body: "API key not valid".to_string(),
                });
            }
            Ok("Q1: What is Rust?\nA1: A systems language.".to_string())
        }

        fn with_api_key(&self, api_key: &str) -> Self {
            Self {
                key: Some(api_key.to_string()),
                ..self.clone()
            }
        }
    }

    #[tokio::test]
    async fn empty_text_returns_sentinel_without_calling_model() {
        let generator = KeyedGenerator::default();
        let service = QuestionService::new(generator.clone(), 100);

        assert_eq!(service.generate_qa("", Some("k")).await.unwrap(), EMPTY_QA);
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn request_key_overrides_configured_key() {
        let generator = KeyedGenerator {
            key: Some("server".to_string()),
            ..Default::default()
        };
        let service = QuestionService::new(generator.clone(), 100);

        service.generate_qa("text", Some("user")).await.unwrap();
        service.generate_qa("text", None).await.unwrap();

        let keys = generator.seen_keys.lock().unwrap();
        assert_eq!(keys[0].as_deref(), Some("user"));
        assert_eq!(keys[1].as_deref(), Some("server"));
    }

    #[tokio::test]
    async fn output_is_returned_unparsed() {
        let service = QuestionService::new(KeyedGenerator::default(), 100);
        let qa = service.generate_qa("Rust is a language.", None).await.unwrap();

        assert!(qa.starts_with("Q1:"));
        assert_eq!(QaPair::parse_all(&qa).len(), 1);
    }

    #[tokio::test]
    async fn rejected_key_surfaces_as_error() {
        let service = QuestionService::new(KeyedGenerator::default(), 100);
        let err = service.generate_qa("text", Some("bad")).await.unwrap_err();
        assert!(matches!(err, SummarizerError::Upstream { status: 400, .. }));
    }

    #[test]
    fn prompt_truncates_at_limit() {
        let at_limit = "a".repeat(20);
        assert!(build_qa_prompt(&at_limit, 20).ends_with(&at_limit));

        let above = format!("{}~", at_limit);
        let prompt = build_qa_prompt(&above, 20);
        assert!(prompt.ends_with(&at_limit));
        assert!(!prompt.contains('~'));
    }
}

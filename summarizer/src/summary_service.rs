use crate::document_processor::truncate_chars;
use crate::error::SummarizerResult;
use crate::gemini_service::TextGenerator;
use crate::models::SummaryMode;

/// Returned instead of calling the model when there is nothing to summarize.
pub const EMPTY_SUMMARY: &str = "no text found to summarize.";

const CONCISE_INSTRUCTION: &str = "Summarize in short bullet points(maximum 8-10 points)";
const DETAILED_INSTRUCTION: &str =
    "provide a detailed structured summary with headings and explanations";

pub fn instruction_for(mode: SummaryMode) -> &'static str {
    match mode {
        SummaryMode::Concise => CONCISE_INSTRUCTION,
        SummaryMode::Detailed => DETAILED_INSTRUCTION,
    }
}

/// The summarization prompt; only the first `char_limit` characters of `text` are included.
pub fn build_summary_prompt(text: &str, mode: SummaryMode, char_limit: usize) -> String {
    let instruction = instruction_for(mode);
    let text = truncate_chars(text, char_limit);
    format!(
        r#"You are an expert academic summarizer.
{instruction}

Focus only on important concepts.
Avoid unnecessary details.
Use clear  simple language.

Text:
{text}"#
    )
}

pub struct SummaryService<G: TextGenerator> {
    generator: G,
    char_limit: usize,
}

impl<G: TextGenerator> SummaryService<G> {
    pub fn new(generator: G, char_limit: usize) -> Self {
        Self {
            generator,
            char_limit,
        }
    }

    /// Summarizes `text`, authenticating with `api_key` when one is given.
    pub async fn summarize(
        &self,
        text: &str,
        mode: SummaryMode,
        api_key: Option<&str>,
    ) -> SummarizerResult<String> {
        if text.trim().is_empty() {
            log::info!("Empty text submitted for {} summary", mode);
            return Ok(EMPTY_SUMMARY.to_string());
        }

        let total = text.chars().count();
        if total > self.char_limit {
            log::warn!(
                "Document has {} characters, only the first {} are summarized",
                total,
                self.char_limit
            );
        }

        let prompt = build_summary_prompt(text, mode, self.char_limit);
        let summary = match api_key {
            Some(key) => self.generator.with_api_key(key).generate(&prompt).await?,
            None => self.generator.generate(&prompt).await?,
        };

        log::info!("Generated {} summary ({} characters)", mode, summary.chars().count());
        Ok(summary)
    }
}

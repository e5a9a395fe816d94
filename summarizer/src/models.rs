use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the two fixed summary instructions to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    #[default]
    Concise,
    Detailed,
}

impl SummaryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryMode::Concise => "concise",
            SummaryMode::Detailed => "detailed",
        }
    }
}

impl fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concise" => Ok(SummaryMode::Concise),
            "detailed" => Ok(SummaryMode::Detailed),
            other => Err(format!(
                "unknown summary mode '{}', expected 'concise' or 'detailed'",
                other
            )),
        }
    }
}

/// One question/answer pair read back out of a generated Q&A block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub number: u32,
    pub question: String,
    pub answer: String,
}

impl QaPair {
    /// Reads `Qn:` / `An:` lines out of model output.
    ///
    /// Lenient: markdown bold markers are ignored, answers may span several
    /// lines, and a question with no answer is dropped.
    pub fn parse_all(text: &str) -> Vec<QaPair> {
        let mut pairs = Vec::new();
        let mut current: Option<(u32, String)> = None;
        let mut answer: Option<String> = None;

        for raw_line in text.lines() {
            let line = raw_line.trim().trim_matches('*').trim();
            if line.is_empty() {
                continue;
            }

            if let Some((number, rest)) = split_marker(line, 'Q') {
                if let (Some((n, q)), Some(a)) = (current.take(), answer.take()) {
                    pairs.push(QaPair { number: n, question: q, answer: a });
                }
                current = Some((number, rest.to_string()));
            } else if let Some((_, rest)) = split_marker(line, 'A') {
                if current.is_some() {
                    answer = Some(rest.to_string());
                }
            } else if let Some(a) = answer.as_mut() {
                a.push(' ');
                a.push_str(line);
            } else if let Some((_, q)) = current.as_mut() {
                q.push(' ');
                q.push_str(line);
            }
        }

        if let (Some((n, q)), Some(a)) = (current, answer) {
            pairs.push(QaPair { number: n, question: q, answer: a });
        }

        pairs
    }
}

// Matches "Q12: rest" (or "A12: rest"); the number is optional ("Q: rest").
fn split_marker(line: &str, marker: char) -> Option<(u32, &str)> {
    let rest = line.strip_prefix(marker)?;
    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    let (digits, tail) = rest.split_at(digits_end);
    let tail = tail.strip_prefix(':')?;
    let tail = tail.trim_start_matches('*').trim();
    let number = digits.parse().unwrap_or(0);
    Some((number, tail))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: GeminiContent,
}

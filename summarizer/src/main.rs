use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pdf_summarizer::document_processor::{clean_text, extract_text_from_path, preview, PREVIEW_CHARS};
use pdf_summarizer::{
    Config, GeminiService, QaPair, QuestionService, SummaryMode, SummaryService, TextGenerator,
};
use std::fs;
use std::path::{Path, PathBuf};

const SAMPLE_TEXT: &str = "Artificial Intelligence (AI) is transforming the world in unprecedented ways. \
Machine learning, a subset of AI, enables computers to learn from data without being explicitly programmed. \
Deep learning, which uses neural networks with multiple layers, has achieved remarkable success in image recognition, \
natural language processing, and game playing. The applications of AI span across healthcare, finance, \
transportation, and entertainment. However, ethical considerations such as bias, privacy, and job displacement \
must be carefully addressed as AI continues to evolve.";

#[derive(Parser)]
#[command(name = "pdf_summarizer", version, about = "Summarize PDFs and generate Q&A with Gemini")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract and clean the text of a PDF
    Extract {
        pdf: PathBuf,
        /// Print the whole text instead of a preview
        #[arg(long)]
        full: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Summarize a PDF
    Summarize {
        pdf: PathBuf,
        #[arg(short, long, default_value_t = SummaryMode::Concise)]
        mode: SummaryMode,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate questions and answers from a PDF
    Qa {
        pdf: PathBuf,
        /// Gemini key to use instead of GEMINI_API_KEY
        #[arg(long)]
        api_key: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run every operation against a built-in sample text and report
    Check {
        #[arg(long)]
        api_key: Option<String>,
    },
}

struct Summarizer {
    summaries: SummaryService<GeminiService>,
    questions: QuestionService<GeminiService>,
}

impl Summarizer {
    fn new(config: &Config, api_key: Option<&str>) -> Self {
        let mut gemini = GeminiService::new(config);
        if let Some(key) = api_key {
            gemini = gemini.with_api_key(key);
        }
        if !gemini.has_api_key() {
            log::warn!("No Gemini API key configured, model calls will fail");
        }

        Self {
            summaries: SummaryService::new(gemini.clone(), config.summary_char_limit),
            questions: QuestionService::new(gemini, config.qa_char_limit),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Extract { pdf, full, output } => {
            let text = load_pdf_text(&pdf)?;
            match output {
                Some(path) => write_output(&path, &text)?,
                None if full => println!("{}", text),
                None => println!("{}", preview(&text, PREVIEW_CHARS)),
            }
        }
        Command::Summarize { pdf, mode, output } => {
            let text = load_pdf_text(&pdf)?;
            let summarizer = Summarizer::new(&config, None);
            let summary = summarizer.summaries.summarize(&text, mode, None).await?;
            emit(&summary, output.as_deref())?;
        }
        Command::Qa {
            pdf,
            api_key,
            output,
        } => {
            let text = load_pdf_text(&pdf)?;
            let summarizer = Summarizer::new(&config, api_key.as_deref());
            let qa = summarizer.questions.generate_qa(&text, None).await?;
            emit(&qa, output.as_deref())?;
        }
        Command::Check { api_key } => {
            let summarizer = Summarizer::new(&config, api_key.as_deref());
            run_check(&summarizer).await?;
        }
    }

    Ok(())
}

fn load_pdf_text(pdf: &Path) -> Result<String> {
    let text = clean_text(&extract_text_from_path(pdf));
    if text.is_empty() {
        bail!(
            "Could not extract text from {}. It might be empty or scanned (image-based); \
             only text-based PDFs are supported.",
            pdf.display()
        );
    }
    Ok(text)
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => write_output(path, text),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("Wrote {} characters to {}", text.chars().count(), path.display());
    Ok(())
}

async fn run_check(summarizer: &Summarizer) -> Result<()> {
    let mut failures = 0;

    for mode in [SummaryMode::Concise, SummaryMode::Detailed] {
        match summarizer.summaries.summarize(SAMPLE_TEXT, mode, None).await {
            Ok(summary) => println!("PASS  {} summary ({} chars)", mode, summary.chars().count()),
            Err(e) => {
                failures += 1;
                println!("FAIL  {} summary: {}", mode, e);
            }
        }
    }

    match summarizer.questions.generate_qa(SAMPLE_TEXT, None).await {
        Ok(qa) => {
            let pairs = QaPair::parse_all(&qa);
            if pairs.is_empty() {
                failures += 1;
                println!("FAIL  Q&A: no Qn:/An: pairs found in model output");
            } else {
                println!("PASS  Q&A ({} pairs)", pairs.len());
            }
        }
        Err(e) => {
            failures += 1;
            println!("FAIL  Q&A: {}", e);
        }
    }

    if failures > 0 {
        bail!("{} of 3 checks failed", failures);
    }
    println!("All checks passed");
    Ok(())
}

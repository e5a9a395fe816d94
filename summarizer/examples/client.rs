use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::json;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new();
    let base_url = env::var("SUMMARIZER_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
    let pdf_path = env::args().nth(1).ok_or("usage: client <file.pdf>")?;

    println!("Testing PDF summarizer API at {}", base_url);

    println!("\nHealth Check:");
    let health_response = client.get(format!("{}/health", base_url)).send().await?;
    println!("Status: {}", health_response.status());

    println!("\nExtract Text:");
    let bytes = std::fs::read(&pdf_path)?;
    let form = Form::new().part(
        "file",
        Part::bytes(bytes)
            .file_name(pdf_path.clone())
            .mime_str("application/pdf")?,
    );
    let extract_response = client
        .post(format!("{}/extract-text", base_url))
        .multipart(form)
        .send()
        .await?;
    println!("Status: {}", extract_response.status());
    let extract_json: serde_json::Value = extract_response.json().await?;
    let text = extract_json["text"].as_str().unwrap_or_default().to_string();
    println!("Extracted {} characters", text.chars().count());

    println!("\nConcise Summary:");
    let summary_response = client
        .post(format!("{}/summarize", base_url))
        .json(&json!({ "text": text, "summary_type": "concise" }))
        .send()
        .await?;
    println!("Status: {}", summary_response.status());
    let summary_json: serde_json::Value = summary_response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&summary_json)?);

    println!("\nQ&A:");
    let qa_response = client
        .post(format!("{}/generate-qa", base_url))
        .json(&json!({ "text": text, "api_key": env::var("GEMINI_API_KEY").ok() }))
        .send()
        .await?;
    println!("Status: {}", qa_response.status());
    let qa_json: serde_json::Value = qa_response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&qa_json)?);

    println!("\nClient test completed!");
    Ok(())
}

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Client for the PDF-to-text extraction service. Takes a publicly
/// addressable document URL, returns the extracted plain text that
/// feeds the clause segmenter.
pub struct ExtractionClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub pdf_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractResponse {
    pub text: String,
}

impl ExtractionClient {
    pub fn new(base_url: &str, timeout_s: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: crate::client(timeout_s),
        }
    }

    /// Fetch the plain text of a stored PDF.
    pub async fn extract_text(&self, pdf_url: &str) -> Result<String> {
        let resp = self
            .http
            .post(format!("{}/extract-text", self.base_url))
            .json(&ExtractRequest {
                pdf_url: pdf_url.to_string(),
            })
            .send()
            .await?;
        let parsed: ExtractResponse = crate::read_json(resp).await?;
        Ok(parsed.text)
    }
}

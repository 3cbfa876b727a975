use anyhow::Result;
use redline_core::types::{ChatReply, StoredClause, Suggestion};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Client for the analysis/LLM backend: conversational chat, full
/// contract analysis, review suggestions, and clause generation.
/// Constructed once per configured base URL.
pub struct AnalysisClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

/// Payload for `/analyze_contract/`. Either `url` or `raw_text` is
/// populated; the review flow always sends a stored-document URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
    pub raw_text: String,
    pub top_k: u32,
    pub use_llm_contradiction_check: bool,
}

impl AnalyzeRequest {
    /// Defaults the review flow sends for a stored PDF.
    pub fn for_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            raw_text: String::new(),
            top_k: 2,
            use_llm_contradiction_check: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfRequest {
    pub pdf_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: &str, timeout_s: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: crate::client(timeout_s),
        }
    }

    /// Conversational follow-up about a reviewed contract.
    pub async fn chat(&self, message: &str, session_id: &str) -> Result<ChatReply> {
        debug!(session_id, "chat request to analysis backend");
        let resp = self
            .http
            .post(format!("{}/chat/", self.base_url))
            .json(&ChatRequest {
                message: message.to_string(),
                session_id: session_id.to_string(),
            })
            .send()
            .await?;
        crate::read_json(resp).await
    }

    /// Full contract analysis. The report shape is owned by the
    /// backend and passed through to the front-end unchanged.
    pub async fn analyze_contract(&self, pdf_url: &str) -> Result<Value> {
        let resp = self
            .http
            .post(format!("{}/analyze_contract/", self.base_url))
            .json(&AnalyzeRequest::for_url(pdf_url))
            .send()
            .await?;
        crate::read_json(resp).await
    }

    /// Review suggestions for a stored contract.
    pub async fn review_suggestions(&self, pdf_url: &str) -> Result<Vec<Suggestion>> {
        let resp = self
            .http
            .post(format!("{}/upload-contract", self.base_url))
            .json(&PdfRequest {
                pdf_url: pdf_url.to_string(),
            })
            .send()
            .await?;
        crate::read_json(resp).await
    }

    /// Clause records (with pre-assigned vector ids) for a new
    /// playbook, generated and embedded by the backend.
    pub async fn generate_clauses(&self, pdf_url: &str) -> Result<Vec<StoredClause>> {
        let resp = self
            .http
            .post(format!("{}/process-pdf-and-generate-clauses", self.base_url))
            .json(&PdfRequest {
                pdf_url: pdf_url.to_string(),
            })
            .send()
            .await?;
        crate::read_json(resp).await
    }
}

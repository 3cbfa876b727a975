//! Typed HTTP clients for the external collaborators: text extraction,
//! the analysis/LLM backend, object storage, and playbook persistence.
//!
//! The clients own no business logic; they serialize the exact wire
//! shapes the backends expect and surface backend error details.

pub mod analysis;
pub mod extraction;
pub mod playbooks;
pub mod storage;

use std::time::Duration;

use anyhow::Result;
use serde::de::DeserializeOwned;
use tracing::warn;

pub(crate) fn client(timeout_s: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("redline/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_s))
        .build()
        .unwrap_or_default()
}

/// Decode a backend response, carving the `detail` field out of error
/// bodies so callers surface the backend's own message.
pub(crate) async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("detail").map(|d| match d {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
            })
            .unwrap_or(body);
        warn!("backend returned {status}: {detail}");
        anyhow::bail!("backend returned {status}: {detail}");
    }
    Ok(resp.json().await?)
}

use anyhow::Result;
use redline_core::types::{Playbook, StoredClause};
use serde::{Deserialize, Serialize};

/// Client for the persistence service that owns playbooks and clause
/// records. The schema behind it is the service's concern; only the
/// wire shapes below are agreed.
pub struct PersistenceClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePlaybookRequest {
    pub name: String,
    pub clauses: Vec<StoredClause>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClausesByIdsRequest {
    pub clause_ids: Vec<String>,
}

impl PersistenceClient {
    pub fn new(base_url: &str, timeout_s: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: crate::client(timeout_s),
        }
    }

    /// Persist a named playbook; the service returns the stored record
    /// with its assigned identifier.
    pub async fn save_playbook(&self, name: &str, clauses: Vec<StoredClause>) -> Result<Playbook> {
        let resp = self
            .http
            .post(format!("{}/playbooks", self.base_url))
            .json(&SavePlaybookRequest {
                name: name.to_string(),
                clauses,
            })
            .send()
            .await?;
        crate::read_json(resp).await
    }

    /// Fetch clause records by their vector ids.
    pub async fn clauses_by_ids(&self, clause_ids: Vec<String>) -> Result<Vec<StoredClause>> {
        let resp = self
            .http
            .post(format!("{}/clauses-by-ids", self.base_url))
            .json(&ClausesByIdsRequest { clause_ids })
            .send()
            .await?;
        crate::read_json(resp).await
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Closed enumerations ──────────────────────────────────────────────────

/// Heuristic risk tag attached to a segmented clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Severity the review backend assigns to a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Counterpart demeanor selected for the negotiation simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationStyle {
    Aggressive,
    MildlyAggressive,
    Friendly,
}

/// Voice persona requested for the negotiation counterpart.
/// Speech synthesis itself happens in the browser; the server only
/// routes the tag through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

// ── Clauses & suggestions ────────────────────────────────────────────────

/// A labeled span of contract text produced by the segmenter.
/// Immutable once produced; carries no identity beyond its position in
/// the output sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub clause_type: String,
    pub clause_text: String,
}

/// A clause record with the identifier assigned by the external
/// generation/persistence pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredClause {
    pub vector_id: String,
    pub clause_type: String,
    pub clause_text: String,
}

/// An LLM-generated recommendation tied to a clause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub clause: String,
    pub suggestion: String,
    pub priority: Priority,
}

/// A named, persisted collection of preferred clauses used as a review
/// baseline. Owned by the persistence service; this is its wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playbook {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub clauses: Vec<StoredClause>,
}

// ── Chat ─────────────────────────────────────────────────────────────────

/// One turn of a chat or negotiation conversation. Ephemeral: lives
/// only in the in-memory session store for the life of the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Reply returned by the chat backend. The backend has shipped both
/// `session_id` and `sessionId` spellings; accept either.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,
}

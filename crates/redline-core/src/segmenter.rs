//! Heuristic clause segmentation over extracted contract text.
//!
//! Pure and deterministic: identical input always yields an identical
//! clause sequence. Works from layout and lexical cues only; there is
//! no semantic understanding, no I/O, and no clock dependency.

use crate::types::{Clause, RiskLevel};

/// Section names commonly used as standalone headings in contracts.
/// Matched case-insensitively against whole lines (optional trailing
/// colon).
const HEADING_LEXICON: &[&str] = &[
    "Parties",
    "Recitals",
    "Definitions",
    "Scope of Work",
    "Service Scope",
    "Payment Terms",
    "Confidentiality",
    "Intellectual Property",
    "Warranty",
    "Warranties",
    "Indemnification",
    "Limitation of Liability",
    "Liability and Risk",
    "Termination",
    "Termination for Convenience",
    "Force Majeure",
    "Assignment",
    "Notices",
    "Governing Law",
    "Dispute Resolution",
    "Severability",
    "Entire Agreement",
    "Non-Compete",
    "Non-Solicitation",
    "Insurance",
];

/// Keyword → risk table, scanned in order; first hit wins.
/// Levels mirror how the review flow flags each section type.
const RISK_KEYWORDS: &[(&str, RiskLevel)] = &[
    ("terminat", RiskLevel::High),
    ("as-is", RiskLevel::High),
    ("without warrant", RiskLevel::High),
    ("liquidated damages", RiskLevel::High),
    ("penalty", RiskLevel::High),
    ("non-compete", RiskLevel::High),
    ("unlimited", RiskLevel::High),
    ("indemnif", RiskLevel::Medium),
    ("liabilit", RiskLevel::Medium),
    ("warrant", RiskLevel::Medium),
    ("intellectual property", RiskLevel::Medium),
    ("work product", RiskLevel::Medium),
    ("assignment", RiskLevel::Medium),
    ("auto-renew", RiskLevel::Medium),
];

/// Configuration table for the segmentation heuristics.
///
/// Kept as data rather than inline conditionals so new heading types
/// can be added without touching the control flow.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Known section names matched as standalone heading lines.
    pub lexicon: Vec<String>,
    /// Minimum letter count for an all-caps line to qualify as a heading.
    pub min_caps_letters: usize,
    /// Lines longer than this are never headings.
    pub max_heading_len: usize,
    /// Label for text with no structural cues, and for preamble text
    /// before the first recognized heading.
    pub fallback_label: String,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            lexicon: HEADING_LEXICON.iter().map(|s| (*s).to_string()).collect(),
            min_caps_letters: 3,
            max_heading_len: 80,
            fallback_label: "General".into(),
        }
    }
}

impl SegmenterConfig {
    /// Return the heading label if `line` reads as a section heading.
    /// Cues are checked in a fixed order: numbered, lexicon, all-caps.
    fn heading_label(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() || line.len() > self.max_heading_len {
            return None;
        }
        numbered_heading(line)
            .or_else(|| self.lexicon_heading(line))
            .or_else(|| all_caps_heading(line, self.min_caps_letters))
    }

    fn lexicon_heading(&self, line: &str) -> Option<String> {
        let bare = line.strip_suffix(':').unwrap_or(line).trim_end();
        self.lexicon
            .iter()
            .find(|entry| bare.eq_ignore_ascii_case(entry.as_str()))
            .map(|_| bare.to_string())
    }
}

/// `1. Confidentiality`, `2) TERM`, `10.` — a leading number followed
/// by `.` or `)`. The title after the marker becomes the label; a bare
/// marker labels the clause with the marker itself.
fn numbered_heading(line: &str) -> Option<String> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    let rest = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?;
    // `1.5% interest` is body text, not a numbered marker.
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }
    let title = rest.trim();
    let title = title.strip_suffix(':').unwrap_or(title).trim_end();
    if title.is_empty() {
        Some(line.trim().to_string())
    } else {
        Some(title.to_string())
    }
}

/// `CONFIDENTIALITY`, `GOVERNING LAW:` — every letter uppercase, at
/// least `min_letters` of them, and only heading-ish punctuation.
fn all_caps_heading(line: &str, min_letters: usize) -> Option<String> {
    let bare = line.strip_suffix(':').unwrap_or(line).trim_end();
    let mut letters = 0usize;
    for c in bare.chars() {
        if c.is_alphabetic() {
            if c.is_lowercase() {
                return None;
            }
            letters += 1;
        } else if !c.is_ascii_digit() && !matches!(c, ' ' | '-' | '/' | '&' | '\'' | '.' | ',' | '(' | ')') {
            return None;
        }
    }
    (letters >= min_letters).then(|| bare.to_string())
}

fn push_clause(clauses: &mut Vec<Clause>, label: Option<&str>, fallback: &str, body: &[&str]) {
    let joined = body.join("\n");
    let text = joined.trim();
    if text.is_empty() {
        // Empty bodies are never emitted.
        return;
    }
    clauses.push(Clause {
        clause_type: label.unwrap_or(fallback).to_string(),
        clause_text: text.to_string(),
    });
}

/// Partition extracted document text into labeled clause candidates.
///
/// Total and order-preserving: empty input yields an empty sequence,
/// text without any recognized heading degrades to a single clause
/// under the fallback label, and no emitted clause has an empty body.
pub fn segment(text: &str, config: &SegmenterConfig) -> Vec<Clause> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    let headings: Vec<Option<String>> = lines.iter().map(|l| config.heading_label(l)).collect();

    if headings.iter().all(Option::is_none) {
        return vec![Clause {
            clause_type: config.fallback_label.clone(),
            clause_text: trimmed.to_string(),
        }];
    }

    let mut clauses = Vec::new();
    // None until the first heading: preamble text gets the fallback label.
    let mut label: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();

    for (line, heading) in lines.iter().copied().zip(headings.iter()) {
        match heading {
            Some(next) => {
                push_clause(&mut clauses, label.as_deref(), &config.fallback_label, &body);
                body.clear();
                label = Some(next.clone());
            },
            None => body.push(line),
        }
    }
    push_clause(&mut clauses, label.as_deref(), &config.fallback_label, &body);

    if clauses.is_empty() {
        // Headings with no bodies at all: degrade rather than lose the text.
        return vec![Clause {
            clause_type: config.fallback_label.clone(),
            clause_text: trimmed.to_string(),
        }];
    }
    clauses
}

/// Deterministic risk tag for a segmented clause: scan label and body
/// lowercased against the keyword table, first hit wins, `Low` otherwise.
pub fn assess_risk(clause: &Clause) -> RiskLevel {
    let haystack = format!("{}\n{}", clause.clause_type, clause.clause_text).to_lowercase();
    for (needle, level) in RISK_KEYWORDS {
        if haystack.contains(needle) {
            return *level;
        }
    }
    RiskLevel::Low
}

use redline_core::segmenter::{assess_risk, segment, SegmenterConfig};
use redline_core::types::{Clause, RiskLevel};

fn cfg() -> SegmenterConfig {
    SegmenterConfig::default()
}

#[test]
fn test_empty_input_yields_no_clauses() {
    assert!(segment("", &cfg()).is_empty());
}

#[test]
fn test_whitespace_only_input_yields_no_clauses() {
    assert!(segment("   ", &cfg()).is_empty());
    assert!(segment("\n\n\t\n", &cfg()).is_empty());
}

#[test]
fn test_all_caps_headings_split_into_clauses() {
    let text = "CONFIDENTIALITY\nBoth parties agree to keep information secret.\n\nTERMINATION\nEither party may terminate with notice.";
    let clauses = segment(text, &cfg());
    assert_eq!(clauses.len(), 2);
    assert_eq!(clauses[0].clause_type, "CONFIDENTIALITY");
    assert_eq!(
        clauses[0].clause_text,
        "Both parties agree to keep information secret."
    );
    assert_eq!(clauses[1].clause_type, "TERMINATION");
    assert_eq!(
        clauses[1].clause_text,
        "Either party may terminate with notice."
    );
}

#[test]
fn test_numbered_headings_use_title_as_label() {
    let text = "1. Confidentiality\nThe receiving party shall protect disclosed information.\n2. Governing Law\nThis agreement is governed by the laws of Delaware.";
    let clauses = segment(text, &cfg());
    assert_eq!(clauses.len(), 2);
    assert_eq!(clauses[0].clause_type, "Confidentiality");
    assert_eq!(clauses[1].clause_type, "Governing Law");
    assert_eq!(
        clauses[1].clause_text,
        "This agreement is governed by the laws of Delaware."
    );
}

#[test]
fn test_lexicon_heading_with_trailing_colon() {
    let text = "Payment Terms:\nInvoices are due within thirty days of receipt.";
    let clauses = segment(text, &cfg());
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].clause_type, "Payment Terms");
    assert_eq!(
        clauses[0].clause_text,
        "Invoices are due within thirty days of receipt."
    );
}

#[test]
fn test_no_heading_cues_yield_single_fallback_clause() {
    let text = "  The parties agree to the terms set out below and incorporated by reference.  ";
    let clauses = segment(text, &cfg());
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].clause_type, "General");
    assert_eq!(clauses[0].clause_text, text.trim());
}

#[test]
fn test_preamble_before_first_heading_is_kept() {
    let text = "This agreement is made between Acme and Beta.\n\nCONFIDENTIALITY\nEach party shall keep the other's information secret.";
    let clauses = segment(text, &cfg());
    assert_eq!(clauses.len(), 2);
    assert_eq!(clauses[0].clause_type, "General");
    assert_eq!(
        clauses[0].clause_text,
        "This agreement is made between Acme and Beta."
    );
    assert_eq!(clauses[1].clause_type, "CONFIDENTIALITY");
}

#[test]
fn test_heading_with_empty_body_is_dropped() {
    let text = "CONFIDENTIALITY\n\nTERMINATION\nEither party may terminate with notice.";
    let clauses = segment(text, &cfg());
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].clause_type, "TERMINATION");
}

#[test]
fn test_headings_without_any_body_degrade_to_fallback() {
    let text = "CONFIDENTIALITY\nTERMINATION";
    let clauses = segment(text, &cfg());
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].clause_type, "General");
    assert_eq!(clauses[0].clause_text, text);
}

#[test]
fn test_ordering_matches_appearance() {
    let text = "TERMINATION\nNotice period applies.\n\nCONFIDENTIALITY\nKeep it secret.\n\nPAYMENT TERMS\nNet thirty.";
    let labels: Vec<String> = segment(text, &cfg())
        .into_iter()
        .map(|c| c.clause_type)
        .collect();
    assert_eq!(labels, vec!["TERMINATION", "CONFIDENTIALITY", "PAYMENT TERMS"]);
}

#[test]
fn test_segmentation_is_deterministic() {
    let text = "1. Scope of Work\nProvider delivers the services.\n\nINDEMNIFICATION\nEach party shall indemnify the other.\n\ntrailing notes without heading";
    let first = segment(text, &cfg());
    let second = segment(text, &cfg());
    assert_eq!(first, second);
}

#[test]
fn test_no_emitted_clause_has_empty_body() {
    let inputs = [
        "CONFIDENTIALITY\nBody here.",
        "CONFIDENTIALITY\n\n\nTERMINATION\nx",
        "1.\ncontent under a bare numbered marker",
        "no headings at all, just prose",
    ];
    for input in inputs {
        for clause in segment(input, &cfg()) {
            assert!(
                !clause.clause_text.trim().is_empty(),
                "empty clause body for input {input:?}"
            );
        }
    }
}

#[test]
fn test_long_uppercase_line_is_not_a_heading() {
    // Shouting prose longer than the heading cap stays body text.
    let long_line = "THIS ENTIRE SENTENCE IS UPPERCASE BUT FAR TOO LONG TO BE TREATED AS A SECTION HEADING IN ANY REASONABLE CONTRACT LAYOUT";
    let clauses = segment(long_line, &cfg());
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].clause_type, "General");
}

// ── Risk tagging ──────────────────────────────────────────────────────────

fn clause(t: &str, x: &str) -> Clause {
    Clause {
        clause_type: t.into(),
        clause_text: x.into(),
    }
}

#[test]
fn test_termination_clause_tags_high() {
    let c = clause(
        "Termination for Convenience",
        "Either party may terminate this agreement with 30 days written notice.",
    );
    assert_eq!(assess_risk(&c), RiskLevel::High);
}

#[test]
fn test_as_is_warranty_tags_high() {
    let c = clause(
        "Warranty",
        "Services provided on an 'as-is' basis without warranties of any kind.",
    );
    assert_eq!(assess_risk(&c), RiskLevel::High);
}

#[test]
fn test_liability_limitation_tags_medium() {
    let c = clause(
        "Limitation of Liability",
        "In no event shall either party be liable for indirect or consequential damages.",
    );
    assert_eq!(assess_risk(&c), RiskLevel::Medium);
}

#[test]
fn test_indemnification_tags_medium() {
    let c = clause(
        "Indemnification",
        "Each party shall indemnify the other against third-party claims.",
    );
    assert_eq!(assess_risk(&c), RiskLevel::Medium);
}

#[test]
fn test_confidentiality_tags_low() {
    let c = clause(
        "Confidentiality",
        "The Recipient agrees to maintain confidentiality of all proprietary information.",
    );
    assert_eq!(assess_risk(&c), RiskLevel::Low);
}

#[test]
fn test_unmatched_clause_defaults_to_low() {
    let c = clause("Service Scope", "Provider shall deliver professional services.");
    assert_eq!(assess_risk(&c), RiskLevel::Low);
}

#[test]
fn test_risk_tagging_is_deterministic() {
    let c = clause(
        "Notices",
        "A termination notice must be sent by certified mail.",
    );
    assert_eq!(assess_risk(&c), assess_risk(&c));
}

use redline_core::types::StoredClause;
use redline_services::analysis::{AnalyzeRequest, ChatRequest, PdfRequest};
use redline_services::extraction::ExtractRequest;
use redline_services::playbooks::{ClausesByIdsRequest, SavePlaybookRequest};

#[test]
fn test_analyze_request_carries_review_defaults() {
    let v = serde_json::to_value(AnalyzeRequest::for_url("https://files/contract.pdf")).unwrap();
    assert_eq!(v["url"], "https://files/contract.pdf");
    assert_eq!(v["raw_text"], "");
    assert_eq!(v["top_k"], 2);
    assert_eq!(v["use_llm_contradiction_check"], true);
}

#[test]
fn test_chat_request_uses_snake_case_session_id() {
    let v = serde_json::to_value(ChatRequest {
        message: "what about the cap?".into(),
        session_id: "session_1".into(),
    })
    .unwrap();
    assert_eq!(v["message"], "what about the cap?");
    assert!(v.get("session_id").is_some());
    assert!(v.get("sessionId").is_none());
}

#[test]
fn test_pdf_request_field_name() {
    let v = serde_json::to_value(PdfRequest {
        pdf_url: "https://files/a.pdf".into(),
    })
    .unwrap();
    assert_eq!(v["pdf_url"], "https://files/a.pdf");
}

#[test]
fn test_extract_request_field_name() {
    let v = serde_json::to_value(ExtractRequest {
        pdf_url: "https://files/b.pdf".into(),
    })
    .unwrap();
    assert_eq!(v["pdf_url"], "https://files/b.pdf");
}

#[test]
fn test_save_playbook_request_keeps_vector_ids() {
    let v = serde_json::to_value(SavePlaybookRequest {
        name: "standard NDA".into(),
        clauses: vec![StoredClause {
            vector_id: "vec-1".into(),
            clause_type: "Confidentiality".into(),
            clause_text: "Keep it secret.".into(),
        }],
    })
    .unwrap();
    assert_eq!(v["name"], "standard NDA");
    assert_eq!(v["clauses"][0]["vector_id"], "vec-1");
    assert_eq!(v["clauses"][0]["clause_type"], "Confidentiality");
}

#[test]
fn test_clauses_by_ids_request_field_name() {
    let v = serde_json::to_value(ClausesByIdsRequest {
        clause_ids: vec!["vec-1".into(), "vec-2".into()],
    })
    .unwrap();
    assert_eq!(v["clause_ids"][0], "vec-1");
    assert_eq!(v["clause_ids"][1], "vec-2");
}

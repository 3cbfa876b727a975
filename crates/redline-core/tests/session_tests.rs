use redline_core::session::SessionStore;
use redline_core::types::ChatRole;

#[tokio::test]
async fn test_first_message_creates_session() {
    let store = SessionStore::new(24);
    let id = store.ensure(None).await;
    assert!(id.starts_with("session_"));
    assert_eq!(store.active_count().await, 1);
    assert!(store.history(&id).await.is_some());
}

#[tokio::test]
async fn test_existing_session_is_reused() {
    let store = SessionStore::new(24);
    let id = store.ensure(None).await;
    let again = store.ensure(Some(id.as_str())).await;
    assert_eq!(id, again);
    assert_eq!(store.active_count().await, 1);
}

#[tokio::test]
async fn test_minted_ids_are_distinct() {
    let store = SessionStore::new(24);
    let a = store.ensure(None).await;
    let b = store.ensure(None).await;
    assert_ne!(a, b);
    assert_eq!(store.active_count().await, 2);
}

#[tokio::test]
async fn test_caller_supplied_id_is_adopted() {
    let store = SessionStore::new(24);
    let id = store.ensure(Some("session_123_abcdefghi")).await;
    assert_eq!(id, "session_123_abcdefghi");
    assert_eq!(store.active_count().await, 1);
}

#[tokio::test]
async fn test_turns_append_in_order() {
    let store = SessionStore::new(24);
    let id = store.ensure(None).await;
    store
        .append(&id, ChatRole::User, "what about liability?")
        .await;
    store
        .append(&id, ChatRole::Assistant, "the cap looks aggressive")
        .await;
    let turns = store.history(&id).await.unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, ChatRole::User);
    assert_eq!(turns[0].content, "what about liability?");
    assert_eq!(turns[1].role, ChatRole::Assistant);
    assert_eq!(turns[1].content, "the cap looks aggressive");
}

#[tokio::test]
async fn test_reset_destroys_session() {
    let store = SessionStore::new(24);
    let id = store.ensure(None).await;
    assert!(store.reset(&id).await);
    assert!(!store.reset(&id).await);
    assert!(store.history(&id).await.is_none());
    assert_eq!(store.active_count().await, 0);
}

#[tokio::test]
async fn test_append_to_unknown_session_is_ignored() {
    let store = SessionStore::new(24);
    store.append("session_gone", ChatRole::User, "hello").await;
    assert_eq!(store.active_count().await, 0);
}

#[tokio::test]
async fn test_sweep_removes_stale_sessions() {
    // Max age zero: anything created before the sweep is stale.
    let store = SessionStore::new(0);
    let _id = store.ensure(None).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    assert_eq!(store.sweep_expired().await, 1);
    assert_eq!(store.active_count().await, 0);
}

#[tokio::test]
async fn test_sweep_keeps_fresh_sessions() {
    let store = SessionStore::new(24);
    let id = store.ensure(None).await;
    assert_eq!(store.sweep_expired().await, 0);
    assert_eq!(store.active_count().await, 1);
    assert!(store.history(&id).await.is_some());
}

//! Unit tests for MessageRepository.
//!
//! Covers save/get_message_by_id, id assignment and the MessageStore impl.

use courier_core::{NewMessage, Page};

use crate::message_repo::MessageRepository;
use crate::repository::MessageStore;

fn new_message(sender: &str, recipient: &str, body: &str) -> NewMessage {
    NewMessage::from_parts(
        Some(sender.to_string()),
        Some(recipient.to_string()),
        Some(body.to_string()),
    )
    .expect("valid message")
}

#[tokio::test]
async fn test_save_assigns_increasing_ids() {
    let repo = MessageRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let first = repo
        .save(&new_message("alice", "bob", "hi"))
        .await
        .expect("Failed to save message");
    let second = repo
        .save(&new_message("alice", "bob", "again"))
        .await
        .expect("Failed to save message");

    assert_eq!(first, 1);
    assert_eq!(second, 2);
}

#[tokio::test]
async fn test_get_message_by_id_existing() {
    let repo = MessageRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let id = repo
        .save(&new_message("alice", "bob", "Hello World"))
        .await
        .expect("Failed to save message");

    let message = repo
        .get_message_by_id(id)
        .await
        .expect("Failed to get message")
        .expect("message should exist");

    assert_eq!(message.id, id);
    assert_eq!(message.sender, "alice");
    assert_eq!(message.recipient, "bob");
    assert_eq!(message.message, "Hello World");
}

#[tokio::test]
async fn test_get_message_by_id_not_found() {
    let repo = MessageRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let retrieved = repo.get_message_by_id(42).await.expect("Failed to query");

    assert!(retrieved.is_none());
}

#[tokio::test]
async fn test_message_store_impl_delegates() {
    let repo = MessageRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");
    let store: &dyn MessageStore = &repo;

    let id = store
        .insert(&new_message("alice", "bob", "hi"))
        .await
        .expect("insert");
    let inbox = store.inbox("bob", Page::ALL).await.expect("inbox");
    let recipients = store.recipients_of("alice").await.expect("recipients");

    assert_eq!(id, 1);
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].sender, "alice");
    assert_eq!(inbox[0].body, "hi");
    assert_eq!(recipients, vec!["bob".to_string()]);
    assert_eq!(repo.count().await.expect("count"), 1);
}

#[tokio::test]
async fn test_sender_is_case_sensitive() {
    let repo = MessageRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    repo.save(&new_message("Alice", "bob", "upper"))
        .await
        .expect("Failed to save message");

    let recipients = repo.get_recipients("alice").await.expect("recipients");
    let inbox = repo.get_inbox("Bob", Page::ALL).await.expect("inbox");

    assert!(recipients.is_empty());
    assert!(inbox.is_empty());
}

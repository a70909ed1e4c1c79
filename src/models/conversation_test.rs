use super::*;
use crate::models::Message;

#[test]
fn test_new_conversation_starts_with_placeholder_title() {
    let conversation = Conversation::new("alice", "subject-1");
    assert_eq!(conversation.title(), "New Conversation");
    assert!(conversation.has_placeholder_title());
    assert!(conversation.is_empty());
}

#[test]
fn test_set_title_clears_placeholder() {
    let mut conversation = Conversation::new("alice", "subject-1");
    conversation.set_title("How do loops work?");
    assert!(!conversation.has_placeholder_title());
    assert_eq!(conversation.title(), "How do loops work?");
}

#[test]
fn test_append_message_keeps_timestamp_order() {
    let now = chrono::Utc::now();
    let mut conversation = Conversation::new("alice", "subject-1");

    conversation.append_message(
        Message::new_assistant("second").with_created_at(now + chrono::Duration::seconds(1)),
    );
    conversation.append_message(Message::new_user("first").with_created_at(now));

    let contents = conversation
        .messages()
        .iter()
        .map(|m| m.content())
        .collect::<Vec<_>>();
    assert_eq!(contents, vec!["first", "second"]);
}

#[test]
fn test_with_messages_sorts_ascending() {
    let now = chrono::Utc::now();
    let conversation = Conversation::new("alice", "subject-1").with_messages(vec![
        Message::new_user("c").with_created_at(now + chrono::Duration::seconds(2)),
        Message::new_user("a").with_created_at(now),
        Message::new_assistant("b").with_created_at(now + chrono::Duration::seconds(1)),
    ]);

    let contents = conversation
        .messages()
        .iter()
        .map(|m| m.content())
        .collect::<Vec<_>>();
    assert_eq!(contents, vec!["a", "b", "c"]);
    assert_eq!(conversation.last_message().unwrap().content(), "c");
}

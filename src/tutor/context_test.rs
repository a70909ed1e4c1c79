use super::*;
use crate::models::Message;

fn entry(role: &str, content: &str) -> HistoryEntry {
    HistoryEntry {
        role: Some(role.to_string()),
        content: Some(content.to_string()),
    }
}

#[test]
fn test_conversation_context_prepends_system_prompt() {
    let history = vec![
        Message::new_user("What is a loop?"),
        Message::new_assistant("What happens when you repeat a step?"),
        Message::new_user("It runs again?"),
    ];

    let context = build_conversation_context("Guide, never answer.", &history);
    assert_eq!(context.len(), 4);
    assert_eq!(context[0], ChatMessage::system("Guide, never answer."));
    assert_eq!(context[1], ChatMessage::user("What is a loop?"));
    assert_eq!(
        context[2],
        ChatMessage::assistant("What happens when you repeat a step?")
    );
    assert_eq!(context[3], ChatMessage::user("It runs again?"));
}

#[test]
fn test_conversation_context_empty_history() {
    let context = build_conversation_context("prompt", &[]);
    assert_eq!(context, vec![ChatMessage::system("prompt")]);
}

#[test]
fn test_inquiry_context_window() {
    let history: Vec<_> = (0..8)
        .map(|i| entry("user", &format!("message {}", i)))
        .collect();

    let context = build_inquiry_context("prompt", &history, "latest");
    // system + trailing 5 + new message
    assert_eq!(context.len(), 7);
    assert_eq!(context[1], ChatMessage::user("message 3"));
    assert_eq!(context[5], ChatMessage::user("message 7"));
    assert_eq!(context[6], ChatMessage::user("latest"));
}

#[test]
fn test_inquiry_context_drops_malformed_entries() {
    let history = vec![
        entry("user", "kept"),
        HistoryEntry {
            role: None,
            content: Some("no role".to_string()),
        },
        HistoryEntry {
            role: Some("assistant".to_string()),
            content: None,
        },
    ];

    let context = build_inquiry_context("prompt", &history, "latest");
    assert_eq!(
        context,
        vec![
            ChatMessage::system("prompt"),
            ChatMessage::user("kept"),
            ChatMessage::user("latest"),
        ]
    );
}

use super::*;
use crate::models::{Conversation, Message, Subject};

async fn setup_storage() -> Sqlite {
    Sqlite::new(None).await.expect("Failed to open database")
}

async fn insert_subject(db: &Sqlite) -> Subject {
    let subject = Subject::new("Physics")
        .with_description("Introductory Mechanics")
        .with_system_prompt("You are a Socratic physics tutor.");
    db.insert_subject(&subject)
        .await
        .expect("Failed to insert subject");
    subject
}

#[tokio::test]
async fn test_create_and_get_conversation() {
    let db = setup_storage().await;
    let subject = insert_subject(&db).await;

    let expected = Conversation::new("alice", subject.id()).with_id("convo-1");
    db.create_conversation(&expected)
        .await
        .expect("Failed to create conversation");

    let actual = db
        .get_conversation("alice", "convo-1")
        .await
        .expect("Failed to get conversation")
        .expect("Conversation not found");

    assert_eq!(actual.id(), "convo-1");
    assert_eq!(actual.user_id(), "alice");
    assert_eq!(actual.subject_id(), subject.id());
    assert_eq!(actual.title(), "New Conversation");
    assert_eq!(
        actual.created_at().timestamp_millis(),
        expected.created_at().timestamp_millis()
    );
    assert!(actual.is_empty());
}

#[tokio::test]
async fn test_get_conversation_is_scoped_to_user() {
    let db = setup_storage().await;
    let subject = insert_subject(&db).await;

    let conversation = Conversation::new("alice", subject.id()).with_id("convo-1");
    db.create_conversation(&conversation).await.unwrap();

    let other = db
        .get_conversation("bob", "convo-1")
        .await
        .expect("Failed to get conversation");
    assert!(other.is_none());
}

#[tokio::test]
async fn test_append_message_keeps_order() {
    let db = setup_storage().await;
    let subject = insert_subject(&db).await;

    let conversation = Conversation::new("alice", subject.id()).with_id("convo-1");
    db.create_conversation(&conversation).await.unwrap();

    let now = chrono::Utc::now();
    db.append_message(
        "convo-1",
        &Message::new_user("What is inertia?").with_created_at(now),
    )
    .await
    .unwrap();
    db.append_message(
        "convo-1",
        &Message::new_assistant("What happens when you push a heavy cart?")
            .with_created_at(now + chrono::Duration::milliseconds(1)),
    )
    .await
    .unwrap();

    let actual = db
        .get_conversation("alice", "convo-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(actual.len(), 2);
    assert_eq!(actual.messages()[0].content(), "What is inertia?");
    assert!(!actual.messages()[0].is_assistant());
    assert!(actual.messages()[1].is_assistant());
}

#[tokio::test]
async fn test_set_title() {
    let db = setup_storage().await;
    let subject = insert_subject(&db).await;

    let conversation = Conversation::new("alice", subject.id()).with_id("convo-1");
    db.create_conversation(&conversation).await.unwrap();

    db.set_title("convo-1", "What is inertia?").await.unwrap();

    let actual = db
        .get_conversation("alice", "convo-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(actual.title(), "What is inertia?");
}

#[tokio::test]
async fn test_delete_conversation_cascades_messages() {
    let db = setup_storage().await;
    let subject = insert_subject(&db).await;

    let conversation = Conversation::new("alice", subject.id()).with_id("convo-1");
    db.create_conversation(&conversation).await.unwrap();
    db.append_message("convo-1", &Message::new_user("hello"))
        .await
        .unwrap();

    let deleted = db.delete_conversation("alice", "convo-1").await.unwrap();
    assert!(deleted);

    let messages = db.get_messages("convo-1").await.unwrap();
    assert!(messages.is_empty());

    // Deleting again reports nothing matched
    let deleted = db.delete_conversation("alice", "convo-1").await.unwrap();
    assert!(!deleted);
}

#[tokio::test]
async fn test_get_conversations_newest_first() {
    let db = setup_storage().await;
    let subject = insert_subject(&db).await;

    let now = chrono::Utc::now();
    for (id, offset) in [("convo-1", 0), ("convo-2", 1), ("convo-3", 2)] {
        let conversation = Conversation::new("alice", subject.id())
            .with_id(id)
            .with_created_at(now + chrono::Duration::seconds(offset));
        db.create_conversation(&conversation).await.unwrap();
    }
    // Another user's conversation must not leak in
    db.create_conversation(&Conversation::new("bob", subject.id()).with_id("convo-4"))
        .await
        .unwrap();

    let conversations = db.get_conversations("alice").await.unwrap();
    let ids = conversations.iter().map(|c| c.id()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["convo-3", "convo-2", "convo-1"]);
}

#[tokio::test]
async fn test_find_subject_by_name_is_case_insensitive() {
    let db = setup_storage().await;
    let subject = insert_subject(&db).await;

    let found = db
        .find_subject_by_name("physics")
        .await
        .expect("Failed to find subject")
        .expect("Subject not found");
    assert_eq!(found.id(), subject.id());
    assert_eq!(found.system_prompt(), subject.system_prompt());

    let missing = db.find_subject_by_name("astronomy").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_find_subject_by_name_treats_wildcards_literally() {
    let db = setup_storage().await;
    insert_subject(&db).await;

    assert!(db.find_subject_by_name("%").await.unwrap().is_none());
    assert!(db.find_subject_by_name("_").await.unwrap().is_none());
    assert!(db.find_subject_by_name("Ph_sics").await.unwrap().is_none());

    // Plain containment still works
    assert!(db.find_subject_by_name("Phys").await.unwrap().is_some());
}

#[tokio::test]
async fn test_insert_subject_ignores_duplicate_name() {
    let db = setup_storage().await;
    let subject = insert_subject(&db).await;

    let duplicate = Subject::new("Physics").with_system_prompt("another prompt");
    db.insert_subject(&duplicate).await.unwrap();

    let subjects = db.list_subjects().await.unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].id(), subject.id());
}

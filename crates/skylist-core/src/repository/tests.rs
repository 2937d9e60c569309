//! Repository Integration Tests
//!
//! Tests for TodoRepository and the session initializer with in-memory
//! libsql databases.

use std::path::PathBuf;

use crate::config::StoreConfig;
use crate::repository::{CollectionScope, TodoRepository, TodoStore};
use crate::session::{sign_in, Backend};

async fn setup() -> TodoRepository {
    let config = StoreConfig::new(PathBuf::from(":memory:"));
    let backend = Backend::initialize(&config)
        .await
        .expect("Failed to init test backend");
    let identity = sign_in(&backend.connection(), &config)
        .await
        .expect("Failed to sign in");
    TodoRepository::new(
        backend.connection(),
        CollectionScope::new(config.app_id, identity.user_id),
    )
}

#[tokio::test]
async fn test_add_trims_and_defaults_incomplete() {
    let repo = setup().await;

    let created = repo
        .add("  Buy milk  ")
        .await
        .expect("add failed")
        .expect("non-blank text should create a todo");

    assert_eq!(created.text, "Buy milk");
    assert!(!created.completed);
    assert!(!created.id.is_empty());

    let todos = repo.list().await.expect("list failed");
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0], created);
}

#[tokio::test]
async fn test_add_blank_is_a_noop() {
    let repo = setup().await;

    assert!(repo.add("").await.expect("add failed").is_none());
    assert!(repo.add("   ").await.expect("add failed").is_none());
    assert!(repo.list().await.expect("list failed").is_empty());
}

#[tokio::test]
async fn test_toggle_is_involutive() {
    let repo = setup().await;
    let todo = repo.add("Walk dog").await.unwrap().unwrap();

    let toggled = repo.toggle(&todo.id, todo.completed).await.expect("toggle");
    assert!(toggled.completed);

    let back = repo
        .toggle(&toggled.id, toggled.completed)
        .await
        .expect("toggle back");
    assert!(!back.completed);

    let todos = repo.list().await.unwrap();
    assert!(!todos[0].completed);
}

#[tokio::test]
async fn test_toggle_missing_is_not_found() {
    let repo = setup().await;
    let result = repo.toggle("no-such-id", false).await;
    assert!(matches!(
        result,
        Err(crate::domain::StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_rename_updates_text() {
    let repo = setup().await;
    let todo = repo.add("Buy milk").await.unwrap().unwrap();

    let wrote = repo
        .rename(&todo.id, " Buy oat milk ", &todo.text)
        .await
        .expect("rename");
    assert!(wrote);

    let found = repo.find(&todo.id).await.unwrap().unwrap();
    assert_eq!(found.text, "Buy oat milk");
    // Creation timestamp is immutable
    assert_eq!(found.timestamp, todo.timestamp);
}

#[tokio::test]
async fn test_rename_unchanged_is_a_noop() {
    let repo = setup().await;
    let todo = repo.add("Same").await.unwrap().unwrap();

    let wrote = repo.rename(&todo.id, "Same", "Same").await.expect("rename");
    assert!(!wrote);
}

#[tokio::test]
async fn test_rename_blank_is_a_noop() {
    let repo = setup().await;
    let todo = repo.add("Keep me").await.unwrap().unwrap();

    let wrote = repo.rename(&todo.id, "   ", "Keep me").await.expect("rename");
    assert!(!wrote);

    let found = repo.find(&todo.id).await.unwrap().unwrap();
    assert_eq!(found.text, "Keep me");
}

#[tokio::test]
async fn test_delete_removes_one_todo() {
    let repo = setup().await;
    let keep = repo.add("Keep").await.unwrap().unwrap();
    let gone = repo.add("Remove").await.unwrap().unwrap();

    repo.delete(&gone.id).await.expect("delete");
    // Deleting again is harmless
    repo.delete(&gone.id).await.expect("repeat delete");

    let todos = repo.list().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, keep.id);
}

#[tokio::test]
async fn test_clear_completed_with_none_completed() {
    let repo = setup().await;
    repo.add("Open task").await.unwrap();

    let removed = repo.clear_completed().await.expect("clear");
    assert_eq!(removed, 0);
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_clear_completed_removes_exactly_the_completed() {
    let repo = setup().await;
    let a = repo.add("a").await.unwrap().unwrap();
    let b = repo.add("b").await.unwrap().unwrap();
    let c = repo.add("c").await.unwrap().unwrap();
    repo.add("d").await.unwrap();

    repo.toggle(&a.id, false).await.unwrap();
    repo.toggle(&c.id, false).await.unwrap();

    let removed = repo.clear_completed().await.expect("clear");
    assert_eq!(removed, 2);

    let remaining = repo.list().await.unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|t| !t.completed));
    assert!(remaining.iter().any(|t| t.id == b.id));
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let repo = setup().await;
    repo.add("first").await.unwrap();
    repo.add("second").await.unwrap();
    repo.add("third").await.unwrap();

    let todos = repo.list().await.unwrap();
    let texts: Vec<&str> = todos.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["third", "second", "first"]);
    assert!(todos.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[tokio::test]
async fn test_order_survives_mutations() {
    let repo = setup().await;
    let a = repo.add("a").await.unwrap().unwrap();
    let b = repo.add("b").await.unwrap().unwrap();
    repo.add("c").await.unwrap();

    repo.toggle(&a.id, false).await.unwrap();
    repo.rename(&b.id, "b renamed", "b").await.unwrap();
    repo.delete(&a.id).await.unwrap();
    repo.add("d").await.unwrap();

    let todos = repo.list().await.unwrap();
    let texts: Vec<&str> = todos.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["d", "c", "b renamed"]);
}

/// The end-to-end scenario: add, toggle, add, clear completed
#[tokio::test]
async fn test_add_toggle_clear_scenario() {
    let repo = setup().await;

    let milk = repo.add("Buy milk").await.unwrap().unwrap();
    let todos = repo.list().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].text, "Buy milk");
    assert!(!todos[0].completed);

    repo.toggle(&milk.id, false).await.unwrap();
    let todos = repo.list().await.unwrap();
    assert_eq!(todos.iter().filter(|t| t.completed).count(), 1);

    repo.add("Walk dog").await.unwrap();
    let todos = repo.list().await.unwrap();
    assert_eq!(todos.len(), 2);
    assert_eq!(todos[0].text, "Walk dog");

    let removed = repo.clear_completed().await.unwrap();
    assert_eq!(removed, 1);
    let todos = repo.list().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].text, "Walk dog");
}

#[tokio::test]
async fn test_snapshot_feed_follows_mutations() {
    let repo = setup().await;
    let mut stream = repo.subscribe();
    assert!(stream.current().expect("initial snapshot").is_empty());

    repo.add("Buy milk").await.unwrap();
    let snapshot = stream.next().await.expect("feed alive").expect("ok");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].text, "Buy milk");

    repo.clear_completed().await.unwrap();
    repo.add("Walk dog").await.unwrap();
    let snapshot = stream.current().expect("ok");
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].text, "Walk dog");

    stream.cancel();
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_toggle_read_failure_is_a_write_error() {
    let config = StoreConfig::new(PathBuf::from(":memory:"));
    let backend = Backend::initialize(&config).await.unwrap();
    let repo = TodoRepository::new(
        backend.connection(),
        CollectionScope::new(config.app_id.clone(), "user-1"),
    );
    let todo = repo.add("task").await.unwrap().unwrap();

    backend
        .connection()
        .execute("DROP TABLE todos", ())
        .await
        .unwrap();

    // The lookup fails, but the user asked for a write
    let result = repo.toggle(&todo.id, false).await;
    assert!(matches!(result, Err(crate::domain::StoreError::Write(_))));
}

#[tokio::test]
async fn test_list_rejects_a_corrupt_timestamp() {
    let config = StoreConfig::new(PathBuf::from(":memory:"));
    let backend = Backend::initialize(&config).await.unwrap();
    let repo = TodoRepository::new(
        backend.connection(),
        CollectionScope::new(config.app_id.clone(), "user-1"),
    );

    backend
        .connection()
        .execute(
            "INSERT INTO todos (id, app_id, user_id, text, completed, timestamp)
             VALUES ('bad', ?, 'user-1', 'task', 0, 'not-a-number')",
            libsql::params![config.app_id.clone()],
        )
        .await
        .unwrap();

    let result = repo.list().await;
    assert!(matches!(result, Err(crate::domain::StoreError::Listen(_))));
}

#[tokio::test]
async fn test_collections_are_isolated_per_user() {
    let config = StoreConfig::new(PathBuf::from(":memory:"));
    let backend = Backend::initialize(&config).await.unwrap();

    let alice = TodoRepository::new(
        backend.connection(),
        CollectionScope::new(config.app_id.clone(), "user-alice"),
    );
    let bob = TodoRepository::new(
        backend.connection(),
        CollectionScope::new(config.app_id.clone(), "user-bob"),
    );

    alice.add("Alice's task").await.unwrap();
    assert_eq!(alice.list().await.unwrap().len(), 1);
    assert!(bob.list().await.unwrap().is_empty());

    // Bulk clear in one scope never touches the other
    let done = alice.list().await.unwrap();
    alice.toggle(&done[0].id, false).await.unwrap();
    bob.add("Bob's task").await.unwrap();
    alice.clear_completed().await.unwrap();
    assert_eq!(bob.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_sign_in_reuses_persisted_identity() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = StoreConfig::new(dir.path().join("skylist.db"));

    let first = {
        let backend = Backend::initialize(&config).await.unwrap();
        sign_in(&backend.connection(), &config).await.unwrap()
    };
    assert!(first.anonymous);

    let backend = Backend::initialize(&config).await.unwrap();
    let second = sign_in(&backend.connection(), &config).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_document_path_convention() {
    let scope = CollectionScope::new("default-app-id", "user-1");
    assert_eq!(
        scope.collection_path(),
        "artifacts/default-app-id/users/user-1/todos"
    );
    assert_eq!(
        scope.document_path("abc"),
        "artifacts/default-app-id/users/user-1/todos/abc"
    );
}

//! Store behavior against real SQLite databases.
//!
//! # Design
//! Most cases use a private in-memory database so they stay independent;
//! the file-backed case checks that data survives reopening the path.

use todo_core::{NewTodo, StoreError, TodoPatch, TodoReplace, TodoStore};

async fn store() -> TodoStore {
    TodoStore::in_memory().await.unwrap()
}

/// Let the millisecond timestamp move past the previous write.
fn tick() {
    std::thread::sleep(std::time::Duration::from_millis(10));
}

fn new_todo(title: &str) -> NewTodo {
    NewTodo {
        title: title.to_string(),
        ..NewTodo::default()
    }
}

// --- insert ---

#[tokio::test]
async fn insert_applies_defaults() {
    let store = store().await;
    let todo = store.insert(new_todo("Buy milk")).await.unwrap();

    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.description, "");
    assert!(!todo.completed);
    assert!(todo.updated_at.is_some());
}

#[tokio::test]
async fn insert_ids_strictly_increase() {
    let store = store().await;
    let mut last = 0;
    for i in 0..5 {
        let todo = store.insert(new_todo(&format!("todo {i}"))).await.unwrap();
        assert!(todo.id > last, "id {} not greater than {last}", todo.id);
        last = todo.id;
    }
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let store = store().await;
    let first = store.insert(new_todo("first")).await.unwrap();
    let second = store.insert(new_todo("second")).await.unwrap();
    assert!(store.delete(second.id).await.unwrap());

    let third = store.insert(new_todo("third")).await.unwrap();
    assert!(third.id > second.id);
    assert!(third.id > first.id);
}

#[tokio::test]
async fn insert_accepts_empty_title() {
    let store = store().await;
    let todo = store.insert(new_todo("")).await.unwrap();
    assert_eq!(todo.title, "");
}

// --- get / list ---

#[tokio::test]
async fn get_round_trips_completed_as_bool() {
    let store = store().await;
    let created = store
        .insert(NewTodo {
            title: "A".to_string(),
            description: String::new(),
            completed: true,
        })
        .await
        .unwrap();

    let fetched = store.get(created.id).await.unwrap().unwrap();
    assert!(fetched.completed);
    assert_eq!(fetched.description, "");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_missing_returns_none() {
    let store = store().await;
    assert!(store.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn list_is_newest_first() {
    let store = store().await;
    for title in ["one", "two", "three"] {
        store.insert(new_todo(title)).await.unwrap();
    }

    let todos = store.list().await.unwrap();
    assert_eq!(todos.len(), 3);
    let titles: Vec<&str> = todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["three", "two", "one"]);
    assert!(todos.windows(2).all(|w| w[0].id > w[1].id));
}

// --- replace ---

#[tokio::test]
async fn replace_overwrites_every_mutable_field() {
    let store = store().await;
    let created = store
        .insert(NewTodo {
            title: "old".to_string(),
            description: "old description".to_string(),
            completed: false,
        })
        .await
        .unwrap();

    tick();
    let replaced = store
        .replace(
            created.id,
            TodoReplace {
                title: "new".to_string(),
                description: String::new(),
                completed: true,
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.title, "new");
    assert_eq!(replaced.description, "");
    assert!(replaced.completed);
    assert_eq!(replaced.created_at, created.created_at);
    assert!(replaced.updated_at.is_some());
    assert_ne!(replaced.updated_at, created.updated_at);
}

#[tokio::test]
async fn replace_missing_returns_none() {
    let store = store().await;
    let result = store.replace(9, TodoReplace::default()).await.unwrap();
    assert!(result.is_none());
}

// --- patch ---

#[tokio::test]
async fn patch_changes_only_supplied_fields() {
    let store = store().await;
    let created = store
        .insert(NewTodo {
            title: "keep".to_string(),
            description: "before".to_string(),
            completed: true,
        })
        .await
        .unwrap();

    tick();
    let patched = store
        .patch(
            created.id,
            TodoPatch {
                description: Some("after".to_string()),
                ..TodoPatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(patched.title, "keep");
    assert_eq!(patched.description, "after");
    assert!(patched.completed);
    assert_eq!(patched.created_at, created.created_at);
    assert!(patched.updated_at.is_some());
    assert_ne!(patched.updated_at, created.updated_at);
}

#[tokio::test]
async fn patch_can_clear_completed() {
    let store = store().await;
    let created = store
        .insert(NewTodo {
            title: "done".to_string(),
            description: String::new(),
            completed: true,
        })
        .await
        .unwrap();

    let patched = store
        .patch(
            created.id,
            TodoPatch {
                completed: Some(false),
                ..TodoPatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(!patched.completed);
    assert!(!store.get(created.id).await.unwrap().unwrap().completed);
}

#[tokio::test]
async fn patch_missing_returns_none() {
    let store = store().await;
    let patch = TodoPatch {
        title: Some("x".to_string()),
        ..TodoPatch::default()
    };
    assert!(store.patch(3, patch).await.unwrap().is_none());
}

#[tokio::test]
async fn empty_patch_is_an_error_even_for_existing_rows() {
    let store = store().await;
    let created = store.insert(new_todo("x")).await.unwrap();
    let err = store.patch(created.id, TodoPatch::default()).await.unwrap_err();
    assert!(matches!(err, StoreError::EmptyPatch));
}

// --- delete ---

#[tokio::test]
async fn delete_reports_whether_row_existed() {
    let store = store().await;
    let created = store.insert(new_todo("bye")).await.unwrap();

    assert!(store.delete(created.id).await.unwrap());
    assert!(!store.delete(created.id).await.unwrap());
    assert!(store.get(created.id).await.unwrap().is_none());
}

// --- file-backed ---

#[tokio::test]
async fn file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.db");

    let store = TodoStore::open(&path).await.unwrap();
    let created = store.insert(new_todo("durable")).await.unwrap();
    store.close().await;

    let reopened = TodoStore::open(&path).await.unwrap();
    let fetched = reopened.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.title, "durable");
    reopened.close().await;
}

#[tokio::test]
async fn open_fails_when_directory_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("todos.db");

    let err = TodoStore::open(&path).await.unwrap_err();
    assert!(matches!(err, StoreError::Database(_)));
}

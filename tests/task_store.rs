use chrono::NaiveDate;
use std::collections::HashSet;
use taskboard::models::{NewTask, Priority, Status, TaskPatch};
use taskboard::store::{MemoryStorage, SqliteStorage, Storage, TaskStore, TASKS_KEY};
use tempfile::TempDir;

fn empty_store() -> TaskStore<MemoryStorage> {
    TaskStore::open(MemoryStorage::new()).expect("open store")
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn open_without_saved_data_is_empty() {
    let store = empty_store();
    assert!(store.is_empty());
}

#[test]
fn open_with_corrupt_data_is_empty() {
    for payload in ["{not json", "{\"tasks\": 3}", "[{\"title\": 5}]", "42"] {
        let store = TaskStore::open(MemoryStorage::with_entry(TASKS_KEY, payload)).unwrap();
        assert!(store.is_empty(), "payload {payload:?} should load empty");
    }
}

#[test]
fn add_appends_todo_task_with_defaults() {
    let mut store = empty_store();
    let task = store.add(NewTask::titled("Write report")).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(task.status, Status::Todo);
    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(task.description, "");
    assert_eq!(task.due_date, None);
    assert_eq!(store.tasks()[0], task);
}

#[test]
fn add_keeps_supplied_fields_and_insertion_order() {
    let mut store = empty_store();
    let first = store.add(NewTask::titled("first")).unwrap();
    let second = store
        .add(NewTask {
            title: "second".into(),
            description: "details".into(),
            priority: Priority::High,
            due_date: Some(date("2030-01-15")),
        })
        .unwrap();

    assert_eq!(second.priority, Priority::High);
    assert_eq!(second.due_date, Some(date("2030-01-15")));
    let ids: Vec<_> = store.tasks().iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[test]
fn ids_are_unique() {
    let mut store = empty_store();
    for i in 0..50 {
        store.add(NewTask::titled(format!("task {i}"))).unwrap();
    }
    let ids: HashSet<_> = store.tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids.len(), 50);
}

#[test]
fn every_mutation_is_persisted() {
    let mut store = empty_store();
    let task = store.add(NewTask::titled("persist me")).unwrap();
    let saved = store.storage().get(TASKS_KEY).unwrap().unwrap();
    assert!(saved.contains("persist me"));

    store.set_status(&task.id, Status::InProgress).unwrap();
    let saved = store.storage().get(TASKS_KEY).unwrap().unwrap();
    assert!(saved.contains("\"in-progress\""));

    store.remove(&task.id).unwrap();
    assert_eq!(store.storage().get(TASKS_KEY).unwrap().unwrap(), "[]");
}

#[test]
fn persisted_layout_uses_camel_case_fields() {
    let mut store = empty_store();
    store
        .add(NewTask {
            title: "Pay rent".into(),
            due_date: Some(date("2030-02-01")),
            ..NewTask::default()
        })
        .unwrap();

    let raw = store.storage().get(TASKS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let task = &value[0];
    assert_eq!(task["title"], "Pay rent");
    assert_eq!(task["dueDate"], "2030-02-01");
    assert_eq!(task["status"], "todo");
    assert_eq!(task["priority"], "medium");
    assert!(task["createdAt"].as_str().unwrap().contains('T'));
}

#[test]
fn update_merges_patch_in_place() {
    let mut store = empty_store();
    let task = store.add(NewTask::titled("old title")).unwrap();

    let changed = store
        .update(
            &task.id,
            TaskPatch {
                title: Some("new title".into()),
                priority: Some(Priority::Low),
                ..TaskPatch::default()
            },
        )
        .unwrap();

    assert!(changed);
    let updated = store.get(&task.id).unwrap();
    assert_eq!(updated.title, "new title");
    assert_eq!(updated.priority, Priority::Low);
    assert_eq!(updated.status, Status::Todo);
    assert_eq!(updated.created_at, task.created_at);
}

#[test]
fn update_can_clear_due_date() {
    let mut store = empty_store();
    let task = store
        .add(NewTask {
            title: "deadline".into(),
            due_date: Some(date("2030-03-03")),
            ..NewTask::default()
        })
        .unwrap();

    store
        .update(
            &task.id,
            TaskPatch {
                due_date: Some(None),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    assert_eq!(store.get(&task.id).unwrap().due_date, None);
}

#[test]
fn unknown_id_is_a_silent_noop() {
    let mut store = empty_store();
    store.add(NewTask::titled("keep")).unwrap();
    let before = store.storage().get(TASKS_KEY).unwrap();

    assert!(!store.update("missing", TaskPatch::status(Status::Completed)).unwrap());
    assert!(!store.remove("missing").unwrap());
    assert!(!store.toggle_status("missing").unwrap());
    assert!(!store.set_status("missing", Status::InProgress).unwrap());

    assert_eq!(store.len(), 1);
    assert_eq!(store.storage().get(TASKS_KEY).unwrap(), before);
}

#[test]
fn toggle_flips_between_completed_and_todo() {
    let mut store = empty_store();
    let task = store.add(NewTask::titled("toggle me")).unwrap();

    store.update(&task.id, TaskPatch::status(Status::Completed)).unwrap();
    store.toggle_status(&task.id).unwrap();
    assert_eq!(store.get(&task.id).unwrap().status, Status::Todo);
    store.toggle_status(&task.id).unwrap();
    assert_eq!(store.get(&task.id).unwrap().status, Status::Completed);
}

#[test]
fn toggle_in_progress_completes() {
    let mut store = empty_store();
    let task = store.add(NewTask::titled("halfway")).unwrap();
    store.set_status(&task.id, Status::InProgress).unwrap();
    store.toggle_status(&task.id).unwrap();
    assert_eq!(store.get(&task.id).unwrap().status, Status::Completed);
}

#[test]
fn remove_deletes_only_matching_task() {
    let mut store = empty_store();
    let a = store.add(NewTask::titled("a")).unwrap();
    let b = store.add(NewTask::titled("b")).unwrap();

    assert!(store.remove(&a.id).unwrap());
    assert_eq!(store.len(), 1);
    assert_eq!(store.tasks()[0].id, b.id);
}

#[test]
fn resolve_by_exact_id_and_unique_prefix() {
    let mut store = empty_store();
    let task = store.add(NewTask::titled("find me")).unwrap();

    assert_eq!(store.resolve(&task.id).unwrap().unwrap().id, task.id);
    let prefix = task.id[..20].to_ascii_lowercase();
    assert_eq!(store.resolve(&prefix).unwrap().unwrap().id, task.id);
    assert!(store.resolve("ZZZZZZZZ").unwrap().is_none());
    assert!(store.resolve("").unwrap().is_none());
}

#[test]
fn resolve_ambiguous_prefix_is_an_error() {
    let payload = serde_json::json!([
        {"id": "AB1", "title": "one", "status": "todo", "createdAt": "2024-01-01T00:00:00Z"},
        {"id": "AB2", "title": "two", "status": "todo", "createdAt": "2024-01-01T00:00:00Z"}
    ])
    .to_string();
    let store = TaskStore::open(MemoryStorage::with_entry(TASKS_KEY, &payload)).unwrap();

    let err = store.resolve("AB").unwrap_err();
    assert_eq!(err.code.as_str(), "AMBIGUOUS_REF");
    assert_eq!(store.resolve("AB2").unwrap().unwrap().title, "two");
}

#[test]
fn legacy_payload_with_blank_due_date_and_missing_description_loads() {
    let payload = r#"[{"id":"1","title":"Buy milk","priority":"low","dueDate":"","status":"todo","createdAt":"2024-05-01T10:00:00.000Z"}]"#;
    let store = TaskStore::open(MemoryStorage::with_entry(TASKS_KEY, payload)).unwrap();

    assert_eq!(store.len(), 1);
    let task = &store.tasks()[0];
    assert_eq!(task.due_date, None);
    assert_eq!(task.description, "");
    assert_eq!(task.priority, Priority::Low);
}

#[test]
fn round_trip_through_sqlite_preserves_collection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("board.db");

    let original = {
        let mut store = TaskStore::open(SqliteStorage::open(&path).unwrap()).unwrap();
        store.add(NewTask::titled("plain")).unwrap();
        let due = store
            .add(NewTask {
                title: "with due".into(),
                description: "has a deadline".into(),
                priority: Priority::High,
                due_date: Some(date("2031-12-31")),
            })
            .unwrap();
        store.set_status(&due.id, Status::InProgress).unwrap();
        store.tasks().to_vec()
    };

    let reopened = TaskStore::open(SqliteStorage::open(&path).unwrap()).unwrap();
    assert_eq!(reopened.tasks(), original.as_slice());

    let mut again = reopened;
    again.persist().unwrap();
    let third = TaskStore::open(SqliteStorage::open(&path).unwrap()).unwrap();
    assert_eq!(third.tasks(), original.as_slice());
}

#[test]
fn sqlite_storage_overwrites_value() {
    let mut storage = SqliteStorage::in_memory().unwrap();
    assert_eq!(storage.get("k").unwrap(), None);
    storage.set("k", "one").unwrap();
    storage.set("k", "two").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
}

#[test]
fn numeric_ids_from_original_dashboard_survive_add() {
    let payload = r#"[{"id":1700000000000,"title":"Buy milk","description":"","priority":"low","dueDate":"","createdAt":"2023-11-14T22:13:20.000Z","status":"todo"}]"#;
    let mut store = TaskStore::open(MemoryStorage::with_entry(TASKS_KEY, payload)).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.tasks()[0].id, "1700000000000");
    assert_eq!(store.tasks()[0].title, "Buy milk");

    store.add(NewTask::titled("new")).unwrap();
    let saved = store.storage().get(TASKS_KEY).unwrap().unwrap();
    assert!(saved.contains("Buy milk"));
    assert!(saved.contains("\"1700000000000\""));

    let reopened = TaskStore::open(store.storage().clone()).unwrap();
    assert_eq!(reopened.len(), 2);
    assert!(reopened.get("1700000000000").is_some());
}

/// Storage that reads from an inner map but refuses every write.
#[derive(Debug, Default)]
struct ReadOnlyStorage {
    inner: MemoryStorage,
}

impl Storage for ReadOnlyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, taskboard::error::TaskboardError> {
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), taskboard::error::TaskboardError> {
        Err(taskboard::error::TaskboardError::database("disk is read-only"))
    }
}

#[test]
fn failed_write_leaves_collection_untouched() {
    let payload = serde_json::json!([
        {"id": "A1", "title": "kept", "status": "todo", "createdAt": "2024-01-01T00:00:00Z"}
    ])
    .to_string();
    let mut store = TaskStore::open(ReadOnlyStorage {
        inner: MemoryStorage::with_entry(TASKS_KEY, &payload),
    })
    .unwrap();
    let before = store.tasks().to_vec();

    assert!(store.add(NewTask::titled("lost")).is_err());
    assert!(store.update("A1", TaskPatch::status(Status::Completed)).is_err());
    assert!(store.toggle_status("A1").is_err());
    assert!(store.remove("A1").is_err());

    assert_eq!(store.tasks(), before.as_slice());
    assert_eq!(store.get("A1").unwrap().status, Status::Todo);
}

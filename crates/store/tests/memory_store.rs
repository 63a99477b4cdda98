//! Behavioral tests for the in-memory store: CRUD, the owner-uid rule,
//! the project delete cascade, drawing soft-delete, and summary overwrite.
//!
//! These run against [`MemoryStore`]; the Postgres implementation is
//! expected to satisfy the same contract.

use assert_matches::assert_matches;
use chrono::Utc;
use serde_json::json;

use taskdeck_core::entities::{
    CreateDrawing, CreateNote, CreateProject, CreateTask, CreateTaskNote, NewProjectFile, NewUser,
    TaskStatus, UpdateProject,
};
use taskdeck_core::error::CoreError;
use taskdeck_core::types::EntityId;
use taskdeck_store::{EntityStore, MemoryStore, StoreError};

fn new_project_input(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: "test project".to_string(),
        start_date: Utc::now(),
        end_date: Utc::now(),
        image_url: None,
    }
}

async fn signup(store: &MemoryStore, email: &str) -> EntityId {
    store
        .create_user(NewUser {
            name: "Tester".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap()
        .uid
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let store = MemoryStore::new();
    signup(&store, "a@example.com").await;

    let result = store
        .create_user(NewUser {
            name: "Other".to_string(),
            email: "a@example.com".to_string(),
            password_hash: "hash".to_string(),
        })
        .await;

    assert_matches!(result, Err(StoreError::Core(CoreError::Conflict(_))));
}

// ---------------------------------------------------------------------------
// Project CRUD and ownership
// ---------------------------------------------------------------------------

#[tokio::test]
async fn owner_can_round_trip_a_project() {
    let store = MemoryStore::new();
    let owner = signup(&store, "owner@example.com").await;

    let project = store
        .create_project(owner, new_project_input("Atlas"))
        .await
        .unwrap();
    assert_eq!(project.owner_uid, owner);
    assert!(!project.is_public);

    let fetched = store.get_project(Some(owner), project.id).await.unwrap();
    assert_eq!(fetched.name, "Atlas");

    let updated = store
        .update_project(
            owner,
            project.id,
            UpdateProject {
                name: Some("Atlas v2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Atlas v2");
    assert_eq!(updated.description, "test project");
}

#[tokio::test]
async fn non_owner_mutations_fail_and_change_nothing() {
    let store = MemoryStore::new();
    let owner = signup(&store, "owner@example.com").await;
    let intruder = signup(&store, "intruder@example.com").await;

    let project = store
        .create_project(owner, new_project_input("Private"))
        .await
        .unwrap();
    let task = store
        .create_task(
            owner,
            CreateTask {
                project_id: project.id,
                title: "secret".to_string(),
                description: String::new(),
                status: None,
            },
        )
        .await
        .unwrap();

    // Every mutating operation under the project must be denied.
    let denied = store
        .create_task(
            intruder,
            CreateTask {
                project_id: project.id,
                title: "sabotage".to_string(),
                description: String::new(),
                status: None,
            },
        )
        .await;
    assert_matches!(denied, Err(StoreError::Core(CoreError::PermissionDenied)));

    let denied = store
        .set_task_status(intruder, task.id, TaskStatus::Done)
        .await;
    assert_matches!(denied, Err(StoreError::Core(CoreError::PermissionDenied)));

    let denied = store
        .create_note(
            intruder,
            CreateNote {
                project_id: project.id,
                content: "spam".to_string(),
            },
        )
        .await;
    assert_matches!(denied, Err(StoreError::Core(CoreError::PermissionDenied)));

    let denied = store.delete_project(intruder, project.id).await;
    assert_matches!(denied, Err(StoreError::Core(CoreError::PermissionDenied)));

    // Reads of a private project are denied too.
    let denied = store.get_project(Some(intruder), project.id).await;
    assert_matches!(denied, Err(StoreError::Core(CoreError::PermissionDenied)));

    // State is unchanged: one task, still ToDo, no notes.
    let tasks = store.list_tasks(Some(owner), project.id).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].status, TaskStatus::ToDo);
    assert!(store
        .list_notes(Some(owner), project.id)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Cascade delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deleting_a_project_cascades_to_all_children() {
    let store = MemoryStore::new();
    let owner = signup(&store, "owner@example.com").await;

    let project = store
        .create_project(owner, new_project_input("Doomed"))
        .await
        .unwrap();
    let task = store
        .create_task(
            owner,
            CreateTask {
                project_id: project.id,
                title: "t1".to_string(),
                description: String::new(),
                status: None,
            },
        )
        .await
        .unwrap();
    store
        .create_task_note(
            owner,
            CreateTaskNote {
                task_id: task.id,
                content: "tn1".to_string(),
            },
        )
        .await
        .unwrap();
    store
        .create_note(
            owner,
            CreateNote {
                project_id: project.id,
                content: "n1".to_string(),
            },
        )
        .await
        .unwrap();
    let file = store
        .create_file(
            owner,
            NewProjectFile {
                project_id: project.id,
                name: "report.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                size_bytes: 3,
                url: "memory://blobs/report.pdf".to_string(),
                storage_path: "report.pdf".to_string(),
            },
        )
        .await
        .unwrap();

    // An unrelated project must survive the cascade untouched.
    let other = store
        .create_project(owner, new_project_input("Survivor"))
        .await
        .unwrap();

    let removed_files = store.delete_project(owner, project.id).await.unwrap();
    assert_eq!(removed_files.len(), 1);
    assert_eq!(removed_files[0].id, file.id);

    // The parent and every child are gone.
    let missing = store.get_project(Some(owner), project.id).await;
    assert_matches!(missing, Err(StoreError::Core(CoreError::NotFound { .. })));
    let missing = store.list_tasks(Some(owner), project.id).await;
    assert_matches!(missing, Err(StoreError::Core(CoreError::NotFound { .. })));
    let missing = store.list_task_notes(Some(owner), task.id).await;
    assert_matches!(missing, Err(StoreError::Core(CoreError::NotFound { .. })));

    let survivors = store.list_projects(owner).await.unwrap();
    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].id, other.id);
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn share_id_grants_public_read_access() {
    let store = MemoryStore::new();
    let owner = signup(&store, "owner@example.com").await;
    let project = store
        .create_project(owner, new_project_input("Shared"))
        .await
        .unwrap();

    // Unknown share ids resolve to nothing.
    let missing = store.find_project_by_share_id("nope").await;
    assert_matches!(missing, Err(StoreError::Core(CoreError::NotFound { .. })));

    let shared = store.enable_sharing(owner, project.id).await.unwrap();
    let share_id = shared.share_id.clone().unwrap();
    assert!(shared.is_public);

    // Enabling again keeps the same share id.
    let again = store.enable_sharing(owner, project.id).await.unwrap();
    assert_eq!(again.share_id.as_deref(), Some(share_id.as_str()));

    let found = store.find_project_by_share_id(&share_id).await.unwrap();
    assert_eq!(found.id, project.id);

    // Anonymous readers can now list the project's children.
    store.list_tasks(None, project.id).await.unwrap();
    store.list_notes(None, project.id).await.unwrap();
    store.list_files(None, project.id).await.unwrap();
}

// ---------------------------------------------------------------------------
// Drawings (soft delete)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn soft_deleted_drawings_stay_fetchable_but_unlisted() {
    let store = MemoryStore::new();
    let user = signup(&store, "artist@example.com").await;

    let drawing = store
        .create_drawing(
            user,
            CreateDrawing {
                name: "sketch".to_string(),
                records: json!({ "shapes": [] }),
            },
        )
        .await
        .unwrap();

    store
        .update_drawing(user, drawing.id, json!({ "shapes": [1] }))
        .await
        .unwrap();
    store.delete_drawing(user, drawing.id).await.unwrap();

    // Soft delete: gone from listings, still present in storage.
    assert!(store.list_drawings(user).await.unwrap().is_empty());
    let fetched = store.get_drawing(user, drawing.id).await.unwrap();
    assert!(fetched.deleted);
    assert_eq!(fetched.records, json!({ "shapes": [1] }));
}

#[tokio::test]
async fn drawings_are_private_to_their_owner() {
    let store = MemoryStore::new();
    let artist = signup(&store, "artist@example.com").await;
    let other = signup(&store, "other@example.com").await;

    let drawing = store
        .create_drawing(
            artist,
            CreateDrawing {
                name: "sketch".to_string(),
                records: json!({}),
            },
        )
        .await
        .unwrap();

    let denied = store.get_drawing(other, drawing.id).await;
    assert_matches!(denied, Err(StoreError::Core(CoreError::PermissionDenied)));
    let denied = store.update_drawing(other, drawing.id, json!({})).await;
    assert_matches!(denied, Err(StoreError::Core(CoreError::PermissionDenied)));
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn summary_is_overwritten_per_user() {
    let store = MemoryStore::new();
    let user = signup(&store, "user@example.com").await;

    assert!(store.get_summary(user).await.unwrap().is_none());

    store
        .upsert_summary(user, "first pass".to_string())
        .await
        .unwrap();
    store
        .upsert_summary(user, "second pass".to_string())
        .await
        .unwrap();

    let summary = store.get_summary(user).await.unwrap().unwrap();
    assert_eq!(summary.summary, "second pass");
}

// ---------------------------------------------------------------------------
// File metadata
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deleting_a_file_returns_its_record() {
    let store = MemoryStore::new();
    let owner = signup(&store, "owner@example.com").await;
    let project = store
        .create_project(owner, new_project_input("Files"))
        .await
        .unwrap();

    let file = store
        .create_file(
            owner,
            NewProjectFile {
                project_id: project.id,
                name: "notes.md".to_string(),
                content_type: "text/markdown".to_string(),
                size_bytes: 10,
                url: "memory://blobs/notes.md".to_string(),
                storage_path: "notes.md".to_string(),
            },
        )
        .await
        .unwrap();

    let removed = store.delete_file(owner, file.id).await.unwrap();
    assert_eq!(removed.url, "memory://blobs/notes.md");
    assert!(store
        .list_files(Some(owner), project.id)
        .await
        .unwrap()
        .is_empty());
}

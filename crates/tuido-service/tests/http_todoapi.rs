//! HTTP client integration tests against the in-memory todoapi fixture.

use tuido_core::todo::{CreateTodo, Draft, Todo};
use tuido_service::test_helpers::{spawn_test_server, spawn_test_server_silent_delete};
use tuido_service::{BlockingHttpService, HttpService, ServiceError, TodoService};

fn create(title: &str) -> CreateTodo {
    CreateTodo {
        id: None,
        title: title.into(),
        description: String::new(),
        completed: false,
    }
}

// ---- async client ----

#[tokio::test]
async fn list_starts_empty() {
    let server = spawn_test_server().await;
    let svc = HttpService::new(&server.base_url);
    assert!(svc.list_todos().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_then_list_and_get() {
    let server = spawn_test_server().await;
    let svc = HttpService::new(&server.base_url);

    svc.add_todo(&create("buy milk")).await.unwrap();
    let all = svc.list_todos().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "buy milk");
    // Server assigned an id
    assert!(!all[0].id.is_empty());

    let fetched = svc.get_todo(&all[0].id).await.unwrap();
    assert_eq!(fetched.id, all[0].id);
}

#[tokio::test]
async fn add_with_user_supplied_id() {
    let server = spawn_test_server().await;
    let svc = HttpService::new(&server.base_url);

    svc.add_todo(&CreateTodo {
        id: Some("42".into()),
        title: "with id".into(),
        description: "d".into(),
        completed: true,
    })
    .await
    .unwrap();

    let fetched = svc.get_todo("42").await.unwrap();
    assert_eq!(fetched.title, "with id");
    assert!(fetched.completed);
}

#[tokio::test]
async fn get_missing_maps_to_not_found() {
    let server = spawn_test_server().await;
    let svc = HttpService::new(&server.base_url);

    let err = svc.get_todo("999").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn add_empty_title_maps_to_invalid_input() {
    let server = spawn_test_server().await;
    let svc = HttpService::new(&server.base_url);

    let err = svc.add_todo(&create("   ")).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn update_replaces_all_fields() {
    let server = spawn_test_server().await;
    let svc = HttpService::new(&server.base_url);

    svc.add_todo(&create("before")).await.unwrap();
    let todo = svc.list_todos().await.unwrap().into_iter().next().unwrap();

    svc.update_todo(&Todo {
        id: todo.id.clone(),
        title: "after".into(),
        description: "now described".into(),
        completed: true,
    })
    .await
    .unwrap();

    let fetched = svc.get_todo(&todo.id).await.unwrap();
    assert_eq!(fetched.title, "after");
    assert_eq!(fetched.description, "now described");
    assert!(fetched.completed);
}

#[tokio::test]
async fn update_missing_maps_to_not_found() {
    let server = spawn_test_server().await;
    let svc = HttpService::new(&server.base_url);

    let err = svc
        .update_todo(&Todo {
            id: "777".into(),
            title: "ghost".into(),
            description: String::new(),
            completed: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn delete_returns_server_message() {
    let server = spawn_test_server().await;
    let svc = HttpService::new(&server.base_url);

    svc.add_todo(&create("doomed")).await.unwrap();
    let todo = svc.list_todos().await.unwrap().into_iter().next().unwrap();

    let msg = svc.delete_todo(&todo.id).await.unwrap();
    assert!(msg.contains(&todo.id));
    assert!(svc.list_todos().await.unwrap().is_empty());
}

#[tokio::test]
async fn silent_delete_returns_empty_body() {
    let server = spawn_test_server_silent_delete().await;
    let svc = HttpService::new(&server.base_url);

    svc.add_todo(&create("quiet")).await.unwrap();
    let todo = svc.list_todos().await.unwrap().into_iter().next().unwrap();

    let msg = svc.delete_todo(&todo.id).await.unwrap();
    assert!(msg.is_empty());
    assert!(svc.list_todos().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_missing_maps_to_not_found() {
    let server = spawn_test_server().await;
    let svc = HttpService::new(&server.base_url);

    let err = svc.delete_todo("404").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_trimmed() {
    let server = spawn_test_server().await;
    let svc = HttpService::new(&format!("{}/", server.base_url));
    assert!(svc.list_todos().await.unwrap().is_empty());
}

#[tokio::test]
async fn draft_roundtrip_through_backend() {
    let server = spawn_test_server().await;
    let svc = HttpService::new(&server.base_url);

    let draft = Draft {
        id: String::new(),
        title: "from draft".into(),
        description: "typed in the form".into(),
        completed: false,
    };
    svc.add_todo(&draft.to_create()).await.unwrap();

    let todo = svc.list_todos().await.unwrap().into_iter().next().unwrap();
    let edited = Draft::from_todo(&todo);
    assert_eq!(edited.title, "from draft");
    assert_eq!(edited.description, "typed in the form");
}

// ---- blocking wrapper ----

/// Spawn the fixture on a background thread (BlockingHttpService creates
/// its own tokio runtime and cannot be nested inside another).
fn spawn_blocking_server() -> String {
    let (tx, rx) = std::sync::mpsc::sync_channel(1);
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let server = spawn_test_server().await;
            tx.send(server.base_url.clone()).unwrap();
            // Keep the server alive for the duration of the test
            std::future::pending::<()>().await;
        });
    });
    rx.recv().unwrap()
}

#[test]
fn blocking_crud_roundtrip() {
    let url = spawn_blocking_server();
    let svc = BlockingHttpService::new(&url);

    svc.add_todo(&create("blocking")).unwrap();
    let all = svc.list_todos().unwrap();
    assert_eq!(all.len(), 1);

    let mut todo = all.into_iter().next().unwrap();
    todo.completed = true;
    svc.update_todo(&todo).unwrap();
    assert!(svc.get_todo(&todo.id).unwrap().completed);

    let msg = svc.delete_todo(&todo.id).unwrap();
    assert!(!msg.is_empty());
    assert!(svc.list_todos().unwrap().is_empty());
}

#[test]
fn blocking_get_missing_is_not_found() {
    let url = spawn_blocking_server();
    let svc = BlockingHttpService::new(&url);
    let err = svc.get_todo("nope").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

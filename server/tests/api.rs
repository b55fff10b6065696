use std::{collections::HashSet, sync::Arc};

use axum::{
    http::{self, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use todo_server::{app, config::Settings, error::ErrorBody, store::TodoStore, Todo};
use tower::ServiceExt;

fn test_app() -> (Router, TodoStore) {
    let store = TodoStore::new();
    let router = app(store.clone(), Arc::new(Settings::default()));
    (router, store)
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn create(app: &Router, body: &str) -> Todo {
    let resp = send(app, json_request("POST", "/api/todos/", body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let (app, _) = test_app();
    let resp = send(&app, empty_request("GET", "/api/todos/")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn list_todos_returns_all_created() {
    let (app, _) = test_app();
    for title in ["Todo 1", "Todo 2", "Todo 3"] {
        create(&app, &format!(r#"{{"title":"{title}"}}"#)).await;
    }

    let resp = send(&app, empty_request("GET", "/api/todos/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    let titles: HashSet<String> = todos.into_iter().map(|t| t.title).collect();
    assert_eq!(
        titles,
        HashSet::from(["Todo 1", "Todo 2", "Todo 3"].map(String::from))
    );
}

#[tokio::test]
async fn collection_without_trailing_slash() {
    let (app, _) = test_app();
    let resp = send(&app, json_request("POST", "/api/todos", r#"{"title":"x"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = send(&app, empty_request("GET", "/api/todos")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201_with_defaults() {
    let (app, store) = test_app();
    let todo = create(&app, r#"{"title":"Test Todo"}"#).await;

    assert!(!todo.id.is_empty());
    assert_eq!(todo.title, "Test Todo");
    assert_eq!(todo.description, "");
    assert!(!todo.done);
    assert_eq!(store.get(&todo.id).await.unwrap(), todo);
}

#[tokio::test]
async fn create_todo_with_all_fields() {
    let (app, _) = test_app();
    let todo = create(
        &app,
        r#"{"title":"Test Todo","description":"Test description","done":true}"#,
    )
    .await;

    assert_eq!(todo.title, "Test Todo");
    assert_eq!(todo.description, "Test description");
    assert!(todo.done);
}

#[tokio::test]
async fn create_todo_ignores_client_id() {
    let (app, _) = test_app();
    let todo = create(&app, r#"{"id":"mine","title":"t"}"#).await;
    assert_ne!(todo.id, "mine");
}

#[tokio::test]
async fn create_todo_missing_title_returns_422() {
    let (app, store) = test_app();
    let resp = send(&app, json_request("POST", "/api/todos/", r#"{"not_title":1}"#)).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorBody = body_json(resp).await;
    assert!(body.detail.contains("title"), "{}", body.detail);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_todo_malformed_json_returns_422() {
    let (app, _) = test_app();
    let resp = send(&app, json_request("POST", "/api/todos/", "{not json")).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorBody = body_json(resp).await;
    assert!(!body.detail.is_empty());
}

#[tokio::test]
async fn create_todo_without_content_type_returns_422() {
    let (app, _) = test_app();
    let resp = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/todos/")
            .body(r#"{"title":"x"}"#.to_string())
            .unwrap(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_todo_empty_title_returns_422() {
    let (app, store) = test_app();
    let resp = send(&app, json_request("POST", "/api/todos/", r#"{"title":""}"#)).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorBody = body_json(resp).await;
    assert!(body.detail.starts_with("title"), "{}", body.detail);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_todo_long_fields_return_422() {
    let (app, store) = test_app();

    let long_title = serde_json::json!({ "title": "t".repeat(101) }).to_string();
    let resp = send(&app, json_request("POST", "/api/todos/", &long_title)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let long_description =
        serde_json::json!({ "title": "t", "description": "d".repeat(1001) }).to_string();
    let resp = send(&app, json_request("POST", "/api/todos/", &long_description)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_todo_at_length_limits_succeeds() {
    let (app, _) = test_app();
    let body =
        serde_json::json!({ "title": "t".repeat(100), "description": "d".repeat(1000) }).to_string();
    let todo = create(&app, &body).await;
    assert_eq!(todo.title.len(), 100);
    assert_eq!(todo.description.len(), 1000);
}

// --- get ---

#[tokio::test]
async fn get_todo_returns_created_record() {
    let (app, _) = test_app();
    let created = create(
        &app,
        r#"{"title":"Get Me","description":"This todo will be retrieved"}"#,
    )
    .await;

    let resp = send(&app, empty_request("GET", &format!("/api/todos/{}", created.id))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Todo = body_json(resp).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_todo_not_found() {
    let (app, _) = test_app();
    let resp = send(&app, empty_request("GET", "/api/todos/nonexistent-id")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(
        body,
        serde_json::json!({ "detail": "Todo with ID nonexistent-id not found" })
    );
}

// --- update ---

#[tokio::test]
async fn update_todo_replaces_fields() {
    let (app, _) = test_app();
    let created = create(
        &app,
        r#"{"title":"Original Title","description":"Original description"}"#,
    )
    .await;

    let resp = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/todos/{}", created.id),
            r#"{"title":"Updated Title","description":"Updated description","done":true}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Updated Title");
    assert_eq!(updated.description, "Updated description");
    assert!(updated.done);

    let resp = send(&app, empty_request("GET", &format!("/api/todos/{}", created.id))).await;
    let fetched: Todo = body_json(resp).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_todo_omitted_fields_reset_to_defaults() {
    let (app, _) = test_app();
    let created = create(&app, r#"{"title":"t","description":"d","done":true}"#).await;

    let resp = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/todos/{}", created.id),
            r#"{"title":"only title"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.title, "only title");
    assert_eq!(updated.description, "");
    assert!(!updated.done);
}

#[tokio::test]
async fn update_todo_not_found() {
    let (app, store) = test_app();
    let resp = send(
        &app,
        json_request(
            "PUT",
            "/api/todos/nonexistent-id",
            r#"{"title":"Updated Title","description":"Updated description","done":true}"#,
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.detail, "Todo with ID nonexistent-id not found");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn update_todo_invalid_body_returns_422() {
    let (app, store) = test_app();
    let created = create(&app, r#"{"title":"keep me"}"#).await;

    let resp = send(
        &app,
        json_request("PUT", &format!("/api/todos/{}", created.id), r#"{"title":""}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(store.get(&created.id).await.unwrap(), created);
}

// --- delete ---

#[tokio::test]
async fn delete_todo_then_get_returns_404() {
    let (app, _) = test_app();
    let created = create(&app, r#"{"title":"Delete Me"}"#).await;
    let uri = format!("/api/todos/{}", created.id);

    let resp = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_todo_not_found() {
    let (app, _) = test_app();
    let resp = send(&app, empty_request("DELETE", "/api/todos/nonexistent-id")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.detail, "Todo with ID nonexistent-id not found");
}

// --- routing ---

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let (app, _) = test_app();
    let resp = send(&app, empty_request("GET", "/nowhere")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.detail, "Not Found");
}

#[tokio::test]
async fn routes_require_prefix() {
    let (app, _) = test_app();
    let resp = send(&app, empty_request("GET", "/todos/")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unsupported_method_returns_json_405() {
    let (app, _) = test_app();
    let resp = send(&app, empty_request("PATCH", "/api/todos/some-id")).await;

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.detail, "Method Not Allowed");
}

#[tokio::test]
async fn custom_prefix_and_openapi_metadata() {
    let settings = Settings::from_vars([
        ("API_PREFIX", "/v1/"),
        ("PROJECT_NAME", "Tasks"),
        ("VERSION", "3.1.4"),
    ])
    .unwrap();
    let app = app(TodoStore::new(), Arc::new(settings));

    let resp = send(&app, json_request("POST", "/v1/todos/", r#"{"title":"x"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = send(&app, empty_request("GET", "/v1/openapi.json")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc: serde_json::Value = body_json(resp).await;
    assert_eq!(doc["info"]["title"], "Tasks");
    assert_eq!(doc["info"]["version"], "3.1.4");
    assert!(doc["paths"]["/v1/todos/{id}"].is_object());
}

#[tokio::test]
async fn empty_prefix_mounts_at_root() {
    let settings = Settings::from_vars([("API_PREFIX", "")]).unwrap();
    let app = app(TodoStore::new(), Arc::new(settings));

    let resp = send(&app, empty_request("GET", "/todos/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn oversized_body_returns_413() {
    let (app, store) = test_app();
    let body = serde_json::json!({ "title": "t".repeat(3 * 1024 * 1024) }).to_string();
    let resp = send(&app, json_request("POST", "/api/todos/", &body)).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: ErrorBody = body_json(resp).await;
    assert!(!body.detail.is_empty());
    assert!(store.is_empty().await);
}

// --- docs ---

async fn html_page(app: &Router, uri: &str) -> String {
    let resp = send(app, empty_request("GET", uri)).await;
    assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    let content_type = resp
        .headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "{uri}: {content_type}");
    String::from_utf8(body_bytes(resp).await.to_vec()).unwrap()
}

#[tokio::test]
async fn swagger_ui_page_loads_openapi_document() {
    let (app, _) = test_app();
    let page = html_page(&app, "/docs").await;
    assert!(page.contains("/api/openapi.json"));
    assert!(page.contains("SwaggerUIBundle"));
    assert!(page.contains("<title>Todo API - Swagger UI</title>"));
}

#[tokio::test]
async fn redoc_page_loads_openapi_document() {
    let (app, _) = test_app();
    let page = html_page(&app, "/redoc").await;
    assert!(page.contains(r#"spec-url="/api/openapi.json""#));
    assert!(page.contains("redoc.standalone.js"));
}

#[tokio::test]
async fn docs_pages_follow_custom_prefix() {
    let settings = Settings::from_vars([("API_PREFIX", "/v1")]).unwrap();
    let app = app(TodoStore::new(), Arc::new(settings));

    assert!(html_page(&app, "/docs").await.contains("/v1/openapi.json"));
    assert!(html_page(&app, "/redoc").await.contains("/v1/openapi.json"));
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let (router, _) = test_app();
    let mut app = router.into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/todos/", r#"{"title":"Walk dog"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Todo = body_json(resp).await;
    let id = created.id.clone();

    // list
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/todos/"))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![created.clone()]);

    // update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/todos/{id}"),
            r#"{"title":"Walk cat","done":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.id, id);
    assert_eq!(updated.title, "Walk cat");
    assert!(updated.done);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/api/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // delete again — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/api/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete — empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/todos/"))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

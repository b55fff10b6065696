use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, FromRef, FromRequest, Path, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::docs;
use crate::error::{ErrorBody, TodoError};
use crate::models::{Todo, TodoInput};
use crate::store::TodoStore;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: TodoStore,
    pub settings: Arc<Settings>,
}

impl FromRef<AppState> for TodoStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<Settings> {
    fn from_ref(state: &AppState) -> Self {
        state.settings.clone()
    }
}

/// JSON body that has been deserialized into a [`TodoInput`] and passed its
/// length checks. A bad payload becomes a 422 before the handler runs; body
/// read failures such as an oversized body keep axum's status.
#[derive(Debug)]
pub struct ValidatedJson(pub TodoInput);

impl<S> FromRequest<S> for ValidatedJson
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(input) = Json::<TodoInput>::from_request(req, state)
            .await
            .map_err(reject_payload)?;
        input.validate().map_err(IntoResponse::into_response)?;
        Ok(Self(input))
    }
}

fn reject_payload(rejection: JsonRejection) -> Response {
    match rejection {
        JsonRejection::JsonDataError(_)
        | JsonRejection::JsonSyntaxError(_)
        | JsonRejection::MissingJsonContentType(_) => {
            TodoError::Validation(rejection.body_text()).into_response()
        }
        other => {
            tracing::debug!(status = %other.status(), "unreadable request body");
            (other.status(), Json(ErrorBody::new(other.body_text()))).into_response()
        }
    }
}

pub fn router(state: AppState) -> Router {
    let prefix = state.settings.api_prefix.clone();

    Router::new()
        .route(
            &format!("{prefix}/todos"),
            get(list_todos).post(create_todo),
        )
        .route(
            &format!("{prefix}/todos/"),
            get(list_todos).post(create_todo),
        )
        .route(
            &format!("{prefix}/todos/{{id}}"),
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route(&format!("{prefix}/openapi.json"), get(docs::openapi))
        .route("/docs", get(docs::swagger_ui))
        .route("/redoc", get(docs::redoc))
        // must follow the routes it applies to
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_todos(State(store): State<TodoStore>) -> Json<Vec<Todo>> {
    Json(store.list().await)
}

async fn create_todo(
    State(store): State<TodoStore>,
    ValidatedJson(input): ValidatedJson,
) -> (StatusCode, Json<Todo>) {
    let todo = store.create(input).await;
    (StatusCode::CREATED, Json(todo))
}

async fn get_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, TodoError> {
    store.get(&id).await.map(Json)
}

async fn update_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson,
) -> Result<Json<Todo>, TodoError> {
    store.update(&id, input).await.map(Json)
}

async fn delete_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, TodoError> {
    store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not Found")))
}

async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method Not Allowed")),
    )
}

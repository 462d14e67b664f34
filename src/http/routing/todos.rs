use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value};

use crate::application::todo_service::TodoService;
use crate::domain::todo::{NewTodo, Todo, TodoId, TodoPatch};
use crate::http::error::ApiError;
use crate::http::types::ApiResponse;

#[derive(Clone)]
pub struct AppState<S: TodoService> {
    pub service: S,
}

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos", post(create_todo::<S>).get(list_todos::<S>))
        .route(
            "/todos/:id",
            get(get_todo::<S>).put(update_todo::<S>).delete(delete_todo::<S>),
        )
        .with_state(state)
}

async fn list_todos<S: TodoService>(
    State(state): State<AppState<S>>,
) -> Result<Json<ApiResponse<Vec<Todo>>>, ApiError> {
    let todos = state
        .service
        .list()
        .await
        .map_err(|e| ApiError::store("Database error occurred", e))?;
    Ok(Json(ApiResponse::collection(todos)))
}

async fn get_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Todo>>, ApiError> {
    let id = todo_id(id)?;
    let todo = state
        .service
        .get(id)
        .await
        .map_err(|e| ApiError::store("Database error occurred", e))?
        .ok_or(ApiError::NotFound(id))?;
    Ok(Json(ApiResponse::record(todo)))
}

async fn create_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Todo>>), ApiError> {
    let fields = object_body(body)?;
    let input = parse_new_todo(&fields)?;
    let todo = state
        .service
        .create(input)
        .await
        .map_err(|e| ApiError::store("Failed to create todo", e))?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::record(todo).with_message("Todo created successfully")),
    ))
}

async fn update_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<Todo>>, ApiError> {
    let id = todo_id(id)?;
    // A missing target wins over body validation, so probe existence first.
    state
        .service
        .get(id)
        .await
        .map_err(|e| ApiError::store("Failed to update todo", e))?
        .ok_or(ApiError::NotFound(id))?;

    let fields = object_body(body)?;
    let patch = parse_patch(&fields)?;
    let todo = state
        .service
        .update(id, patch)
        .await
        .map_err(|e| ApiError::store("Failed to update todo", e))?
        .ok_or(ApiError::NotFound(id))?;
    Ok(Json(ApiResponse::record(todo).with_message("Todo updated successfully")))
}

async fn delete_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = todo_id(id)?;
    let deleted = state
        .service
        .delete(id)
        .await
        .map_err(|e| ApiError::store("Failed to delete todo", e))?;
    if !deleted {
        return Err(ApiError::NotFound(id));
    }
    Ok(Json(ApiResponse::message("Todo deleted successfully")))
}

/// Non-integer ids never matched a route in the source, so they surface
/// as the generic 404 page rather than a 400.
fn todo_id(id: Result<Path<i64>, PathRejection>) -> Result<TodoId, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::RouteNotFound)?;
    Ok(TodoId(id))
}

/// Unwraps the request body into a JSON object. A body that fails to
/// parse is a bare 400; any falsy parsed value is reported as "no data",
/// and a truthy non-object as invalid.
fn object_body(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, ApiError> {
    let Json(value) = body.map_err(|_| ApiError::BadRequest)?;
    if is_no_data(&value) {
        return Err(ApiError::NoData);
    }
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::InvalidBody),
    }
}

/// The source treated every falsy body as absent: null, false, zero, and
/// empty string/array/object alike.
fn is_no_data(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(m) => m.is_empty(),
    }
}

fn parse_new_todo(fields: &Map<String, Value>) -> Result<NewTodo, ApiError> {
    let title = match fields.get("title") {
        None | Some(Value::Null) => return Err(ApiError::TitleRequired),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(ApiError::TitleRequired);
            }
            trimmed.to_string()
        }
        Some(_) => return Err(ApiError::InvalidBody),
    };
    let description = match fields.get("description") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => return Err(ApiError::InvalidBody),
    };
    let completed = match fields.get("completed") {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => return Err(ApiError::CompletedNotBoolean),
    };
    Ok(NewTodo { title, description, completed })
}

fn parse_patch(fields: &Map<String, Value>) -> Result<TodoPatch, ApiError> {
    let mut patch = TodoPatch::default();
    match fields.get("title") {
        None => {}
        Some(Value::Null) => return Err(ApiError::TitleEmpty),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(ApiError::TitleEmpty);
            }
            patch.title = Some(trimmed.to_string());
        }
        Some(_) => return Err(ApiError::InvalidBody),
    }
    match fields.get("description") {
        None => {}
        Some(Value::Null) => patch.description = Some(String::new()),
        Some(Value::String(s)) => patch.description = Some(s.trim().to_string()),
        Some(_) => return Err(ApiError::InvalidBody),
    }
    match fields.get("completed") {
        None => {}
        Some(Value::Bool(b)) => patch.completed = Some(*b),
        Some(_) => return Err(ApiError::CompletedNotBoolean),
    }
    Ok(patch)
}

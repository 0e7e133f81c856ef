//! The five CRUD handlers, generic over the table they serve.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::info;

use crate::db::Entity;
use crate::middleware::Payload;
use crate::{CentroError, router::AppState};

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
}

/// Ids arrive as text; one that is not an integer cannot match a row.
fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// POST /{table}
pub async fn create<E: Entity>(
    State(state): State<AppState>,
    Payload(payload): Payload<E::Payload>,
) -> Result<Response, CentroError> {
    let id = state.storage::<E>().create(payload).await?;
    info!(table = E::TABLE, id, "row created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": E::CREATED, "id": id })),
    )
        .into_response())
}

/// GET /{table}
pub async fn list<E: Entity>(State(state): State<AppState>) -> Result<Json<Vec<E>>, CentroError> {
    Ok(Json(state.storage::<E>().list().await?))
}

/// GET /{table}/{id}
pub async fn get<E: Entity>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, CentroError> {
    let Some(id) = parse_id(&raw_id) else {
        return Ok(not_found(E::NOT_FOUND));
    };
    match state.storage::<E>().get(id).await? {
        Some(record) => Ok(Json(record).into_response()),
        None => Ok(not_found(E::NOT_FOUND)),
    }
}

/// PUT /{table}/{id}, full replacement.
pub async fn update<E: Entity>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Payload(payload): Payload<E::Payload>,
) -> Result<Response, CentroError> {
    let Some(id) = parse_id(&raw_id) else {
        return Ok(not_found(E::NOT_FOUND));
    };
    if state.storage::<E>().update(id, payload).await? == 0 {
        return Ok(not_found(E::NOT_FOUND));
    }
    info!(table = E::TABLE, id, "row updated");
    Ok(Json(json!({ "message": E::updated_message(id) })).into_response())
}

/// DELETE /{table}/{id}
pub async fn delete<E: Entity>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, CentroError> {
    let Some(id) = parse_id(&raw_id) else {
        return Ok(not_found(E::DELETE_NOT_FOUND));
    };
    if state.storage::<E>().delete(id).await? == 0 {
        return Ok(not_found(E::DELETE_NOT_FOUND));
    }
    info!(table = E::TABLE, id, "row deleted");
    Ok(Json(json!({ "message": E::deleted_message(id) })).into_response())
}

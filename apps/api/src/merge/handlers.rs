//! Axum route handlers for the mail-merge API.
//!
//! Thin layer over the session store and the engine: handlers resolve the
//! addressed session, apply a registry operation or run the engine, and map
//! "id absent" onto 404.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::merge::engine;
use crate::merge::export;
use crate::models::document::ResolvedDocument;
use crate::models::placeholder::{Placeholder, PlaceholderValue};
use crate::state::AppState;
use crate::store::Session;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub template: String,
    pub placeholders: Vec<Placeholder>,
    pub preview_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct TemplateUpdate {
    pub template: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ValueUpdate {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewCountResponse {
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub count: usize,
    pub documents: Vec<ResolvedDocument>,
}

fn session_response(session: Session) -> SessionResponse {
    let preview_count = engine::preview_count(&session.registry);
    SessionResponse {
        id: session.id,
        template: session.template,
        placeholders: session.registry.placeholders().to_vec(),
        preview_count,
        created_at: session.created_at,
        updated_at: session.updated_at,
    }
}

fn session_not_found(session_id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {session_id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.sessions.create();
    info!("Created session {}", session.id);
    Json(session_response(session))
}

/// GET /api/v1/sessions/:sid
///
/// Full session snapshot: template, placeholders, and the preview count the
/// collaborator uses to enable its generate button.
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(session_response(session)))
}

/// DELETE /api/v1/sessions/:sid
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(session_id) {
        return Err(session_not_found(session_id));
    }
    info!("Deleted session {session_id}");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:sid/template
///
/// Replaces the template text wholesale. No validation here; an empty
/// template only fails at generate time.
pub async fn handle_set_template(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<TemplateUpdate>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .with_session(session_id, |session| session.template = req.template)
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Registry mutation
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:sid/placeholders
pub async fn handle_add_placeholder(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Placeholder>, AppError> {
    let placeholder = state
        .sessions
        .with_session(session_id, |session| session.registry.add_placeholder())
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(placeholder))
}

/// PATCH /api/v1/sessions/:sid/placeholders/:pid
pub async fn handle_rename_placeholder(
    State(state): State<AppState>,
    Path((session_id, placeholder_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<RenameRequest>,
) -> Result<StatusCode, AppError> {
    let renamed = state
        .sessions
        .with_session(session_id, |session| {
            session.registry.rename_placeholder(placeholder_id, &req.name)
        })
        .ok_or_else(|| session_not_found(session_id))?;
    if !renamed {
        return Err(AppError::NotFound(format!(
            "Placeholder {placeholder_id} not found"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/sessions/:sid/placeholders/:pid
pub async fn handle_remove_placeholder(
    State(state): State<AppState>,
    Path((session_id, placeholder_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let removed = state
        .sessions
        .with_session(session_id, |session| {
            session.registry.remove_placeholder(placeholder_id)
        })
        .ok_or_else(|| session_not_found(session_id))?;
    if !removed {
        return Err(AppError::NotFound(format!(
            "Placeholder {placeholder_id} not found"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:sid/placeholders/:pid/values
pub async fn handle_add_value(
    State(state): State<AppState>,
    Path((session_id, placeholder_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<PlaceholderValue>, AppError> {
    let value = state
        .sessions
        .with_session(session_id, |session| session.registry.add_value(placeholder_id))
        .ok_or_else(|| session_not_found(session_id))?
        .ok_or_else(|| {
            AppError::NotFound(format!("Placeholder {placeholder_id} not found"))
        })?;
    Ok(Json(value))
}

/// PATCH /api/v1/sessions/:sid/placeholders/:pid/values/:vid
pub async fn handle_update_value(
    State(state): State<AppState>,
    Path((session_id, placeholder_id, value_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(req): Json<ValueUpdate>,
) -> Result<StatusCode, AppError> {
    let updated = state
        .sessions
        .with_session(session_id, |session| {
            session.registry.update_value(placeholder_id, value_id, &req.text)
        })
        .ok_or_else(|| session_not_found(session_id))?;
    if !updated {
        return Err(AppError::NotFound(format!("Value {value_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/sessions/:sid/placeholders/:pid/values/:vid
pub async fn handle_remove_value(
    State(state): State<AppState>,
    Path((session_id, placeholder_id, value_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let removed = state
        .sessions
        .with_session(session_id, |session| {
            session.registry.remove_value(placeholder_id, value_id)
        })
        .ok_or_else(|| session_not_found(session_id))?;
    if !removed {
        return Err(AppError::NotFound(format!("Value {value_id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Merge
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:sid/preview-count
///
/// How many documents generate would produce right now. Always succeeds for
/// a known session; 0 is a valid answer.
pub async fn handle_preview_count(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<PreviewCountResponse>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(PreviewCountResponse {
        count: engine::preview_count(&session.registry),
    }))
}

/// POST /api/v1/sessions/:sid/generate
///
/// Runs the merge over the session's template and registry and returns the
/// full batch, index-ordered.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<GenerateResponse>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .ok_or_else(|| session_not_found(session_id))?;

    let documents = engine::generate(&session.template, &session.registry)?;
    info!("Session {session_id}: generated {} documents", documents.len());

    Ok(Json(GenerateResponse {
        count: documents.len(),
        documents,
    }))
}

/// GET /api/v1/sessions/:sid/export
///
/// Generates the batch and streams it as the text/plain download blob.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .ok_or_else(|| session_not_found(session_id))?;

    let documents = engine::generate(&session.template, &session.registry)?;
    let blob = export::render(&documents);
    info!("Session {session_id}: exported {} documents", documents.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export::EXPORT_FILENAME),
            ),
        ],
        blob,
    ))
}

//! Note API Endpoints
//! Mission: CRUD and search over the caller's own notes

use crate::{
    app::AppState,
    auth::models::Claims,
    error::ApiError,
    notes::models::{
        AddNoteRequest, MessageResponse, NotePatch, NoteResponse, NotesResponse, SearchParams,
        UpdatePinRequest,
    },
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;

/// Add note - POST /notes/add-note
pub async fn add_note(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AddNoteRequest>,
) -> Result<Json<NoteResponse>, ApiError> {
    let owner = owner_id(&claims)?;

    let title = match payload.title {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err(ApiError::Validation("Title is required")),
    };
    let content = match payload.content {
        Some(c) if !c.trim().is_empty() => c,
        _ => return Err(ApiError::Validation("Content is required")),
    };
    let tags = payload.tags.unwrap_or_default();

    let note = state.note_store.create_note(&owner, &title, &content, tags)?;

    Ok(Json(NoteResponse {
        error: false,
        note,
        message: "Note Added Successfully".to_string(),
    }))
}

/// Edit note - PUT /notes/edit-note/:noteId
///
/// A patch with no fields at all is rejected; a pin-only patch is a
/// valid change.
pub async fn edit_note(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(note_id): Path<String>,
    Json(patch): Json<NotePatch>,
) -> Result<Json<NoteResponse>, ApiError> {
    let owner = owner_id(&claims)?;
    let note_id = parse_note_id(&note_id)?;

    let patch = patch.normalized();
    if patch.is_empty() {
        return Err(ApiError::Validation("No changes Provided"));
    }

    let note = state
        .note_store
        .update_note(&owner, &note_id, &patch)?
        .ok_or(ApiError::NoteNotFound)?;

    Ok(Json(NoteResponse {
        error: false,
        note,
        message: "Note Updated Successfully".to_string(),
    }))
}

/// Get all notes - GET /notes/get-all-notes
pub async fn get_all_notes(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<NotesResponse>, ApiError> {
    let owner = owner_id(&claims)?;

    let notes = state.note_store.list_notes(&owner)?;

    Ok(Json(NotesResponse {
        error: false,
        notes,
        message: "All notes retrieved successfully".to_string(),
    }))
}

/// Delete note - DELETE /notes/delete-note/:noteId
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(note_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let owner = owner_id(&claims)?;
    let note_id = parse_note_id(&note_id)?;

    if !state.note_store.delete_note(&owner, &note_id)? {
        return Err(ApiError::NoteNotFound);
    }

    Ok(Json(MessageResponse {
        error: false,
        message: "Note Deleted Successfully".to_string(),
    }))
}

/// Update note pin - PUT /notes/update-note-pin/:noteId
pub async fn update_note_pin(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(note_id): Path<String>,
    Json(payload): Json<UpdatePinRequest>,
) -> Result<Json<NoteResponse>, ApiError> {
    let owner = owner_id(&claims)?;
    let note_id = parse_note_id(&note_id)?;

    // Presence check: false is a legitimate value here.
    let pinned = payload
        .is_pinned
        .ok_or(ApiError::Validation("isPinned is required"))?;

    let note = state
        .note_store
        .set_pinned(&owner, &note_id, pinned)?
        .ok_or(ApiError::NoteNotFound)?;

    Ok(Json(NoteResponse {
        error: false,
        note,
        message: "Note Updated Successfully".to_string(),
    }))
}

/// Search notes - GET /notes/search-notes?query=
pub async fn search_notes(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<SearchParams>,
) -> Result<Json<NotesResponse>, ApiError> {
    let owner = owner_id(&claims)?;

    let query = match params.query {
        Some(q) if !q.trim().is_empty() => q,
        _ => return Err(ApiError::Validation("Search query is required")),
    };

    let notes = state.note_store.search_notes(&owner, &query)?;

    Ok(Json(NotesResponse {
        error: false,
        notes,
        message: "Notes matching the search query retrieved successfully".to_string(),
    }))
}

/// Owner id from the gate-verified claim.
fn owner_id(claims: &Claims) -> Result<Uuid, ApiError> {
    claims.user_id().ok_or(ApiError::Unauthenticated)
}

/// A path id that is not a well-formed uuid cannot match any note.
fn parse_note_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NoteNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_note_id_behaves_as_missing() {
        assert!(parse_note_id("not-a-uuid").is_err());
        assert!(parse_note_id(&Uuid::new_v4().to_string()).is_ok());
    }

    #[test]
    fn test_owner_id_rejects_unparseable_claim() {
        let claims = Claims {
            sub: "garbage".to_string(),
            exp: 0,
        };
        assert!(owner_id(&claims).is_err());
    }
}

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{NewNote, NoteWithUsername};
use crate::state::AppState;

/// Bodies arrive as raw JSON and are validated by hand so malformed input
/// maps to the contract's 400 responses instead of framework-level 422s.
fn required_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn required_uuid(body: &Value, field: &str) -> Option<Uuid> {
    required_str(body, field).and_then(|s| Uuid::parse_str(s).ok())
}

/// GET /notes - List all notes with each owner's username attached
pub async fn get_all_notes(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let notes = state.notes.find_all().await?;

    // An empty collection is a client error in this contract, not []
    if notes.is_empty() {
        return Err(ApiError::bad_request("No notes found"));
    }

    // Single batched lookup over the distinct owner ids
    let mut owner_ids: Vec<Uuid> = notes.iter().map(|n| n.user).collect();
    owner_ids.sort_unstable();
    owner_ids.dedup();
    let usernames = state.users.find_usernames(&owner_ids).await?;

    let notes_with_user = notes
        .into_iter()
        .map(|note| {
            let username = usernames.get(&note.user).cloned().ok_or_else(|| {
                // Referential integrity is not enforced at write time, so a
                // dangling owner id can exist; surface it as a server error.
                tracing::error!("note {} references missing user {}", note.id, note.user);
                ApiError::internal_server_error("An error occurred while processing your request")
            })?;
            Ok(NoteWithUsername { note, username })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(Json(notes_with_user))
}

/// POST /notes - Create a new note (starts incomplete)
pub async fn create_new_note(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    // Confirm data
    let fields = (
        required_uuid(&body, "user"),
        required_str(&body, "title"),
        required_str(&body, "text"),
    );
    let (user, title, text) = match fields {
        (Some(user), Some(title), Some(text)) => (user, title.to_string(), text.to_string()),
        _ => return Err(ApiError::bad_request("All fields are required")),
    };

    // The store enforces the case-insensitive title constraint under its
    // write lock; a collision surfaces here as 409 via From<StoreError>
    let note = state.notes.insert(NewNote { user, title, text }).await?;
    tracing::info!("note {} created by user {}", note.id, note.user);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "New note created" })),
    ))
}

/// PATCH /notes - Overwrite a note's user, title, text and completed flag
pub async fn update_note(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    // Confirm data; `completed` must be a JSON boolean, "true" is rejected
    let fields = (
        required_uuid(&body, "id"),
        required_uuid(&body, "user"),
        required_str(&body, "title"),
        required_str(&body, "text"),
        body.get("completed").and_then(Value::as_bool),
    );
    let (id, user, title, text, completed) = match fields {
        (Some(id), Some(user), Some(title), Some(text), Some(completed)) => {
            (id, user, title.to_string(), text.to_string(), completed)
        }
        _ => return Err(ApiError::bad_request("All fields are required")),
    };

    // Confirm the note exists to update
    let Some(mut note) = state.notes.find_by_id(id).await? else {
        return Err(ApiError::bad_request("Note not found"));
    };

    note.user = user;
    note.title = title;
    note.text = text;
    note.completed = completed;

    let updated = state
        .notes
        .update(note)
        .await?
        .ok_or_else(|| ApiError::bad_request("Note not found"))?;

    // Bare string payload, kept for client compatibility
    Ok(Json(format!("{} updated", updated.title)))
}

/// DELETE /notes - Permanently remove a note
pub async fn delete_note(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(id) = required_str(&body, "id") else {
        return Err(ApiError::bad_request("Note ID required"));
    };
    let id = Uuid::parse_str(id).map_err(|_| ApiError::bad_request("Note not found"))?;

    let Some(note) = state.notes.delete(id).await? else {
        return Err(ApiError::bad_request("Note not found"));
    };
    tracing::info!("note {} deleted", note.id);

    Ok(Json(format!("Note {} with ID {} deleted", note.title, note.id)))
}

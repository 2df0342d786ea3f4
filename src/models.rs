/// Shared data types for the notes domain.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A titled text record owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub user: Uuid,
    pub title: String,
    pub text: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the client when creating a note.
/// `completed` is not settable at creation; new notes start incomplete.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub user: Uuid,
    pub title: String,
    pub text: String,
}

impl Note {
    pub fn new(new: NewNote) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user: new.user,
            title: new.title,
            text: new.text,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Account record from the user store. Read-only from this service's
/// perspective; only `username` is consumed, to enrich note listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

/// A note joined with its owner's username, as returned by the list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct NoteWithUsername {
    #[serde(flatten)]
    pub note: Note,
    pub username: String,
}

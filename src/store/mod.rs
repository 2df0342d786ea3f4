/// Document-store seam. Handlers talk to these traits only; the in-memory
/// implementation in `memory` is the default backend.
pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{NewNote, Note, User};

pub use memory::{MemoryNoteStore, MemoryUserStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another note already holds this title under case-insensitive
    /// comparison. Carries the conflicting title for logging.
    #[error("duplicate note title: {0}")]
    DuplicateTitle(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Note collection operations. Title uniqueness (case-insensitive) is
/// enforced inside `insert` and `update`, under the same critical section as
/// the write, so two concurrent writers cannot both pass the check.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Note>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>, StoreError>;

    /// Insert a new note with a fresh id and `completed` false.
    /// Fails with `DuplicateTitle` if the title collides.
    async fn insert(&self, new: NewNote) -> Result<Note, StoreError>;

    /// Overwrite an existing note in place. The duplicate-title check skips
    /// the note being updated, so renaming a note to its own title succeeds.
    /// Returns `None` if no note matches `note.id`.
    async fn update(&self, note: Note) -> Result<Option<Note>, StoreError>;

    /// Permanently remove a note, returning it if it existed.
    async fn delete(&self, id: Uuid) -> Result<Option<Note>, StoreError>;
}

/// Read-only access to the external user collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Batched username lookup keyed by user id. Ids with no matching user
    /// are absent from the result map.
    async fn find_usernames(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, StoreError>;
}

use std::sync::Arc;

use crate::store::{MemoryNoteStore, MemoryUserStore, NoteStore, UserStore};

/// Shared handles to the document store, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteStore>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(notes: Arc<dyn NoteStore>, users: Arc<dyn UserStore>) -> Self {
        Self { notes, users }
    }

    /// Fresh in-memory backend, the default for local runs.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryNoteStore::new()),
            Arc::new(MemoryUserStore::new()),
        )
    }
}

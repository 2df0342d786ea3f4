/// In-memory document store backed by a `tokio::sync::RwLock`.
///
/// Notes are kept in insertion order so listings are stable. The
/// case-insensitive title constraint is checked while holding the write
/// lock, which closes the duplicate-title race a check-then-write at the
/// handler layer would leave open.
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{NewNote, Note, User};

use super::{NoteStore, StoreError, UserStore};

/// Collation key for the uniqueness constraint: letters of different case
/// compare equal.
fn title_key(title: &str) -> String {
    title.to_lowercase()
}

#[derive(Default)]
pub struct MemoryNoteStore {
    notes: RwLock<Vec<Note>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.notes.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>, StoreError> {
        let notes = self.notes.read().await;
        Ok(notes.iter().find(|n| n.id == id).cloned())
    }

    async fn insert(&self, new: NewNote) -> Result<Note, StoreError> {
        let mut notes = self.notes.write().await;
        let key = title_key(&new.title);
        if notes.iter().any(|n| title_key(&n.title) == key) {
            return Err(StoreError::DuplicateTitle(new.title));
        }
        let note = Note::new(new);
        notes.push(note.clone());
        Ok(note)
    }

    async fn update(&self, note: Note) -> Result<Option<Note>, StoreError> {
        let mut notes = self.notes.write().await;
        let key = title_key(&note.title);
        if notes.iter().any(|n| n.id != note.id && title_key(&n.title) == key) {
            return Err(StoreError::DuplicateTitle(note.title));
        }
        match notes.iter_mut().find(|n| n.id == note.id) {
            Some(slot) => {
                slot.user = note.user;
                slot.title = note.title;
                slot.text = note.text;
                slot.completed = note.completed;
                slot.updated_at = chrono::Utc::now();
                Ok(Some(slot.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Note>, StoreError> {
        let mut notes = self.notes.write().await;
        match notes.iter().position(|n| n.id == id) {
            Some(idx) => Ok(Some(notes.remove(idx))),
            None => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account. The notes core never writes users at runtime; this
    /// exists for bootstrap and tests.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_usernames(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, StoreError> {
        let users = self.users.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| users.get(id).map(|u| (*id, u.username.clone())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_note(title: &str) -> NewNote {
        NewNote {
            user: Uuid::new_v4(),
            title: title.to_string(),
            text: "body".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_rejects_case_insensitive_duplicate() {
        let store = MemoryNoteStore::new();
        store.insert(new_note("Shopping")).await.unwrap();

        let err = store.insert(new_note("shopping")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateTitle(_)));

        // Only the first insert landed
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn new_notes_start_incomplete() {
        let store = MemoryNoteStore::new();
        let note = store.insert(new_note("Errands")).await.unwrap();
        assert!(!note.completed);
    }

    #[tokio::test]
    async fn update_allows_keeping_own_title() {
        let store = MemoryNoteStore::new();
        let note = store.insert(new_note("Groceries")).await.unwrap();

        let mut changed = note.clone();
        changed.text = "eggs".to_string();
        changed.completed = true;

        let updated = store.update(changed).await.unwrap().unwrap();
        assert_eq!(updated.title, "Groceries");
        assert_eq!(updated.text, "eggs");
        assert!(updated.completed);
        assert!(updated.updated_at >= note.updated_at);
    }

    #[tokio::test]
    async fn update_rejects_title_held_by_another_note() {
        let store = MemoryNoteStore::new();
        store.insert(new_note("First")).await.unwrap();
        let second = store.insert(new_note("Second")).await.unwrap();

        let mut renamed = second.clone();
        renamed.title = "FIRST".to_string();
        let err = store.update(renamed).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateTitle(_)));
    }

    #[tokio::test]
    async fn update_unknown_id_is_none() {
        let store = MemoryNoteStore::new();
        let ghost = Note::new(new_note("Ghost"));
        assert!(store.update(ghost).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_permanent_and_reports_absence() {
        let store = MemoryNoteStore::new();
        let note = store.insert(new_note("Trash")).await.unwrap();

        let removed = store.delete(note.id).await.unwrap();
        assert_eq!(removed.map(|n| n.id), Some(note.id));

        // Second delete of the same id finds nothing
        assert!(store.delete(note.id).await.unwrap().is_none());
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn username_lookup_is_batched_by_id() {
        let users = MemoryUserStore::new();
        let dan = Uuid::new_v4();
        let hank = Uuid::new_v4();
        let missing = Uuid::new_v4();
        users.insert(User { id: dan, username: "dan".into() }).await;
        users.insert(User { id: hank, username: "hank".into() }).await;

        let found = users.find_usernames(&[dan, hank, missing]).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found.get(&dan).map(String::as_str), Some("dan"));
        assert!(!found.contains_key(&missing));
    }
}

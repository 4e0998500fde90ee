//! In-memory `NoteStore` backing service and handler tests, mirroring the
//! query semantics of the Postgres implementation.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{NoteStore, StoreError};
use crate::models::Note;

#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    notes: Vec<Note>,
}

#[async_trait]
impl NoteStore for InMemoryStore {
    async fn insert(&self, title: String, content: Option<String>) -> Result<Note, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.last_id += 1;
        let now = Utc::now();
        let note = Note {
            id: inner.last_id,
            title,
            content,
            created_at: now,
            modified_at: now,
        };
        inner.notes.push(note.clone());
        Ok(note)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.notes.iter().find(|note| note.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut notes = inner.notes.clone();
        notes.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
        Ok(notes)
    }

    async fn update(
        &self,
        id: i64,
        title: String,
        content: Option<String>,
    ) -> Result<Option<Note>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(note) = inner.notes.iter_mut().find(|note| note.id == id) else {
            return Ok(None);
        };
        note.title = title;
        note.content = content;
        note.modified_at = Utc::now();
        Ok(Some(note.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.notes.len();
        inner.notes.retain(|note| note.id != id);
        Ok(inner.notes.len() < before)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.notes.iter().any(|note| note.id == id))
    }

    async fn search_by_title_or_content(&self, keyword: &str) -> Result<Vec<Note>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .notes
            .iter()
            .filter(|note| {
                note.title.contains(keyword)
                    || note
                        .content
                        .as_ref()
                        .is_some_and(|content| content.contains(keyword))
            })
            .cloned()
            .collect())
    }

    async fn search_by_title(&self, keyword: &str) -> Result<Vec<Note>, StoreError> {
        let needle = keyword.to_lowercase();
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .notes
            .iter()
            .filter(|note| note.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

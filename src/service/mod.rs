use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    repository::{NoteStore, StoreError},
};

use std::sync::Arc;

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub const fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, StoreError> {
        self.store
            .insert(request.title, request.content)
            .await
            .map(NoteResponse::from)
    }

    /// Overwrites title and content only. The id and creation timestamp are
    /// never taken from the request; the store refreshes the modification
    /// timestamp.
    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<Option<NoteResponse>, StoreError> {
        self.store
            .update(id, request.title, request.content)
            .await
            .map(|note| note.map(NoteResponse::from))
    }

    /// Deleting an absent note is a `false` no-op, not an error.
    pub async fn delete_note(&self, id: i64) -> Result<bool, StoreError> {
        if !self.store.exists_by_id(id).await? {
            return Ok(false);
        }
        self.store.delete_by_id(id).await
    }

    pub async fn get_one_note(&self, id: i64) -> Result<Option<NoteResponse>, StoreError> {
        self.store
            .find_by_id(id)
            .await
            .map(|note| note.map(NoteResponse::from))
    }

    /// All notes, most recently modified first.
    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, StoreError> {
        self.store
            .find_all()
            .await
            .map(|notes| notes.into_iter().map(NoteResponse::from).collect())
    }

    pub async fn search_notes(&self, keyword: &str) -> Result<Vec<NoteResponse>, StoreError> {
        self.store
            .search_by_title_or_content(keyword)
            .await
            .map(|notes| notes.into_iter().map(NoteResponse::from).collect())
    }

    pub async fn get_notes_by_title(&self, titre: &str) -> Result<Vec<NoteResponse>, StoreError> {
        self.store
            .search_by_title(titre)
            .await
            .map(|notes| notes.into_iter().map(NoteResponse::from).collect())
    }
}

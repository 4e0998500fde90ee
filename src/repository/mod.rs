mod embedded;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};

use embedded::migrations;

use crate::models::Note;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),
}

/// Persistence contract for notes.
///
/// Absence is reported as `None`/`false`, never as an error; `Err` means the
/// storage layer itself failed.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert a new note. The store assigns the id and both timestamps.
    async fn insert(&self, title: String, content: Option<String>) -> Result<Note, StoreError>;

    /// Fetch a single note.
    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, StoreError>;

    /// All notes, most recently modified first.
    async fn find_all(&self) -> Result<Vec<Note>, StoreError>;

    /// Overwrite title and content of an existing note, refreshing its
    /// modification timestamp. Returns `None` when the id is absent.
    async fn update(
        &self,
        id: i64,
        title: String,
        content: Option<String>,
    ) -> Result<Option<Note>, StoreError>;

    /// Remove a note, reporting whether a row was deleted.
    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Case-sensitive substring match against title or content.
    async fn search_by_title_or_content(&self, keyword: &str) -> Result<Vec<Note>, StoreError>;

    /// Case-insensitive substring match against the title only.
    async fn search_by_title(&self, keyword: &str) -> Result<Vec<Note>, StoreError>;
}

pub struct Repository {
    client: Client,
}

impl Repository {
    pub async fn new(database_dsn: String) -> Result<Self, StoreError> {
        let (client, con) = tokio_postgres::connect(&database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), StoreError> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        modified_at: row.get("modified_at"),
    }
}

/// Escape LIKE metacharacters so the keyword matches as a plain substring.
fn escape_like(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl NoteStore for Repository {
    async fn insert(&self, title: String, content: Option<String>) -> Result<Note, StoreError> {
        let row = self.client.query_one(
            "INSERT INTO notes (title, content) VALUES ($1, $2) RETURNING id, title, content, created_at, modified_at",
            &[&title, &content],
        ).await?;

        Ok(note_from_row(&row))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, StoreError> {
        let row = self
            .client
            .query_opt(
                "SELECT id, title, content, created_at, modified_at FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        let rows = self
            .client
            .query(
                "SELECT id, title, content, created_at, modified_at FROM notes ORDER BY modified_at DESC",
                &[],
            )
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn update(
        &self,
        id: i64,
        title: String,
        content: Option<String>,
    ) -> Result<Option<Note>, StoreError> {
        let row = self.client.query_opt(
            "UPDATE notes SET title = $1, content = $2, modified_at = NOW() WHERE id = $3 RETURNING id, title, content, created_at, modified_at",
            &[&title, &content, &id],
        ).await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let row = self
            .client
            .query_one("SELECT EXISTS(SELECT 1 FROM notes WHERE id = $1)", &[&id])
            .await?;

        Ok(row.get(0))
    }

    async fn search_by_title_or_content(&self, keyword: &str) -> Result<Vec<Note>, StoreError> {
        let pattern = format!("%{}%", escape_like(keyword));
        let rows = self.client.query(
            "SELECT id, title, content, created_at, modified_at FROM notes WHERE title LIKE $1 OR content LIKE $1",
            &[&pattern],
        ).await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn search_by_title(&self, keyword: &str) -> Result<Vec<Note>, StoreError> {
        let pattern = format!("%{}%", escape_like(keyword));
        let rows = self.client.query(
            "SELECT id, title, content, created_at, modified_at FROM notes WHERE title ILIKE $1",
            &[&pattern],
        ).await?;

        Ok(rows.iter().map(note_from_row).collect())
    }
}

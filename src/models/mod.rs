use chrono::{DateTime, Utc};

/// A persisted note row.
///
/// `id` and `created_at` are assigned once at insertion and never change
/// afterwards; `modified_at` is refreshed by every write.
#[derive(Debug, Clone)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

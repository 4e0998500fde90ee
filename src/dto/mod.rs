use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::handlers::auth::VerifiedIdentity;
use crate::models::Note;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note content
    pub content: Option<String>,
    /// Creation timestamp, never changes after insertion
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last write
    pub modified_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            modified_at: note.modified_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note title
    pub title: String,
    /// Note content
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// New title
    pub title: String,
    /// New content
    pub content: Option<String>,
}

/// Query parameters for the combined title/content search.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Substring to look for in the title or the content
    pub keyword: String,
}

/// Query parameters for the title-only search.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct TitleSearchParams {
    /// Substring to look for in the title, case-insensitive
    pub titre: String,
}

/// Payload of `GET /auth/user-info`.
///
/// An unauthenticated request serializes to `{"authenticated": false}` with
/// no other keys.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserInfoResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Realm-level roles from the `realm_access.roles` claim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    /// Authority strings granted by the verification layer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorities: Option<Vec<String>>,
}

impl UserInfoResponse {
    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            sub: None,
            preferred_username: None,
            email: None,
            name: None,
            roles: None,
            authorities: None,
        }
    }

    pub fn from_identity(identity: &VerifiedIdentity) -> Self {
        Self {
            authenticated: true,
            sub: identity.claims.sub.clone(),
            preferred_username: identity.claims.preferred_username.clone(),
            email: identity.claims.email.clone(),
            name: identity.claims.name.clone(),
            roles: Some(identity.claims.realm_roles()),
            authorities: Some(identity.authorities.clone()),
        }
    }
}

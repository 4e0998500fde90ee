//! Identity echo endpoint.
//!
//! Token verification happens upstream (identity provider plus bearer-token
//! middleware). Once a token is verified, that layer stores a
//! [`VerifiedIdentity`] in the request extensions; this handler only reads
//! the already-validated claims back out and never inspects the token
//! itself.

use axum::{
    Extension, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dto::UserInfoResponse;

/// Claims carried by a verified bearer token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Option<String>,
    pub preferred_username: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    /// Realm-level access claim, with `roles` nested inside.
    #[serde(default)]
    pub realm_access: Value,
}

impl TokenClaims {
    /// Roles from the nested `realm_access.roles` claim. An absent or
    /// malformed claim degrades to an empty list; non-string entries are
    /// skipped.
    pub fn realm_roles(&self) -> Vec<String> {
        self.realm_access
            .get("roles")
            .and_then(Value::as_array)
            .map(|roles| {
                roles
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Identity established by the upstream verification layer.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub claims: TokenClaims,
    /// Authority strings granted during verification.
    pub authorities: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/auth/user-info",
    responses(
        (status = 200, description = "Identity claims of the caller, or authenticated=false", body = UserInfoResponse)
    ),
    tag = "auth"
)]
#[debug_handler]
pub async fn user_info(identity: Option<Extension<VerifiedIdentity>>) -> Response {
    let body = match identity {
        Some(Extension(identity)) => UserInfoResponse::from_identity(&identity),
        None => UserInfoResponse::unauthenticated(),
    };

    (StatusCode::OK, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use serde_json::json;
    use tower::ServiceExt;

    fn claims(value: Value) -> TokenClaims {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn realm_roles_reads_nested_claim() {
        let claims = claims(json!({
            "sub": "abc",
            "realm_access": {"roles": ["user", "admin"]}
        }));
        assert_eq!(claims.realm_roles(), vec!["user", "admin"]);
    }

    #[test]
    fn realm_roles_is_empty_when_claim_is_absent() {
        assert!(claims(json!({"sub": "abc"})).realm_roles().is_empty());
    }

    #[test]
    fn realm_roles_is_empty_when_claim_is_malformed() {
        assert!(claims(json!({"realm_access": "oops"})).realm_roles().is_empty());
        assert!(claims(json!({"realm_access": {"roles": "oops"}})).realm_roles().is_empty());
    }

    #[test]
    fn realm_roles_skips_non_string_entries() {
        let claims = claims(json!({"realm_access": {"roles": ["user", 7, null]}}));
        assert_eq!(claims.realm_roles(), vec!["user"]);
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn user_info_without_identity_is_bare_authenticated_false() {
        let router = Router::new().route("/auth/user-info", get(user_info));

        let response = router
            .oneshot(Request::get("/auth/user-info").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"authenticated": false}));
    }

    #[tokio::test]
    async fn user_info_echoes_verified_claims() {
        let router = Router::new().route("/auth/user-info", get(user_info));

        let identity = VerifiedIdentity {
            claims: claims(json!({
                "sub": "f61a",
                "preferred_username": "alice",
                "email": "alice@example.org",
                "name": "Alice",
                "realm_access": {"roles": ["user"]}
            })),
            authorities: vec!["ROLE_user".to_string()],
        };

        let mut request = Request::get("/auth/user-info").body(Body::empty()).unwrap();
        request.extensions_mut().insert(identity);

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({
                "authenticated": true,
                "sub": "f61a",
                "preferred_username": "alice",
                "email": "alice@example.org",
                "name": "Alice",
                "roles": ["user"],
                "authorities": ["ROLE_user"]
            })
        );
    }
}

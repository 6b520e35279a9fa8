//! Request routing.
//!
//! [`Route::resolve`] is a pure, total function from (method, path) to a
//! route; [`handle`] is the per-invocation entry point that dispatches to
//! exactly one handler and flattens errors into responses.

use lambda_http::http::Method;
use lambda_http::{Body, Error, Request, Response};

use crate::handlers::{self, ApiError};
use crate::state::AppState;

/// Resolved route for an incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    CreateUser,
    ListUsers,
    GetUser { user_id: String },
    UpdateUser { user_id: String },
    DeleteUser { user_id: String },
    /// Item-level path with an empty identifier, any method.
    MissingUserId,
    /// Everything else.
    NotFound { method: Method, path: String },
}

impl Route {
    /// Maps (method, path) to a route. Every combination resolves to
    /// exactly one variant.
    pub fn resolve(method: &Method, path: &str) -> Route {
        let not_found = || Route::NotFound {
            method: method.clone(),
            path: path.to_string(),
        };

        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        match segments.as_slice() {
            ["users"] => {
                if method == Method::POST {
                    Route::CreateUser
                } else if method == Method::GET {
                    Route::ListUsers
                } else {
                    not_found()
                }
            }
            ["users", user_id] => {
                // Identifier presence is checked before the method so an
                // empty id is rejected uniformly.
                if user_id.is_empty() {
                    Route::MissingUserId
                } else if method == Method::GET {
                    Route::GetUser {
                        user_id: (*user_id).to_string(),
                    }
                } else if method == Method::PATCH {
                    Route::UpdateUser {
                        user_id: (*user_id).to_string(),
                    }
                } else if method == Method::DELETE {
                    Route::DeleteUser {
                        user_id: (*user_id).to_string(),
                    }
                } else {
                    not_found()
                }
            }
            _ => not_found(),
        }
    }
}

/// Entry point for a single invocation: route, dispatch, normalize.
///
/// Handler errors never propagate past this function; they are converted
/// into responses here.
pub async fn handle(event: Request, state: AppState) -> Result<Response<Body>, Error> {
    let (parts, body) = event.into_parts();
    let path = parts.uri.path().to_string();

    tracing::debug!(method = %parts.method, path = %path, "received request");

    let result = match Route::resolve(&parts.method, &path) {
        Route::CreateUser => handlers::users::create_user(&state, &body).await,
        Route::ListUsers => handlers::users::list_users(&state).await,
        Route::GetUser { user_id } => handlers::users::get_user(&state, &user_id).await,
        Route::UpdateUser { user_id } => {
            handlers::users::update_user(&state, &user_id, &body).await
        }
        Route::DeleteUser { user_id } => handlers::users::delete_user(&state, &user_id).await,
        Route::MissingUserId => Err(ApiError::MissingUserId),
        Route::NotFound { method, path } => Err(ApiError::RouteNotFound { method, path }),
    };

    Ok(result.unwrap_or_else(ApiError::into_response))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use lambda_http::http::StatusCode;
    use serde_json::{json, Value};

    use crate::storage::inmemory::InMemoryRepository;

    #[test]
    fn test_resolve_collection_routes() {
        assert_eq!(Route::resolve(&Method::POST, "/users"), Route::CreateUser);
        assert_eq!(Route::resolve(&Method::GET, "/users"), Route::ListUsers);
        assert!(matches!(
            Route::resolve(&Method::DELETE, "/users"),
            Route::NotFound { .. }
        ));
    }

    #[test]
    fn test_resolve_item_routes() {
        assert_eq!(
            Route::resolve(&Method::GET, "/users/abc"),
            Route::GetUser {
                user_id: "abc".to_string()
            }
        );
        assert_eq!(
            Route::resolve(&Method::PATCH, "/users/abc"),
            Route::UpdateUser {
                user_id: "abc".to_string()
            }
        );
        assert_eq!(
            Route::resolve(&Method::DELETE, "/users/abc"),
            Route::DeleteUser {
                user_id: "abc".to_string()
            }
        );
        assert!(matches!(
            Route::resolve(&Method::PUT, "/users/abc"),
            Route::NotFound { .. }
        ));
    }

    #[test]
    fn test_resolve_missing_identifier_beats_method() {
        for method in [Method::GET, Method::PATCH, Method::DELETE, Method::PUT] {
            assert_eq!(Route::resolve(&method, "/users/"), Route::MissingUserId);
        }
    }

    #[test]
    fn test_resolve_unknown_paths() {
        assert!(matches!(
            Route::resolve(&Method::GET, "/"),
            Route::NotFound { .. }
        ));
        assert!(matches!(
            Route::resolve(&Method::GET, "/accounts"),
            Route::NotFound { .. }
        ));
        assert!(matches!(
            Route::resolve(&Method::GET, "/users/abc/extra"),
            Route::NotFound { .. }
        ));
    }

    fn test_state() -> AppState {
        AppState::with_repository(Arc::new(InMemoryRepository::new()))
    }

    async fn send(
        state: &AppState,
        method: &str,
        path: &str,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let request = lambda_http::http::Request::builder()
            .method(method)
            .uri(path)
            .body(match body {
                Some(text) => Body::Text(text.to_string()),
                None => Body::Empty,
            })
            .unwrap();

        let response = handle(request, state.clone()).await.unwrap();
        let status = response.status();
        let value = match response.into_body() {
            Body::Text(text) => serde_json::from_str(&text).unwrap(),
            other => panic!("expected text body, got {other:?}"),
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_full_user_lifecycle() {
        let state = test_state();

        // Create
        let (status, created) = send(&state, "POST", "/users", Some(r#"{"name": "Ana"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["message"], json!("User created successfully."));
        let user_id = created["userId"].as_str().unwrap().to_string();
        assert!(!user_id.is_empty());

        // Get
        let (status, fetched) = send(&state, "GET", &format!("/users/{user_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["userId"], json!(user_id));
        assert_eq!(fetched["name"], json!("Ana"));
        let created_at = fetched["createdAt"].as_str().unwrap().to_string();
        assert!(chrono::DateTime::parse_from_rfc3339(&created_at).is_ok());

        // Update
        let (status, updated) = send(
            &state,
            "PATCH",
            &format!("/users/{user_id}"),
            Some(r#"{"name": "Ana M."}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], json!("Ana M."));
        assert_eq!(updated["userId"], json!(user_id));
        assert_eq!(updated["createdAt"], json!(created_at));

        // Delete
        let (status, deleted) = send(&state, "DELETE", &format!("/users/{user_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["message"], json!("User deleted successfully."));

        // Gone
        let (status, missing) = send(&state, "GET", &format!("/users/{user_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(missing["message"], json!("User not found."));
    }

    #[tokio::test]
    async fn test_missing_identifier_is_bad_request() {
        let state = test_state();

        let (status, body) = send(&state, "DELETE", "/users/", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], json!("User ID is missing in the path."));
    }

    #[tokio::test]
    async fn test_unknown_route_names_method_and_path() {
        let state = test_state();

        let (status, body) = send(&state, "PUT", "/users/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["message"],
            json!("Method PUT on resource /users/abc not found.")
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let state = test_state();

        let (status, body) = send(&state, "POST", "/users", Some("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            json!("Invalid JSON format in request body.")
        );
    }

    #[tokio::test]
    async fn test_empty_update_payload_is_bad_request() {
        let state = test_state();

        let (status, created) = send(&state, "POST", "/users", Some(r#"{"name": "Ana"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        let user_id = created["userId"].as_str().unwrap();

        let (status, body) = send(&state, "PATCH", &format!("/users/{user_id}"), Some("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], json!("Update payload is empty."));
    }
}

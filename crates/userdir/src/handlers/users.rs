//! User CRUD handlers.
//!
//! Each handler validates its input, performs exactly one storage
//! operation, and maps the outcome through the response builder. Errors
//! are converted at the point of detection; nothing escapes as a panic or
//! an unhandled failure.

use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde_json::{json, Map, Value};

use userdir_core::record::Record;
use userdir_core::storage::UpdatePatch;

use crate::handlers::ApiError;
use crate::response::json_response;
use crate::state::AppState;

/// Decodes a request body as a JSON object. Anything else, including an
/// absent body, is malformed input.
fn decode_object(body: &Body) -> Result<Map<String, Value>, ApiError> {
    let bytes: &[u8] = match body {
        Body::Empty => &[],
        Body::Text(text) => text.as_bytes(),
        Body::Binary(data) => data.as_slice(),
    };

    serde_json::from_slice(bytes).map_err(ApiError::MalformedBody)
}

/// Create a new user (POST /users).
///
/// The identifier and creation timestamp are server-assigned; caller
/// values under those names are discarded. The put overwrites
/// unconditionally, there is no existence check.
pub async fn create_user(state: &AppState, body: &Body) -> Result<Response<Body>, ApiError> {
    let fields = decode_object(body)?;
    let record = Record::new(fields);

    state.records.put_record(&record).await?;

    tracing::info!(user_id = %record.user_id, "created user");

    Ok(json_response(
        StatusCode::CREATED,
        &json!({
            "message": "User created successfully.",
            "userId": record.user_id,
        }),
    ))
}

/// List all users (GET /users).
///
/// Unpaged by design: the collection is assumed bounded, and the response
/// returns whatever order the backend scan produced.
pub async fn list_users(state: &AppState) -> Result<Response<Body>, ApiError> {
    let records = state.records.scan_records().await?;
    let body = Value::Array(records.iter().map(Record::to_json).collect());

    Ok(json_response(StatusCode::OK, &body))
}

/// Fetch a single user by id (GET /users/{userId}).
pub async fn get_user(state: &AppState, user_id: &str) -> Result<Response<Body>, ApiError> {
    match state.records.get_record(user_id).await? {
        Some(record) => Ok(json_response(StatusCode::OK, &record.to_json())),
        None => Err(ApiError::UserNotFound),
    }
}

/// Apply a partial update (PATCH /users/{userId}).
///
/// The patch is validated before any storage call; only the named fields
/// change and the post-update record is returned.
pub async fn update_user(
    state: &AppState,
    user_id: &str,
    body: &Body,
) -> Result<Response<Body>, ApiError> {
    let fields = decode_object(body)?;
    let patch = UpdatePatch::new(fields)?;

    let updated = state.records.update_record(user_id, &patch).await?;

    tracing::info!(user_id = %user_id, fields = patch.fields().len(), "updated user");

    Ok(json_response(StatusCode::OK, &updated.to_json()))
}

/// Delete a user (DELETE /users/{userId}).
///
/// Idempotent: deleting an absent id is still a success.
pub async fn delete_user(state: &AppState, user_id: &str) -> Result<Response<Body>, ApiError> {
    state.records.delete_record(user_id).await?;

    tracing::info!(user_id = %user_id, "deleted user");

    Ok(json_response(
        StatusCode::OK,
        &json!({ "message": "User deleted successfully." }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::storage::inmemory::InMemoryRepository;

    fn test_state() -> AppState {
        AppState::with_repository(Arc::new(InMemoryRepository::new()))
    }

    fn body_json(response: Response<Body>) -> Value {
        match response.into_body() {
            Body::Text(text) => serde_json::from_str(&text).unwrap(),
            other => panic!("expected text body, got {other:?}"),
        }
    }

    async fn create(state: &AppState, payload: &str) -> String {
        let response = create_user(state, &Body::Text(payload.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response)["userId"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_create_returns_generated_id() {
        let state = test_state();

        let first = create(&state, r#"{"name": "Ana"}"#).await;
        let second = create(&state, r#"{"name": "Ana"}"#).await;

        assert!(!first.is_empty());
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_create_overrides_caller_supplied_identity() {
        let state = test_state();

        let id = create(
            &state,
            r#"{"userId": "mine", "createdAt": "1999-01-01T00:00:00Z", "name": "Ana"}"#,
        )
        .await;
        assert_ne!(id, "mine");

        let response = get_user(&state, &id).await.unwrap();
        let fetched = body_json(response);
        assert_eq!(fetched["name"], json!("Ana"));
        assert_ne!(fetched["createdAt"], json!("1999-01-01T00:00:00Z"));
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_body() {
        let state = test_state();

        let err = create_user(&state, &Body::Text("{not json".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));

        // Nothing reached the backend.
        let response = list_users(&state).await.unwrap();
        assert_eq!(body_json(response), json!([]));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_body() {
        let state = test_state();

        let err = create_user(&state, &Body::Empty).await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }

    #[tokio::test]
    async fn test_list_returns_every_record() {
        let state = test_state();
        create(&state, r#"{"name": "Ana"}"#).await;
        create(&state, r#"{"name": "Bob"}"#).await;

        let response = list_users(&state).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let listed = body_json(response);
        assert_eq!(listed.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let state = test_state();

        let err = get_user(&state, "never-created").await.unwrap_err();
        assert!(matches!(err, ApiError::UserNotFound));
    }

    #[tokio::test]
    async fn test_update_changes_only_named_fields() {
        let state = test_state();
        let id = create(&state, r#"{"name": "Ana", "city": "Lima"}"#).await;

        let response = update_user(&state, &id, &Body::Text(r#"{"name": "Ana M."}"#.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let updated = body_json(response);
        assert_eq!(updated["name"], json!("Ana M."));
        assert_eq!(updated["city"], json!("Lima"));
        assert_eq!(updated["userId"], json!(id));
    }

    #[tokio::test]
    async fn test_update_with_empty_payload_never_reaches_storage() {
        let state = test_state();
        let id = create(&state, r#"{"name": "Ana"}"#).await;

        let err = update_user(&state, &id, &Body::Text("{}".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::EmptyPayload(_)));

        // Record is untouched.
        let fetched = body_json(get_user(&state, &id).await.unwrap());
        assert_eq!(fetched["name"], json!("Ana"));
    }

    #[tokio::test]
    async fn test_update_rejects_malformed_body() {
        let state = test_state();
        let id = create(&state, r#"{"name": "Ana"}"#).await;

        let err = update_user(&state, &id, &Body::Text("not json".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));

        let fetched = body_json(get_user(&state, &id).await.unwrap());
        assert_eq!(fetched["name"], json!("Ana"));
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let state = test_state();

        let err = update_user(
            &state,
            "never-created",
            &Body::Text(r#"{"name": "Ana"}"#.to_string()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::UserNotFound));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let state = test_state();
        let id = create(&state, r#"{"name": "Ana"}"#).await;

        let first = delete_user(&state, &id).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = delete_user(&state, &id).await.unwrap();
        assert_eq!(second.status(), StatusCode::OK);
    }
}

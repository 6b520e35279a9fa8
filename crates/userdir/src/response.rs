//! Response envelope construction.
//!
//! Every outbound response, success or error, goes through
//! [`json_response`]; no handler assembles status codes or headers itself.

use lambda_http::http::{header, StatusCode};
use lambda_http::{Body, Response};
use serde_json::Value;

/// Builds the uniform response envelope: JSON content type, permissive
/// cross-origin header, serialized JSON body.
pub fn json_response(status: StatusCode, body: &Value) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(Body::Text(body.to_string()))
        .expect("response assembled from static parts")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fixed_header_set() {
        let response = json_response(StatusCode::OK, &json!({ "message": "ok" }));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[test]
    fn test_body_is_serialized_json() {
        let response = json_response(StatusCode::CREATED, &json!({ "userId": "abc" }));

        match response.into_body() {
            Body::Text(text) => {
                let value: Value = serde_json::from_str(&text).unwrap();
                assert_eq!(value, json!({ "userId": "abc" }));
            }
            other => panic!("expected text body, got {other:?}"),
        }
    }
}

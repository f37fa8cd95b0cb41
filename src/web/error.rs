use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use log::warn;
use serde_path_to_error::Segment;
use thiserror::Error;

use crate::web::models::{LocSegment, ValidationDetail, ValidationErrorBody};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {msg}")]
    Validation {
        loc: Vec<LocSegment>,
        msg: String,
        kind: &'static str,
    },

    #[error("Payload exceeds limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },
}

impl ApiError {
    fn detail(&self) -> ValidationDetail {
        match self {
            ApiError::Validation { loc, msg, kind } => ValidationDetail {
                loc: loc.clone(),
                msg: msg.clone(),
                kind: kind.to_string(),
            },
            ApiError::PayloadTooLarge { .. } => ValidationDetail {
                loc: vec!["body".into()],
                msg: self.to_string(),
                kind: "payload_too_large".to_string(),
            },
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ValidationErrorBody {
            detail: vec![self.detail()],
        })
    }
}

impl From<JsonPayloadError> for ApiError {
    fn from(err: JsonPayloadError) -> Self {
        match err {
            JsonPayloadError::OverflowKnownLength { limit, .. }
            | JsonPayloadError::Overflow { limit } => ApiError::PayloadTooLarge { limit },
            JsonPayloadError::ContentType => ApiError::Validation {
                loc: vec!["body".into()],
                msg: "Content type must be application/json".to_string(),
                kind: "content_type",
            },
            JsonPayloadError::Deserialize(e) => ApiError::Validation {
                loc: vec!["body".into()],
                kind: if e.is_data() { "value_error" } else { "json_invalid" },
                msg: e.to_string(),
            },
            other => ApiError::Validation {
                loc: vec!["body".into()],
                msg: other.to_string(),
                kind: "payload_error",
            },
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for ApiError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let mut loc: Vec<LocSegment> = vec!["body".into()];
        for segment in err.path().iter() {
            match segment {
                Segment::Seq { index } => loc.push(LocSegment::Index(*index)),
                Segment::Map { key } => loc.push(LocSegment::Key(key.clone())),
                Segment::Enum { variant } => loc.push(LocSegment::Key(variant.clone())),
                #[allow(unreachable_patterns)]
                _ => {}
            }
        }

        let inner = err.into_inner();
        let msg = inner.to_string();

        // A missing field fails on its parent struct, so the path stops one level short
        if let Some(field) = missing_field(&msg) {
            loc.push(LocSegment::Key(field.to_string()));
        }

        ApiError::Validation {
            loc,
            msg,
            kind: "value_error",
        }
    }
}

// serde reports a missing field as exactly "missing field `name`"
fn missing_field(msg: &str) -> Option<&str> {
    msg.strip_prefix("missing field `")?.strip_suffix('`')
}

/// Error handler installed on the JSON extractor so bad bodies come back as 422.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let err = ApiError::from(err);
    warn!("Rejected request to {}: {}", req.path(), err);
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::models::ConversationRequest;
    use serde_json::{json, Value};

    fn validate(body: Value) -> ApiError {
        serde_path_to_error::deserialize::<_, ConversationRequest>(body)
            .map(|_| ())
            .map_err(ApiError::from)
            .unwrap_err()
    }

    fn key(name: &str) -> LocSegment {
        LocSegment::Key(name.to_string())
    }

    fn loc_of(err: ApiError) -> Vec<LocSegment> {
        match err {
            ApiError::Validation { loc, kind, .. } => {
                assert_eq!(kind, "value_error");
                loc
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_top_level_field() {
        let loc = loc_of(validate(json!({})));
        assert_eq!(loc, vec![key("body"), key("messages")]);
    }

    #[test]
    fn missing_field_in_nested_element() {
        let loc = loc_of(validate(json!({ "messages": [{ "role": "user" }] })));
        assert_eq!(
            loc,
            vec![key("body"), key("messages"), LocSegment::Index(0), key("content")]
        );
    }

    #[test]
    fn wrong_type_points_at_the_value() {
        let loc = loc_of(validate(json!({ "messages": [
            { "role": "user", "content": "ok" },
            { "role": 7, "content": "hi" }
        ] })));
        assert_eq!(loc, vec![key("body"), key("messages"), LocSegment::Index(1), key("role")]);
    }

    #[test]
    fn string_value_cannot_steer_location() {
        let loc = loc_of(validate(json!({ "messages": "missing field `selected_characters`" })));
        assert_eq!(loc, vec![key("body"), key("messages")]);
    }

    #[test]
    fn syntax_error_is_json_invalid() {
        let err = serde_json::from_str::<Value>("{\"messages\": [").unwrap_err();
        match ApiError::from(JsonPayloadError::Deserialize(err)) {
            ApiError::Validation { loc, kind, .. } => {
                assert_eq!(loc, vec![key("body")]);
                assert_eq!(kind, "json_invalid");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn overflow_maps_to_413() {
        let err = ApiError::from(JsonPayloadError::Overflow { limit: 16 });
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn content_type_maps_to_422() {
        let err = ApiError::from(JsonPayloadError::ContentType);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn missing_field_requires_exact_message() {
        assert_eq!(missing_field("missing field `content`"), Some("content"));
        assert_eq!(
            missing_field("invalid type: string \"missing field `x`\", expected a sequence"),
            None
        );
    }
}

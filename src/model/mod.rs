use std::sync::Arc;
use log::{info, debug};
use serde_json::{Map, Value};
use crate::web::models::{Character, Message};

/// Placeholder reply returned by the generate endpoint until a real model is wired in.
pub const MOCK_RESPONSE: &str =
    "This is a mock response that will be replaced with actual LLM calls later.";

// Where the mock reply is cut into the two character segments
const SEGMENT_SPLIT: usize = "This is a mock response".len();

// Stand-in for the decomposition model. Holds no state and does no I/O.
pub struct MockModel;

impl MockModel {
    pub fn new() -> Self {
        info!("Initializing mock decomposition model");
        Self
    }

    pub fn generate_response(&self, messages: &[Message], selected_characters: &[String]) -> String {
        info!("Generating response for conversation of {} messages", messages.len());
        if let Some(last) = messages.last() {
            debug!("Last message: {}", summarize(last));
        }
        if !selected_characters.is_empty() {
            debug!("Selected characters: {}", selected_characters.join(", "));
        }

        MOCK_RESPONSE.to_string()
    }

    pub fn analyze_response(&self, payload: &Map<String, Value>) -> Vec<Character> {
        info!("Analyzing response payload with {} fields", payload.len());

        let (first, rest) = MOCK_RESPONSE.split_at(SEGMENT_SPLIT);

        vec![
            Character {
                name: "The Analyst".to_string(),
                description: "Focuses on data and logical reasoning".to_string(),
                text_segments: vec![first.to_string()],
                perspective: "analytical".to_string(),
            },
            Character {
                name: "The Optimist".to_string(),
                description: "Looks for positive outcomes and solutions".to_string(),
                text_segments: vec![rest.trim_start().to_string()],
                perspective: "positive".to_string(),
            },
        ]
    }
}

// Message content is never logged, only its size
fn summarize(message: &Message) -> String {
    format!("role={} content_len={}", message.role, message.content.len())
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}

// Shared handle to the model, cloned into each worker's app state
pub struct ModelManager {
    pub model: Arc<MockModel>,
}

impl ModelManager {
    pub fn new() -> Self {
        Self {
            model: Arc::new(MockModel::new()),
        }
    }
}

impl Default for ModelManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(role: &str, content: &str) -> Message {
        Message {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn generate_ignores_conversation_content() {
        let model = MockModel::new();

        let a = model.generate_response(&[message("user", "hi")], &[]);
        let b = model.generate_response(
            &[message("user", "something else"), message("assistant", "ok")],
            &["The Analyst".to_string()],
        );

        assert_eq!(a, MOCK_RESPONSE);
        assert_eq!(a, b);
    }

    #[test]
    fn generate_handles_empty_conversation() {
        let model = MockModel::new();
        assert!(!model.generate_response(&[], &[]).is_empty());
    }

    #[test]
    fn message_summary_omits_content() {
        let summary = summarize(&message("user", "my secret plans"));
        assert_eq!(summary, "role=user content_len=15");
        assert!(!summary.contains("secret"));
    }

    #[test]
    fn analyze_splits_mock_response_between_characters() {
        let model = MockModel::new();
        let payload = json!({ "text": "hello" });
        let characters = model.analyze_response(payload.as_object().unwrap());

        assert_eq!(characters.len(), 2);
        assert_eq!(characters[0].name, "The Analyst");
        assert_eq!(characters[0].text_segments, vec!["This is a mock response"]);
        assert_eq!(characters[0].perspective, "analytical");
        assert_eq!(characters[1].name, "The Optimist");
        assert_eq!(
            characters[1].text_segments,
            vec!["that will be replaced with actual LLM calls later."]
        );
        assert_eq!(characters[1].perspective, "positive");
    }

    #[test]
    fn analyze_is_independent_of_payload() {
        let model = MockModel::new();
        let empty = model.analyze_response(&Map::new());
        let full = model.analyze_response(json!({ "a": 1, "b": [1, 2] }).as_object().unwrap());
        assert_eq!(empty, full);
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationRequest {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub selected_characters: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    pub status: String,
}

/// A perspective found in a reply, with the fragments of text attributed to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub description: String,
    pub text_segments: Vec<String>,
    pub perspective: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub characters: Vec<Character>,
}

/// One step of the path to a rejected value: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocSegment {
    Index(usize),
    Key(String),
}

impl From<&str> for LocSegment {
    fn from(key: &str) -> Self {
        LocSegment::Key(key.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationDetail {
    pub loc: Vec<LocSegment>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    pub detail: Vec<ValidationDetail>,
}

use serde::{Deserialize, Serialize};

use super::message::ChatMode;

/// Body of a streaming chat request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// Trimmed prompt, without any display prefix
    pub prompt: String,
    pub session_id: String,
    /// Selects the endpoint; not part of the body
    #[serde(skip)]
    pub mode: ChatMode,
}

impl ChatRequest {
    pub fn new(prompt: impl Into<String>, session_id: impl Into<String>, mode: ChatMode) -> Self {
        Self {
            prompt: prompt.into(),
            session_id: session_id.into(),
            mode,
        }
    }
}

/// Body of a history clear request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClearRequest {
    pub session_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_body_has_prompt_and_session_only() {
        let request = ChatRequest::new("hello", "default", ChatMode::MultiAgent);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"prompt": "hello", "session_id": "default"})
        );
    }

    #[test]
    fn test_clear_request_body() {
        let request = ClearRequest {
            session_id: "abc".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"session_id":"abc"}"#
        );
    }
}

// src/message.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowRunRequest {
    pub input_value: String,
    pub input_type: String,
    pub output_type: String,
    pub session_id: String,
}

impl FlowRunRequest {
    pub fn chat(input_value: impl Into<String>) -> Self {
        Self {
            input_value: input_value.into(),
            input_type: "chat".to_string(),
            output_type: "chat".to_string(),
            session_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Error body used by the proxy. Absent `error` fields decode as empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: String,
}

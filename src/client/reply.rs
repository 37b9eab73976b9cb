// src/client/reply.rs
//! Pulling display text out of whatever the flow backend returned.

use serde_json::Value;

pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process that response.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyShape {
    /// `outputs[0].outputs[0].results.message.text`
    FlowOutput(String),
    /// Top-level `result` string.
    Result(String),
    Unrecognized,
}

impl ReplyShape {
    pub fn decode(data: &Value) -> Self {
        if let Some(text) = data
            .pointer("/outputs/0/outputs/0/results/message/text")
            .and_then(Value::as_str)
        {
            return ReplyShape::FlowOutput(text.to_string());
        }

        match data.get("result").and_then(Value::as_str) {
            Some(text) if !text.is_empty() => ReplyShape::Result(text.to_string()),
            _ => ReplyShape::Unrecognized,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ReplyShape::FlowOutput(text) | ReplyShape::Result(text) => text,
            ReplyShape::Unrecognized => FALLBACK_REPLY.to_string(),
        }
    }
}

/// Never fails: unknown layouts yield [`FALLBACK_REPLY`].
pub fn extract_reply_text(data: &Value) -> String {
    let shape = ReplyShape::decode(data);
    if !matches!(shape, ReplyShape::FlowOutput(_)) {
        tracing::warn!(shape = ?shape, "reply missing flow output path");
    }
    shape.into_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_flow_output() {
        let data = json!({"outputs":[{"outputs":[{"results":{"message":{"text":"Hello"}}}]}]});
        assert_eq!(ReplyShape::decode(&data), ReplyShape::FlowOutput("Hello".into()));
        assert_eq!(extract_reply_text(&data), "Hello");
    }

    #[test]
    fn result_fallback() {
        let data = json!({"result": "Fallback text"});
        assert_eq!(extract_reply_text(&data), "Fallback text");
    }

    #[test]
    fn empty_object_uses_default() {
        assert_eq!(extract_reply_text(&json!({})), FALLBACK_REPLY);
    }

    #[test]
    fn malformed_nesting_falls_through_to_result() {
        let data = json!({"outputs": [], "result": "from result"});
        assert_eq!(extract_reply_text(&data), "from result");

        let data = json!({"outputs":[{"outputs":[{"results":{"message":{"text": 42}}}]}]});
        assert_eq!(ReplyShape::decode(&data), ReplyShape::Unrecognized);
    }

    #[test]
    fn flow_output_wins_over_result() {
        let data = json!({
            "outputs":[{"outputs":[{"results":{"message":{"text":"nested"}}}]}],
            "result": "top"
        });
        assert_eq!(extract_reply_text(&data), "nested");
    }

    #[test]
    fn non_object_payloads_do_not_panic() {
        assert_eq!(extract_reply_text(&json!(null)), FALLBACK_REPLY);
        assert_eq!(extract_reply_text(&json!([1, 2])), FALLBACK_REPLY);
        assert_eq!(extract_reply_text(&json!({"result": ""})), FALLBACK_REPLY);
    }
}

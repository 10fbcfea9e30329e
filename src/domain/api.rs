//! Chat turn request/response schema

use serde::{Deserialize, Serialize};

use super::{ChatMessage, DayPlan, Preferences};

/// One inbound chat turn
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    /// Client-provided session identifier; generated when absent
    #[serde(default)]
    pub session_id: Option<String>,

    pub message: String,

    /// Explicit parameter overrides for this turn
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

/// Outcome of one chat turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,

    /// Full session history, including the assistant reply for this turn
    pub messages: Vec<ChatMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_plan: Option<Vec<DayPlan>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarifying_questions: Option<Vec<String>>,

    pub status: TurnStatus,
}

/// Whether the turn produced a plan or halted on missing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    Ok,
    NeedsClarification,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_with_only_message() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "hello"}"#).unwrap();
        assert!(req.session_id.is_none());
        assert!(req.preferences.is_none());
        assert_eq!(req.message, "hello");
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&TurnStatus::Ok).unwrap(), "\"ok\"");
        assert_eq!(
            serde_json::to_string(&TurnStatus::NeedsClarification).unwrap(),
            "\"needs_clarification\""
        );
    }

    #[test]
    fn test_empty_day_plan_omitted() {
        let resp = ChatResponse {
            session_id: "s1".into(),
            messages: vec![],
            day_plan: None,
            clarifying_questions: Some(vec!["Where are you starting?".into()]),
            status: TurnStatus::NeedsClarification,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("day_plan").is_none());
        assert!(json.get("clarifying_questions").is_some());
    }
}

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use crate::utils::record::id_string;

/// Canonical error record. Created only through ingestion; only `status`
/// and `severity` are mutable afterwards. The jsonb-style metadata fields
/// are opaque documents preserved verbatim through ingestion.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ErrorEvent {
    pub id: RecordId,
    pub project_id: RecordId,
    pub event_type: String, // 'error', 'warning', 'crash', free form
    pub status: String,     // 'unresolved', 'resolved', 'ignored', free form
    pub severity: String,   // 'low', 'medium', 'high', 'critical', free form
    pub message: String,
    pub stack_trace: Option<String>,
    pub device_info: Option<serde_json::Value>,
    pub platform_info: Option<serde_json::Value>,
    pub tags: Option<serde_json::Value>,
    pub breadcrumbs: Option<serde_json::Value>,
    pub user_name: Option<String>,
    pub trace_id: Option<String>,
    pub occurred_at: String,
    pub created_at: String, // server ingestion time, immutable
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateErrorEvent {
    pub project_id: RecordId,
    pub event_type: String,
    pub status: String,
    pub severity: String,
    pub message: String,
    pub stack_trace: Option<String>,
    pub device_info: Option<serde_json::Value>,
    pub platform_info: Option<serde_json::Value>,
    pub tags: Option<serde_json::Value>,
    pub breadcrumbs: Option<serde_json::Value>,
    pub user_name: Option<String>,
    pub trace_id: Option<String>,
    pub occurred_at: String,
    pub created_at: String,
}

/// Raw SDK payload. Authenticated by `apiKey` alone; everything past
/// `type` and `message` is optional.
#[derive(Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    #[validate(length(min = 1, message = "API key is required"))]
    pub api_key: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub event_type: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub stack_trace: Option<String>,
    pub device_info: Option<serde_json::Value>,
    pub platform_info: Option<serde_json::Value>,
    pub tags: Option<serde_json::Value>,
    pub breadcrumbs: Option<serde_json::Value>,
    pub occurred_at: Option<String>,
    pub severity: Option<String>,
    /// Legacy SDKs send `level` instead of `severity`.
    pub level: Option<String>,
    pub status: Option<String>,
    pub trace_id: Option<String>,
    pub user_name: Option<String>,
}

impl IngestRequest {
    /// Normalizes the payload into the canonical record:
    /// severity falls back `severity` -> `level` -> "medium", status
    /// defaults to "unresolved", `occurred_at` defaults to `now`, and
    /// `created_at` is always `now`.
    pub fn into_event(self, project_id: RecordId, now: String) -> CreateErrorEvent {
        let severity = self
            .severity
            .filter(|s| !s.is_empty())
            .or(self.level)
            .unwrap_or_else(|| "medium".to_string());
        let status = self.status.unwrap_or_else(|| "unresolved".to_string());

        CreateErrorEvent {
            project_id,
            event_type: self.event_type,
            status,
            severity,
            message: self.message,
            stack_trace: self.stack_trace,
            device_info: self.device_info,
            platform_info: self.platform_info,
            tags: self.tags,
            breadcrumbs: self.breadcrumbs,
            user_name: self.user_name,
            trace_id: self.trace_id,
            occurred_at: self.occurred_at.unwrap_or_else(|| now.clone()),
            created_at: now,
        }
    }
}

/// Restricted update: only status and severity are mutable, anything else
/// in the payload is ignored.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub status: Option<String>,
    pub severity: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: String,
    pub project_id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub status: String,
    pub severity: String,
    pub message: String,
    pub stack_trace: Option<String>,
    pub device_info: Option<serde_json::Value>,
    pub platform_info: Option<serde_json::Value>,
    pub tags: Option<serde_json::Value>,
    pub breadcrumbs: Option<serde_json::Value>,
    pub user_name: Option<String>,
    pub trace_id: Option<String>,
    pub occurred_at: String,
    pub created_at: String,
}

impl EventResponse {
    pub fn from_event(event: &ErrorEvent) -> Self {
        Self {
            id: id_string(&event.id),
            project_id: id_string(&event.project_id),
            event_type: event.event_type.clone(),
            status: event.status.clone(),
            severity: event.severity.clone(),
            message: event.message.clone(),
            stack_trace: event.stack_trace.clone(),
            device_info: event.device_info.clone(),
            platform_info: event.platform_info.clone(),
            tags: event.tags.clone(),
            breadcrumbs: event.breadcrumbs.clone(),
            user_name: event.user_name.clone(),
            trace_id: event.trace_id.clone(),
            occurred_at: event.occurred_at.clone(),
            created_at: event.created_at.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(severity: Option<&str>, level: Option<&str>, status: Option<&str>) -> IngestRequest {
        IngestRequest {
            api_key: "k".repeat(64),
            event_type: "crash".into(),
            message: "boom".into(),
            stack_trace: None,
            device_info: None,
            platform_info: None,
            tags: None,
            breadcrumbs: None,
            occurred_at: None,
            severity: severity.map(Into::into),
            level: level.map(Into::into),
            status: status.map(Into::into),
            trace_id: None,
            user_name: None,
        }
    }

    fn project() -> RecordId {
        RecordId::from_table_key("projects", "p1")
    }

    #[test]
    fn test_severity_prefers_explicit_value() {
        let event = request(Some("high"), Some("low"), None).into_event(project(), "t0".into());
        assert_eq!(event.severity, "high");
    }

    #[test]
    fn test_severity_falls_back_to_legacy_level() {
        let event = request(None, Some("critical"), None).into_event(project(), "t0".into());
        assert_eq!(event.severity, "critical");

        // empty severity counts as absent
        let event = request(Some(""), Some("low"), None).into_event(project(), "t0".into());
        assert_eq!(event.severity, "low");
    }

    #[test]
    fn test_severity_and_status_defaults() {
        let event = request(None, None, None).into_event(project(), "t0".into());
        assert_eq!(event.severity, "medium");
        assert_eq!(event.status, "unresolved");
    }

    #[test]
    fn test_supplied_status_wins() {
        let event = request(None, None, Some("resolved")).into_event(project(), "t0".into());
        assert_eq!(event.status, "resolved");
    }

    #[test]
    fn test_occurred_at_defaults_to_ingestion_time() {
        let event = request(None, None, None).into_event(project(), "t0".into());
        assert_eq!(event.occurred_at, "t0");
        assert_eq!(event.created_at, "t0");

        let mut req = request(None, None, None);
        req.occurred_at = Some("t-earlier".into());
        let event = req.into_event(project(), "t0".into());
        assert_eq!(event.occurred_at, "t-earlier");
        assert_eq!(event.created_at, "t0");
    }

    #[test]
    fn test_opaque_metadata_is_preserved() {
        let mut req = request(None, None, None);
        req.device_info = Some(json!({"os": "ios", "version": 17}));
        req.breadcrumbs = Some(json!([{"action": "tap"}, {"action": "scroll"}]));
        let event = req.into_event(project(), "t0".into());
        assert_eq!(event.device_info, Some(json!({"os": "ios", "version": 17})));
        assert_eq!(
            event.breadcrumbs,
            Some(json!([{"action": "tap"}, {"action": "scroll"}]))
        );
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved analysis session as managed by the backend's study endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Study {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub audit_id: Option<String>,
    #[serde(default)]
    pub status: StudyStatus,
    #[serde(default)]
    pub shared: bool,
    #[serde(default)]
    pub share_token: Option<String>,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StudyStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
}

/// Wizard progress snapshot saved to and restored from the backend. The
/// state payload is opaque JSON so the backend never needs to understand
/// wizard internals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudyProgress {
    pub step: String,
    #[serde(default)]
    pub audit_id: Option<String>,
    pub state: serde_json::Value,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_study_minimal_deserialize() {
        let study: Study = serde_json::from_str(r#"{"id": "s1", "name": "Acme Q3"}"#).unwrap();
        assert_eq!(study.status, StudyStatus::Draft);
        assert!(!study.shared);
        assert!(study.share_token.is_none());
        assert!(!study.is_template);
    }

    #[test]
    fn test_progress_round_trip() {
        let progress = StudyProgress {
            step: "topics".to_string(),
            audit_id: Some("a1".to_string()),
            state: serde_json::json!({"topics": ["Pricing"]}),
            saved_at: None,
        };
        let json = serde_json::to_string(&progress).unwrap();
        let back: StudyProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, progress);
    }
}

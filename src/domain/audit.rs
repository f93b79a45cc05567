use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One complete brand-analysis session, identified by an opaque ID issued
/// by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Audit {
    pub id: String,
    pub brand_name: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub status: AuditStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    #[default]
    Draft,
    SetupComplete,
    Complete,
}

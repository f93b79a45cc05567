use serde::{Deserialize, Serialize};

/// Status of an asynchronous backend analysis run, polled rather than
/// stored locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisJobStatus {
    pub job_id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub progress_percentage: f32,
    #[serde(default)]
    pub completed_queries: usize,
    #[serde(default)]
    pub total_queries: usize,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
    PartialFailure,
}

impl JobStatus {
    /// Polling stops on the first terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::PartialFailure
        )
    }
}

/// Flat join inputs for the fallback aggregation path. Every array is
/// optional on the wire; a missing array deserializes empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResults {
    #[serde(default)]
    pub responses: Vec<ResponseRecord>,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub brand_mentions: Vec<BrandMention>,
    #[serde(default)]
    pub personas: Vec<PersonaRecord>,
    #[serde(default)]
    pub topics: Vec<TopicRecord>,
    #[serde(default)]
    pub queries: Vec<QueryRecord>,
}

/// One AI-generated answer to one query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseRecord {
    pub id: String,
    pub query_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// One question as actually issued to the providers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryRecord {
    pub id: String,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub persona_id: Option<String>,
    #[serde(default)]
    pub topic_name: Option<String>,
}

/// A brand name found within a response, with optional sentiment and
/// character position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrandMention {
    pub id: String,
    pub response_id: String,
    pub brand_name: String,
    #[serde(default)]
    pub is_target_brand: bool,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub position: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Citation {
    pub id: String,
    pub response_id: String,
    pub url: String,
}

/// Persona as echoed back in the results payload (denormalized copy of the
/// wizard's persona, reduced to what aggregation needs).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonaRecord {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopicRecord {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

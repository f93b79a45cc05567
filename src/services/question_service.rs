use serde::Deserialize;
use serde_json::json;

use crate::domain::question::Question;
use crate::services::http::{ApiClient, ApiError, Empty};

#[derive(Clone)]
pub struct QuestionService {
    client: ApiClient,
}

#[derive(Debug, Deserialize)]
struct QuestionsEnvelope {
    #[serde(default)]
    questions: Vec<Question>,
}

impl QuestionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Generates questions for every persona x topic pair of the audit.
    pub async fn generate(&self, audit_id: &str) -> Result<Vec<Question>, ApiError> {
        let body = json!({ "audit_id": audit_id });
        let envelope: QuestionsEnvelope =
            self.client.post("/api/questions/generate", &body).await?;
        Ok(envelope.questions)
    }

    pub async fn store(&self, audit_id: &str, questions: &[Question]) -> Result<(), ApiError> {
        let body = json!({ "audit_id": audit_id, "questions": questions });
        let _: Empty = self.client.post("/api/questions/store", &body).await?;
        Ok(())
    }

    /// Re-invokes generation scoped to the given personas. Used after a
    /// partial failure left some personas with too few questions.
    pub async fn retry_failed_personas(
        &self,
        audit_id: &str,
        persona_ids: &[String],
    ) -> Result<Vec<Question>, ApiError> {
        let body = json!({ "audit_id": audit_id, "persona_ids": persona_ids });
        let envelope: QuestionsEnvelope = self
            .client
            .post("/api/questions/retry-failed-personas", &body)
            .await?;
        Ok(envelope.questions)
    }
}

use serde::Deserialize;
use serde_json::json;

use crate::domain::persona::Persona;
use crate::domain::topic::Topic;
use crate::services::http::{ApiClient, ApiError, Empty};

#[derive(Clone)]
pub struct PersonasService {
    client: ApiClient,
}

#[derive(Debug, Deserialize)]
struct PersonasEnvelope {
    #[serde(default)]
    personas: Vec<Persona>,
}

impl PersonasService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Generates personas from the audit's topics.
    pub async fn generate(
        &self,
        audit_id: &str,
        topics: &[Topic],
    ) -> Result<Vec<Persona>, ApiError> {
        let body = json!({ "audit_id": audit_id, "topics": topics });
        let envelope: PersonasEnvelope =
            self.client.post("/api/personas/generate", &body).await?;
        Ok(envelope.personas)
    }

    pub async fn store(&self, audit_id: &str, personas: &[Persona]) -> Result<(), ApiError> {
        let body = json!({ "audit_id": audit_id, "personas": personas });
        let _: Empty = self.client.post("/api/personas/store", &body).await?;
        Ok(())
    }

    pub async fn by_audit(&self, audit_id: &str) -> Result<Vec<Persona>, ApiError> {
        let path = format!("/api/personas/by-audit/{}", audit_id);
        let envelope: PersonasEnvelope = self.client.get(&path).await?;
        Ok(envelope.personas)
    }
}

use serde::Deserialize;
use serde_json::json;

use crate::domain::study::{Study, StudyProgress};
use crate::services::http::{ApiClient, ApiError, Empty};

/// Study CRUD plus progress save/restore, sharing and templates. All
/// persistence lives on the backend; this is request shaping only.
#[derive(Clone)]
pub struct StudyService {
    client: ApiClient,
}

#[derive(Debug, Deserialize)]
struct StudiesEnvelope {
    #[serde(default)]
    studies: Vec<Study>,
}

#[derive(Debug, Deserialize)]
struct ShareResponse {
    share_token: String,
}

impl StudyService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<Study, ApiError> {
        self.client
            .post(
                "/api/studies",
                &json!({ "name": name, "description": description }),
            )
            .await
    }

    pub async fn get(&self, study_id: &str) -> Result<Study, ApiError> {
        self.client.get(&format!("/api/studies/{}", study_id)).await
    }

    pub async fn list(&self) -> Result<Vec<Study>, ApiError> {
        let envelope: StudiesEnvelope = self.client.get("/api/studies").await?;
        Ok(envelope.studies)
    }

    pub async fn update(&self, study: &Study) -> Result<Study, ApiError> {
        let path = format!("/api/studies/{}", study.id);
        self.client.put(&path, study).await
    }

    pub async fn delete(&self, study_id: &str) -> Result<(), ApiError> {
        let path = format!("/api/studies/{}", study_id);
        let _: Empty = self.client.delete(&path).await?;
        Ok(())
    }

    pub async fn save_progress(
        &self,
        study_id: &str,
        progress: &StudyProgress,
    ) -> Result<(), ApiError> {
        let path = format!("/api/studies/{}/progress", study_id);
        let _: Empty = self.client.put(&path, progress).await?;
        Ok(())
    }

    pub async fn restore_progress(&self, study_id: &str) -> Result<StudyProgress, ApiError> {
        let path = format!("/api/studies/{}/progress", study_id);
        self.client.get(&path).await
    }

    /// Issues a share token for read-only access to a finished study.
    pub async fn share(&self, study_id: &str) -> Result<String, ApiError> {
        let path = format!("/api/studies/{}/share", study_id);
        let response: ShareResponse = self.client.post(&path, &json!({})).await?;
        Ok(response.share_token)
    }

    pub async fn shared(&self, token: &str) -> Result<Study, ApiError> {
        let path = format!("/api/studies/shared/{}", token);
        self.client.get(&path).await
    }

    pub async fn templates(&self) -> Result<Vec<Study>, ApiError> {
        let envelope: StudiesEnvelope = self.client.get("/api/studies/templates").await?;
        Ok(envelope.studies)
    }

    pub async fn create_from_template(
        &self,
        template_id: &str,
        name: &str,
    ) -> Result<Study, ApiError> {
        let path = format!("/api/studies/templates/{}", template_id);
        self.client.post(&path, &json!({ "name": name })).await
    }
}

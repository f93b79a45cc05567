use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::domain::analysis::{AnalysisJobStatus, AnalysisResults};
use crate::domain::report::ComprehensiveReport;
use crate::services::http::{ApiClient, ApiError};
use crate::services::polling::StatusProvider;

#[derive(Clone)]
pub struct AnalysisService {
    client: ApiClient,
}

#[derive(Debug, Deserialize)]
struct StartResponse {
    job_id: String,
}

impl AnalysisService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Launches the asynchronous analysis job and returns its id.
    pub async fn start(&self, audit_id: &str) -> Result<String, ApiError> {
        let response: StartResponse = self
            .client
            .post("/api/analysis/start", &json!({ "audit_id": audit_id }))
            .await?;
        Ok(response.job_id)
    }

    pub async fn status(&self, job_id: &str) -> Result<AnalysisJobStatus, ApiError> {
        let path = format!("/api/analysis/status/{}", job_id);
        self.client.get(&path).await
    }

    /// Raw flat result arrays, input to the fallback aggregation path.
    pub async fn results(&self, audit_id: &str) -> Result<AnalysisResults, ApiError> {
        let path = format!("/api/analysis/results/{}", audit_id);
        self.client.get(&path).await
    }

    /// Pre-aggregated report payload, input to the optimized path.
    pub async fn comprehensive_report(
        &self,
        audit_id: &str,
    ) -> Result<ComprehensiveReport, ApiError> {
        let path = format!("/api/analysis/comprehensive-report/{}", audit_id);
        self.client.get(&path).await
    }
}

#[async_trait]
impl StatusProvider for AnalysisService {
    async fn job_status(&self, job_id: &str) -> Result<AnalysisJobStatus, ApiError> {
        self.status(job_id).await
    }
}

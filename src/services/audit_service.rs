use serde_json::json;

use crate::domain::audit::Audit;
use crate::services::http::{ApiClient, ApiError, Empty};

#[derive(Clone)]
pub struct AuditService {
    client: ApiClient,
}

impl AuditService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        brand_name: &str,
        product_id: Option<&str>,
    ) -> Result<Audit, ApiError> {
        self.client
            .post(
                "/api/audits/create",
                &json!({ "brand_name": brand_name, "product_id": product_id }),
            )
            .await
    }

    /// Marks the wizard setup phase finished. Must precede starting the
    /// analysis job.
    pub async fn mark_setup_complete(&self, audit_id: &str) -> Result<(), ApiError> {
        let path = format!("/api/audits/{}/mark-setup-complete", audit_id);
        let _: Empty = self.client.put(&path, &json!({})).await?;
        Ok(())
    }

    pub async fn complete(&self, audit_id: &str) -> Result<(), ApiError> {
        let path = format!("/api/audits/{}/complete", audit_id);
        let _: Empty = self.client.put(&path, &json!({})).await?;
        Ok(())
    }
}

use serde::Deserialize;
use serde_json::json;

use crate::domain::brand::BrandEntity;
use crate::services::http::{ApiClient, ApiError, Empty};

/// Thin wrapper over the backend's brand endpoints. Request shaping only;
/// the backend owns all brand analysis logic.
#[derive(Clone)]
pub struct BrandService {
    client: ApiClient,
}

#[derive(Debug, Deserialize)]
struct CreateBrandResponse {
    id: String,
}

impl BrandService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Registers the brand with the backend and returns its issued id.
    pub async fn create(&self, brand: &BrandEntity) -> Result<String, ApiError> {
        let response: CreateBrandResponse =
            self.client.post("/api/brands/create", brand).await?;
        Ok(response.id)
    }

    /// Asks the backend to analyze a website and suggest a brand entity
    /// (name, aliases, description) for the user to confirm or edit.
    pub async fn analyze(&self, website: &str) -> Result<BrandEntity, ApiError> {
        self.client
            .post("/api/brands/analyze", &json!({ "website": website }))
            .await
    }

    pub async fn update(&self, brand: &BrandEntity) -> Result<(), ApiError> {
        let _: Empty = self.client.post("/api/brands/update", brand).await?;
        Ok(())
    }
}

use serde::Deserialize;
use serde_json::json;

use crate::domain::brand::{BrandEntity, Product};
use crate::domain::topic::Topic;
use crate::services::http::{ApiClient, ApiError};

#[derive(Clone)]
pub struct TopicsService {
    client: ApiClient,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

impl TopicsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Generates topic suggestions for a brand/product pair. The backend
    /// has returned both a bare array and a `{topics: [...]}` envelope
    /// across versions; both shapes are accepted.
    pub async fn generate(
        &self,
        brand: &BrandEntity,
        product: Option<&Product>,
    ) -> Result<Vec<Topic>, ApiError> {
        let body = json!({
            "brand": brand,
            "product": product,
        });
        let value: serde_json::Value = self.client.post("/api/topics/generate", &body).await?;
        parse_topics(value)
    }

    pub async fn health(&self) -> Result<bool, ApiError> {
        let response: HealthResponse = self.client.get("/api/topics/health").await?;
        Ok(response.status == "ok" || response.status == "healthy")
    }

    pub async fn update(&self, topic: &Topic) -> Result<Topic, ApiError> {
        let path = format!("/api/topics/{}", topic.id);
        self.client.put(&path, topic).await
    }
}

fn parse_topics(value: serde_json::Value) -> Result<Vec<Topic>, ApiError> {
    let unwrapped = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(mut map) => match map.remove("topics") {
            Some(inner) => inner,
            None => serde_json::Value::Object(map),
        },
        other => other,
    };
    serde_json::from_value(unwrapped).map_err(|source| ApiError::Decode {
        path: "/api/topics/generate".to_string(),
        source,
    })
}

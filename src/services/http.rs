use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::config::AppConfig;

/// Errors surfaced by the backend API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {detail}")]
    Backend { status: u16, detail: String },

    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },

    #[error("analysis polling timed out after {0:?}")]
    PollTimeout(Duration),
}

/// Shared HTTP client for the remote backend. Cheap to clone; every service
/// holds its own copy.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.get(self.url(path)).timeout(self.timeout);
        self.execute(path, request).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.http.post(self.url(path)).json(body).timeout(self.timeout);
        self.execute(path, request).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.http.put(self.url(path)).json(body).timeout(self.timeout);
        self.execute(path, request).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.delete(self.url(path)).timeout(self.timeout);
        self.execute(path, request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Backend {
                status: status.as_u16(),
                detail: normalize_error_detail(&body, status.as_u16()),
            });
        }

        // Some mutation endpoints reply with an empty body on success.
        let body = if body.trim().is_empty() { "null" } else { &body };
        serde_json::from_str(body).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

/// Normalizes an error body into a single message. The backend sends a
/// `detail` field that is either a plain string or a FastAPI-style
/// validation-error array (`[{loc, msg, type}]`); anything else falls back
/// to the HTTP status.
pub fn normalize_error_detail(body: &str, status: u16) -> String {
    let fallback = || format!("request failed with status {}", status);

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback();
    };

    match value.get("detail") {
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(serde_json::Value::Array(errors)) => {
            let messages: Vec<String> = errors
                .iter()
                .filter_map(|error| {
                    let msg = error.get("msg")?.as_str()?;
                    match error.get("loc").and_then(|loc| loc.as_array()) {
                        Some(loc) => {
                            let field = loc
                                .iter()
                                .filter_map(|part| part.as_str())
                                .collect::<Vec<_>>()
                                .join(".");
                            if field.is_empty() {
                                Some(msg.to_string())
                            } else {
                                Some(format!("{}: {}", field, msg))
                            }
                        }
                        None => Some(msg.to_string()),
                    }
                })
                .collect();
            if messages.is_empty() {
                fallback()
            } else {
                messages.join("; ")
            }
        }
        _ => fallback(),
    }
}

/// Responses that carry nothing the caller needs. Deserializes from any
/// JSON value, including `null` and `{}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

impl<'de> serde::Deserialize<'de> for Empty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_string_detail() {
        let body = r#"{"detail": "Audit not found"}"#;
        assert_eq!(normalize_error_detail(body, 404), "Audit not found");
    }

    #[test]
    fn test_normalize_validation_array() {
        let body = r#"{"detail": [
            {"loc": ["body", "brand_name"], "msg": "field required", "type": "value_error.missing"},
            {"loc": ["body", "website"], "msg": "invalid url", "type": "value_error.url"}
        ]}"#;
        assert_eq!(
            normalize_error_detail(body, 422),
            "body.brand_name: field required; body.website: invalid url"
        );
    }

    #[test]
    fn test_normalize_falls_back_on_garbage() {
        assert_eq!(
            normalize_error_detail("<html>Bad Gateway</html>", 502),
            "request failed with status 502"
        );
        assert_eq!(
            normalize_error_detail(r#"{"error": "nope"}"#, 500),
            "request failed with status 500"
        );
    }

    #[test]
    fn test_normalize_empty_validation_array() {
        assert_eq!(
            normalize_error_detail(r#"{"detail": []}"#, 422),
            "request failed with status 422"
        );
    }

    #[test]
    fn test_empty_accepts_any_body() {
        let _: Empty = serde_json::from_str("null").unwrap();
        let _: Empty = serde_json::from_str("{}").unwrap();
        let _: Empty = serde_json::from_str(r#"{"ok": true}"#).unwrap();
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let mut config = AppConfig::default();
        config.api_base_url = "https://api.example.com/".to_string();
        let client = ApiClient::new(&config);
        assert_eq!(client.base_url(), "https://api.example.com");
    }
}

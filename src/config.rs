use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "https://brandscope-backend.fly.dev";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 600;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Completeness heuristic: personas with fewer generated questions than this
// are offered for retry. Untuned placeholder, kept configurable.
const DEFAULT_QUESTIONS_PER_PERSONA: usize = 8;

/// Application-wide configuration, read from environment variables with
/// hardcoded defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub poll_timeout: Duration,
    pub database_path: String,
    pub questions_per_persona: usize,
    pub recommendations: RecommendationConfig,
}

/// Parameters of the strategic-recommendation heuristics. These are
/// placeholder values, not validated business rules, so they live here
/// rather than as inline literals.
#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    pub potential_cap: u32,
    pub potential_uplift: u32,
    pub potential_floor: u32,
    pub high_impact_gap: u32,
    pub medium_impact_gap: u32,
    pub high_effort_score: u32,
    pub complex_name_markers: Vec<String>,
    pub gap_weight: f64,
    pub impact_weight: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            potential_cap: 85,
            potential_uplift: 20,
            potential_floor: 45,
            high_impact_gap: 40,
            medium_impact_gap: 20,
            high_effort_score: 25,
            complex_name_markers: vec![
                "enterprise".to_string(),
                "technical".to_string(),
                "comparative".to_string(),
            ],
            gap_weight: 0.6,
            impact_weight: 0.4,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            poll_timeout: Duration::from_secs(DEFAULT_POLL_TIMEOUT_SECS),
            database_path: "brandscope.db".to_string(),
            questions_per_persona: DEFAULT_QUESTIONS_PER_PERSONA,
            recommendations: RecommendationConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: std::env::var("BRANDSCOPE_API_URL")
                .unwrap_or(defaults.api_base_url),
            request_timeout: env_secs("BRANDSCOPE_REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout),
            poll_interval: env_secs("BRANDSCOPE_POLL_INTERVAL_SECS")
                .unwrap_or(defaults.poll_interval),
            poll_timeout: env_secs("BRANDSCOPE_POLL_TIMEOUT_SECS")
                .unwrap_or(defaults.poll_timeout),
            database_path: std::env::var("BRANDSCOPE_DB")
                .unwrap_or(defaults.database_path),
            questions_per_persona: std::env::var("BRANDSCOPE_QUESTIONS_PER_PERSONA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.questions_per_persona),
            recommendations: defaults.recommendations,
        }
    }
}

fn env_secs(key: &str) -> Option<Duration> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
}

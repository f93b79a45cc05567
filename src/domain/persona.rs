use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Synthetic target-customer profile used to scope generated questions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Persona {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pain_points: Vec<String>,
    #[serde(default)]
    pub motivators: Vec<String>,
    #[serde(default)]
    pub demographics: Demographics,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Demographics {
    #[serde(default)]
    pub age_range: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Persona {
    pub fn new(name: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            pain_points: Vec::new(),
            motivators: Vec::new(),
            demographics: Demographics::default(),
        }
    }
}

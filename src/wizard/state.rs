use serde::{Deserialize, Serialize};

use crate::domain::brand::{BrandEntity, Product};
use crate::domain::persona::Persona;
use crate::domain::question::Question;
use crate::domain::topic::Topic;

/// The fixed five-step sequence. Forward navigation is gated by
/// [`WizardState::validate_current_step`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    #[default]
    BrandInfo,
    Topics,
    Personas,
    Questions,
    Review,
}

pub const STEP_SEQUENCE: [WizardStep; 5] = [
    WizardStep::BrandInfo,
    WizardStep::Topics,
    WizardStep::Personas,
    WizardStep::Questions,
    WizardStep::Review,
];

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::BrandInfo => "brand-info",
            WizardStep::Topics => "topics",
            WizardStep::Personas => "personas",
            WizardStep::Questions => "questions",
            WizardStep::Review => "review",
        }
    }

    pub fn parse(value: &str) -> Option<WizardStep> {
        STEP_SEQUENCE.iter().copied().find(|s| s.as_str() == value)
    }

    pub fn next(&self) -> Option<WizardStep> {
        let index = STEP_SEQUENCE.iter().position(|s| s == self)?;
        STEP_SEQUENCE.get(index + 1).copied()
    }

    pub fn prev(&self) -> Option<WizardStep> {
        let index = STEP_SEQUENCE.iter().position(|s| s == self)?;
        index.checked_sub(1).map(|i| STEP_SEQUENCE[i])
    }
}

/// Tracks whether a generation call was already attempted for a step, so a
/// re-entered step does not fire a duplicate remote call.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationAttempts {
    pub topics: bool,
    pub personas: bool,
    pub questions: bool,
}

/// Mutable wizard state: the current step plus every collection the steps
/// edit. All persistence is remote; this struct is plain memory.
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub brand: Option<BrandEntity>,
    pub products: Vec<Product>,
    pub topics: Vec<Topic>,
    pub personas: Vec<Persona>,
    pub questions: Vec<Question>,
    pub audit_id: Option<String>,
    pub job_id: Option<String>,
    pub analysis_loading: bool,
    pub attempts: GenerationAttempts,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-step predicate gating forward navigation.
    pub fn validate_current_step(&self) -> Result<(), String> {
        match self.current_step {
            WizardStep::BrandInfo => {
                let brand = self.brand.as_ref().ok_or("Brand info is required")?;
                if brand.name.trim().is_empty() {
                    return Err("Brand name is required".to_string());
                }
                if brand.website.trim().is_empty() {
                    return Err("Brand website is required".to_string());
                }
                if self.audit_id.is_none() {
                    return Err("No audit has been created yet".to_string());
                }
                Ok(())
            }
            WizardStep::Topics => {
                if self.topics.is_empty() {
                    return Err("At least one topic is required".to_string());
                }
                if self.audit_id.is_none() {
                    return Err("No audit has been created yet".to_string());
                }
                Ok(())
            }
            WizardStep::Personas => {
                if self.personas.is_empty() {
                    return Err("At least one persona is required".to_string());
                }
                Ok(())
            }
            WizardStep::Questions => {
                if self.questions.is_empty() {
                    return Err("At least one question is required".to_string());
                }
                Ok(())
            }
            WizardStep::Review => Ok(()),
        }
    }

    /// Advances to the next step if the current one validates.
    pub fn advance(&mut self) -> Result<WizardStep, String> {
        self.validate_current_step()?;
        match self.current_step.next() {
            Some(step) => {
                self.current_step = step;
                Ok(step)
            }
            None => Err("Already at the final step".to_string()),
        }
    }

    /// Backward navigation is never gated.
    pub fn back(&mut self) -> Option<WizardStep> {
        let step = self.current_step.prev()?;
        self.current_step = step;
        Some(step)
    }
}

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::analysis::{AnalysisJobStatus, JobStatus};
use crate::domain::brand::{BrandEntity, Product};
use crate::domain::persona::Persona;
use crate::domain::question::{Question, questions_per_persona};
use crate::domain::report::ReportData;
use crate::domain::study::StudyProgress;
use crate::domain::topic::{Topic, TopicEdit};
use crate::report::{ReportAggregator, load_report};
use crate::services::http::ApiError;
use crate::services::polling::{JobPoller, StatusProvider};
use crate::session::{ResumeToken, SessionStore};
use crate::wizard::backend::WizardBackend;
use crate::wizard::commands::{QuestionEditCommand, TopicEditCommand};
use crate::wizard::state::{WizardState, WizardStep};

/// Orchestrates the wizard: owns the state, gates step navigation, calls
/// the backend through the [`WizardBackend`] seam, and drives the analysis
/// phase. No failure here is fatal; every error propagates to the caller,
/// who can retry or navigate back.
pub struct WizardController {
    config: AppConfig,
    state: WizardState,
    backend: Arc<dyn WizardBackend>,
    session: SessionStore,
    study_id: String,
}

/// Serializable slice of the wizard state for study progress save/restore.
#[derive(Debug, Serialize, Deserialize)]
struct SavedCollections {
    brand: Option<BrandEntity>,
    products: Vec<Product>,
    topics: Vec<Topic>,
    personas: Vec<Persona>,
    questions: Vec<Question>,
    audit_id: Option<String>,
    job_id: Option<String>,
}

impl WizardController {
    pub fn new(
        config: AppConfig,
        backend: Arc<dyn WizardBackend>,
        session: SessionStore,
        study_id: String,
    ) -> Self {
        Self {
            config,
            state: WizardState::new(),
            backend,
            session,
            study_id,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn advance(&mut self) -> Result<WizardStep, String> {
        self.state.advance()
    }

    pub fn back(&mut self) -> Option<WizardStep> {
        self.state.back()
    }

    /// Registers the brand and opens the audit that every later step hangs
    /// off.
    pub async fn begin(&mut self, mut brand: BrandEntity, product: Option<Product>) -> Result<()> {
        let brand_id = self
            .backend
            .create_brand(&brand)
            .await
            .context("Failed to register brand")?;
        brand.id = Some(brand_id);

        let audit = self
            .backend
            .create_audit(&brand.name, product.as_ref().map(|p| p.id.as_str()))
            .await
            .context("Failed to create audit")?;

        info!(audit_id = %audit.id, brand = %brand.name, "Audit created");
        self.state.audit_id = Some(audit.id);
        self.state.brand = Some(brand);
        if let Some(product) = product {
            self.state.products.push(product);
        }
        Ok(())
    }

    /// Generates topics unless data already exists or generation was
    /// already attempted. Returns whether a generation call was made.
    pub async fn ensure_topics(&mut self) -> Result<bool> {
        if !self.state.topics.is_empty() || self.state.attempts.topics {
            return Ok(false);
        }
        self.state.attempts.topics = true;

        let brand = self
            .state
            .brand
            .clone()
            .context("Brand info is required before generating topics")?;
        let product = self.state.products.first().cloned();
        let topics = self.backend.generate_topics(&brand, product.as_ref()).await?;

        info!(count = topics.len(), "Generated topics");
        self.state.topics = topics;
        Ok(true)
    }

    pub async fn ensure_personas(&mut self) -> Result<bool> {
        if !self.state.personas.is_empty() || self.state.attempts.personas {
            return Ok(false);
        }
        self.state.attempts.personas = true;

        let audit_id = self.audit_id()?;
        let topics = self.state.topics.clone();
        let personas = self.backend.generate_personas(&audit_id, &topics).await?;
        self.backend.store_personas(&audit_id, &personas).await?;

        info!(count = personas.len(), "Generated personas");
        self.state.personas = personas;
        Ok(true)
    }

    pub async fn ensure_questions(&mut self) -> Result<bool> {
        if !self.state.questions.is_empty() || self.state.attempts.questions {
            return Ok(false);
        }
        self.state.attempts.questions = true;

        let audit_id = self.audit_id()?;
        let questions = self.backend.generate_questions(&audit_id).await?;
        self.backend.store_questions(&audit_id, &questions).await?;

        info!(count = questions.len(), "Generated questions");
        self.state.questions = questions;
        Ok(true)
    }

    /// Optimistic topic edit: applied locally, synced remotely, rolled back
    /// on sync failure.
    pub async fn edit_topic(&mut self, topic_id: &str, edit: TopicEdit) -> Result<Topic> {
        let mut command = TopicEditCommand::new(topic_id.to_string(), edit);
        let updated = command
            .apply(&mut self.state)
            .map_err(anyhow::Error::msg)?;

        match self.backend.sync_topic(&updated).await {
            Ok(synced) => Ok(synced),
            Err(e) => {
                command.rollback(&mut self.state);
                warn!(topic_id = %topic_id, error = %e, "Topic edit failed, change reverted");
                Err(e.context("Topic edit failed and was reverted"))
            }
        }
    }

    pub async fn edit_question(&mut self, question_id: &str, text: String) -> Result<Question> {
        let audit_id = self.audit_id()?;
        let mut command = QuestionEditCommand::new(question_id.to_string(), text);
        let updated = command
            .apply(&mut self.state)
            .map_err(anyhow::Error::msg)?;

        match self
            .backend
            .store_questions(&audit_id, std::slice::from_ref(&updated))
            .await
        {
            Ok(()) => Ok(updated),
            Err(e) => {
                command.rollback(&mut self.state);
                warn!(question_id = %question_id, error = %e, "Question edit failed, change reverted");
                Err(e.context("Question edit failed and was reverted"))
            }
        }
    }

    /// Personas with fewer questions than the configured completeness
    /// threshold.
    pub fn incomplete_personas(&self) -> Vec<String> {
        let counts = questions_per_persona(&self.state.questions);
        self.state
            .personas
            .iter()
            .filter(|p| {
                counts.get(p.id.as_str()).copied().unwrap_or(0) < self.config.questions_per_persona
            })
            .map(|p| p.id.clone())
            .collect()
    }

    /// Re-invokes question generation scoped to incomplete personas and
    /// merges the returned questions. Returns how many were added.
    pub async fn retry_failed_personas(&mut self) -> Result<usize> {
        let persona_ids = self.incomplete_personas();
        if persona_ids.is_empty() {
            return Ok(0);
        }
        let audit_id = self.audit_id()?;
        let questions = self
            .backend
            .retry_failed_personas(&audit_id, &persona_ids)
            .await?;

        let mut added = 0;
        for question in questions {
            match self
                .state
                .questions
                .iter_mut()
                .find(|q| q.id == question.id)
            {
                Some(existing) => *existing = question,
                None => {
                    self.state.questions.push(question);
                    added += 1;
                }
            }
        }
        info!(added, personas = persona_ids.len(), "Retried question generation");
        Ok(added)
    }

    /// Marks setup complete, then starts the analysis job. Failure of
    /// either call aborts the sequence and resets the loading flag; nothing
    /// else was mutated locally.
    pub async fn submit_setup(&mut self) -> Result<()> {
        let audit_id = self.audit_id()?;
        if self.state.products.is_empty()
            || self.state.topics.is_empty()
            || self.state.personas.is_empty()
            || self.state.questions.is_empty()
        {
            anyhow::bail!("Every wizard step must have data before submitting");
        }

        self.state.analysis_loading = true;

        if let Err(e) = self.backend.mark_setup_complete(&audit_id).await {
            self.state.analysis_loading = false;
            return Err(e.context("Failed to mark setup complete"));
        }

        match self.backend.start_analysis(&audit_id).await {
            Ok(job_id) => {
                info!(audit_id = %audit_id, job_id = %job_id, "Analysis started");
                self.state.job_id = Some(job_id);
                self.save_resume_token().await?;
                Ok(())
            }
            Err(e) => {
                self.state.analysis_loading = false;
                Err(e.context("Failed to start analysis"))
            }
        }
    }

    /// Polls the job to a terminal status, then loads the report through
    /// the optimized-with-fallback selection. The resume token is cleared
    /// on any terminal status; a poll timeout keeps it so the session can
    /// be resumed later.
    pub async fn run_analysis(
        &mut self,
        status: &dyn StatusProvider,
        primary: &dyn ReportAggregator,
        fallback: &dyn ReportAggregator,
        on_progress: impl FnMut(&AnalysisJobStatus),
    ) -> Result<ReportData> {
        let audit_id = self.audit_id()?;
        let job_id = self
            .state
            .job_id
            .clone()
            .context("No analysis job to wait for")?;

        let poller = JobPoller::new(&self.config);
        let terminal = match poller.wait_for_terminal(status, &job_id, on_progress).await {
            Ok(terminal) => terminal,
            Err(e @ ApiError::PollTimeout(_)) => {
                return Err(anyhow::Error::new(e)
                    .context("Analysis did not finish in time; resume later to keep waiting"));
            }
            Err(e) => return Err(e.into()),
        };

        self.state.analysis_loading = false;
        self.session.clear(&self.study_id).await?;

        match terminal.status {
            JobStatus::Completed => {}
            JobStatus::PartialFailure => {
                warn!(job_id = %job_id, "Analysis finished with partial failures; retry is available");
            }
            JobStatus::Failed => {
                let detail = terminal.error.unwrap_or_else(|| "unknown error".to_string());
                anyhow::bail!("Analysis failed: {}", detail);
            }
            other => anyhow::bail!("Poller returned non-terminal status {:?}", other),
        }

        Ok(load_report(primary, fallback, &audit_id).await?)
    }

    /// Restores ids and the loading flag from a persisted resume token.
    pub fn resume(&mut self, token: &ResumeToken) -> Result<()> {
        let step = WizardStep::parse(&token.step)
            .with_context(|| format!("Unknown wizard step in resume token: {}", token.step))?;
        self.state.current_step = step;
        self.state.audit_id = Some(token.audit_id.clone());
        self.state.job_id = token.job_id.clone();
        self.state.analysis_loading = token.analysis_loading;
        Ok(())
    }

    /// Snapshot of the collections for the backend's study progress
    /// endpoints.
    pub fn progress_snapshot(&self) -> Result<StudyProgress> {
        let saved = SavedCollections {
            brand: self.state.brand.clone(),
            products: self.state.products.clone(),
            topics: self.state.topics.clone(),
            personas: self.state.personas.clone(),
            questions: self.state.questions.clone(),
            audit_id: self.state.audit_id.clone(),
            job_id: self.state.job_id.clone(),
        };
        Ok(StudyProgress {
            step: self.state.current_step.as_str().to_string(),
            audit_id: self.state.audit_id.clone(),
            state: serde_json::to_value(saved)?,
            saved_at: Some(Utc::now()),
        })
    }

    pub fn restore_progress(&mut self, progress: &StudyProgress) -> Result<()> {
        let step = WizardStep::parse(&progress.step)
            .with_context(|| format!("Unknown wizard step in saved progress: {}", progress.step))?;
        let saved: SavedCollections = serde_json::from_value(progress.state.clone())?;

        self.state.current_step = step;
        self.state.brand = saved.brand;
        self.state.products = saved.products;
        self.state.topics = saved.topics;
        self.state.personas = saved.personas;
        self.state.questions = saved.questions;
        self.state.audit_id = saved.audit_id;
        self.state.job_id = saved.job_id;
        Ok(())
    }

    fn audit_id(&self) -> Result<String> {
        self.state
            .audit_id
            .clone()
            .context("No audit identifier; complete the brand step first")
    }

    async fn save_resume_token(&self) -> Result<()> {
        let token = ResumeToken {
            study_id: self.study_id.clone(),
            audit_id: self.audit_id()?,
            job_id: self.state.job_id.clone(),
            step: self.state.current_step.as_str().to_string(),
            analysis_loading: self.state.analysis_loading,
            saved_at: Utc::now(),
        };
        self.session.save(&token).await
    }
}

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::audit::Audit;
use crate::domain::brand::{BrandEntity, Product};
use crate::domain::persona::Persona;
use crate::domain::question::Question;
use crate::domain::topic::Topic;
use crate::services::{
    AnalysisService, AuditService, BrandService, PersonasService, QuestionService, TopicsService,
};

/// The remote operations the wizard controller needs - allows for mocking
/// in tests without an HTTP server.
#[async_trait]
pub trait WizardBackend: Send + Sync {
    async fn create_brand(&self, brand: &BrandEntity) -> Result<String>;
    async fn create_audit(&self, brand_name: &str, product_id: Option<&str>) -> Result<Audit>;
    async fn generate_topics(
        &self,
        brand: &BrandEntity,
        product: Option<&Product>,
    ) -> Result<Vec<Topic>>;
    async fn sync_topic(&self, topic: &Topic) -> Result<Topic>;
    async fn generate_personas(&self, audit_id: &str, topics: &[Topic]) -> Result<Vec<Persona>>;
    async fn store_personas(&self, audit_id: &str, personas: &[Persona]) -> Result<()>;
    async fn generate_questions(&self, audit_id: &str) -> Result<Vec<Question>>;
    async fn store_questions(&self, audit_id: &str, questions: &[Question]) -> Result<()>;
    async fn retry_failed_personas(
        &self,
        audit_id: &str,
        persona_ids: &[String],
    ) -> Result<Vec<Question>>;
    async fn mark_setup_complete(&self, audit_id: &str) -> Result<()>;
    async fn start_analysis(&self, audit_id: &str) -> Result<String>;
}

/// Production implementation delegating to the per-resource services.
pub struct RemoteBackend {
    brands: BrandService,
    audits: AuditService,
    topics: TopicsService,
    personas: PersonasService,
    questions: QuestionService,
    analysis: AnalysisService,
}

impl RemoteBackend {
    pub fn new(
        brands: BrandService,
        audits: AuditService,
        topics: TopicsService,
        personas: PersonasService,
        questions: QuestionService,
        analysis: AnalysisService,
    ) -> Self {
        Self {
            brands,
            audits,
            topics,
            personas,
            questions,
            analysis,
        }
    }
}

#[async_trait]
impl WizardBackend for RemoteBackend {
    async fn create_brand(&self, brand: &BrandEntity) -> Result<String> {
        Ok(self.brands.create(brand).await?)
    }

    async fn create_audit(&self, brand_name: &str, product_id: Option<&str>) -> Result<Audit> {
        Ok(self.audits.create(brand_name, product_id).await?)
    }

    async fn generate_topics(
        &self,
        brand: &BrandEntity,
        product: Option<&Product>,
    ) -> Result<Vec<Topic>> {
        Ok(self.topics.generate(brand, product).await?)
    }

    async fn sync_topic(&self, topic: &Topic) -> Result<Topic> {
        Ok(self.topics.update(topic).await?)
    }

    async fn generate_personas(&self, audit_id: &str, topics: &[Topic]) -> Result<Vec<Persona>> {
        Ok(self.personas.generate(audit_id, topics).await?)
    }

    async fn store_personas(&self, audit_id: &str, personas: &[Persona]) -> Result<()> {
        Ok(self.personas.store(audit_id, personas).await?)
    }

    async fn generate_questions(&self, audit_id: &str) -> Result<Vec<Question>> {
        Ok(self.questions.generate(audit_id).await?)
    }

    async fn store_questions(&self, audit_id: &str, questions: &[Question]) -> Result<()> {
        Ok(self.questions.store(audit_id, questions).await?)
    }

    async fn retry_failed_personas(
        &self,
        audit_id: &str,
        persona_ids: &[String],
    ) -> Result<Vec<Question>> {
        Ok(self
            .questions
            .retry_failed_personas(audit_id, persona_ids)
            .await?)
    }

    async fn mark_setup_complete(&self, audit_id: &str) -> Result<()> {
        Ok(self.audits.mark_setup_complete(audit_id).await?)
    }

    async fn start_analysis(&self, audit_id: &str) -> Result<String> {
        Ok(self.analysis.start(audit_id).await?)
    }
}

pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Per-operation call counts, for asserting the duplicate-call guards.
    #[derive(Debug, Default, Clone)]
    pub struct CallLog {
        pub create_brand: usize,
        pub create_audit: usize,
        pub generate_topics: usize,
        pub sync_topic: usize,
        pub generate_personas: usize,
        pub generate_questions: usize,
        pub retry_failed_personas: usize,
        pub mark_setup_complete: usize,
        pub start_analysis: usize,
    }

    /// Canned-response backend for tests. Failure flags make individual
    /// operations error without touching the rest.
    #[derive(Default)]
    pub struct StaticBackend {
        pub topics: Vec<Topic>,
        pub personas: Vec<Persona>,
        pub questions: Vec<Question>,
        pub retry_questions: Vec<Question>,
        pub fail_generate_topics: bool,
        pub fail_sync_topic: bool,
        pub fail_mark_setup_complete: bool,
        pub fail_start_analysis: bool,
        pub calls: Mutex<CallLog>,
    }

    impl StaticBackend {
        pub fn call_log(&self) -> CallLog {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WizardBackend for StaticBackend {
        async fn create_brand(&self, _brand: &BrandEntity) -> Result<String> {
            self.calls.lock().unwrap().create_brand += 1;
            Ok("brand-1".to_string())
        }

        async fn create_audit(
            &self,
            brand_name: &str,
            product_id: Option<&str>,
        ) -> Result<Audit> {
            self.calls.lock().unwrap().create_audit += 1;
            Ok(Audit {
                id: "audit-1".to_string(),
                brand_name: brand_name.to_string(),
                product_id: product_id.map(str::to_string),
                status: Default::default(),
                created_at: None,
            })
        }

        async fn generate_topics(
            &self,
            _brand: &BrandEntity,
            _product: Option<&Product>,
        ) -> Result<Vec<Topic>> {
            self.calls.lock().unwrap().generate_topics += 1;
            if self.fail_generate_topics {
                anyhow::bail!("topic generation unavailable");
            }
            Ok(self.topics.clone())
        }

        async fn sync_topic(&self, topic: &Topic) -> Result<Topic> {
            self.calls.lock().unwrap().sync_topic += 1;
            if self.fail_sync_topic {
                anyhow::bail!("topic update rejected");
            }
            Ok(topic.clone())
        }

        async fn generate_personas(
            &self,
            _audit_id: &str,
            _topics: &[Topic],
        ) -> Result<Vec<Persona>> {
            self.calls.lock().unwrap().generate_personas += 1;
            Ok(self.personas.clone())
        }

        async fn store_personas(&self, _audit_id: &str, _personas: &[Persona]) -> Result<()> {
            Ok(())
        }

        async fn generate_questions(&self, _audit_id: &str) -> Result<Vec<Question>> {
            self.calls.lock().unwrap().generate_questions += 1;
            Ok(self.questions.clone())
        }

        async fn store_questions(&self, _audit_id: &str, _questions: &[Question]) -> Result<()> {
            Ok(())
        }

        async fn retry_failed_personas(
            &self,
            _audit_id: &str,
            _persona_ids: &[String],
        ) -> Result<Vec<Question>> {
            self.calls.lock().unwrap().retry_failed_personas += 1;
            Ok(self.retry_questions.clone())
        }

        async fn mark_setup_complete(&self, _audit_id: &str) -> Result<()> {
            self.calls.lock().unwrap().mark_setup_complete += 1;
            if self.fail_mark_setup_complete {
                anyhow::bail!("mark-setup-complete failed");
            }
            Ok(())
        }

        async fn start_analysis(&self, _audit_id: &str) -> Result<String> {
            self.calls.lock().unwrap().start_analysis += 1;
            if self.fail_start_analysis {
                anyhow::bail!("analysis start rejected");
            }
            Ok("job-1".to_string())
        }
    }
}

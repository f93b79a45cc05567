mod analysis_service;
mod audit_service;
mod brand_service;
mod personas_service;
mod question_service;
mod study_service;
mod topics_service;

pub mod http;
pub mod polling;

pub use analysis_service::AnalysisService;
pub use audit_service::AuditService;
pub use brand_service::BrandService;
pub use personas_service::PersonasService;
pub use question_service::QuestionService;
pub use study_service::StudyService;
pub use topics_service::TopicsService;

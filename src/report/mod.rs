pub mod frontend;
pub mod optimized;
pub mod recommendations;
pub mod sources;

use async_trait::async_trait;
use tracing::warn;

use crate::config::RecommendationConfig;
use crate::domain::report::ReportData;
use crate::services::AnalysisService;
use crate::services::http::ApiError;

/// Common seam over the two report production paths. Selection happens in
/// [`load_report`]; partial results from the two paths are never mixed.
#[async_trait]
pub trait ReportAggregator: Send + Sync {
    async fn aggregate(&self, audit_id: &str) -> Result<ReportData, ApiError>;
}

/// Preferred path: the backend pre-aggregates, the client only reshapes.
pub struct OptimizedAggregator {
    analysis: AnalysisService,
    cfg: RecommendationConfig,
}

impl OptimizedAggregator {
    pub fn new(analysis: AnalysisService, cfg: RecommendationConfig) -> Self {
        Self { analysis, cfg }
    }
}

#[async_trait]
impl ReportAggregator for OptimizedAggregator {
    async fn aggregate(&self, audit_id: &str) -> Result<ReportData, ApiError> {
        let payload = self.analysis.comprehensive_report(audit_id).await?;
        Ok(optimized::reshape(&payload, &self.cfg))
    }
}

/// Fallback path: fetch the raw flat arrays and join them locally.
pub struct FrontendAggregator {
    analysis: AnalysisService,
    cfg: RecommendationConfig,
}

impl FrontendAggregator {
    pub fn new(analysis: AnalysisService, cfg: RecommendationConfig) -> Self {
        Self { analysis, cfg }
    }
}

#[async_trait]
impl ReportAggregator for FrontendAggregator {
    async fn aggregate(&self, audit_id: &str) -> Result<ReportData, ApiError> {
        let results = self.analysis.results(audit_id).await?;
        Ok(frontend::aggregate(&results, &self.cfg))
    }
}

/// Tries the optimized path and falls back to local aggregation when it
/// errors. The optimized result is discarded entirely on failure.
pub async fn load_report(
    primary: &dyn ReportAggregator,
    fallback: &dyn ReportAggregator,
    audit_id: &str,
) -> Result<ReportData, ApiError> {
    match primary.aggregate(audit_id).await {
        Ok(report) => Ok(report),
        Err(e) => {
            warn!(audit_id = %audit_id, error = %e, "Optimized report failed, using fallback aggregation");
            fallback.aggregate(audit_id).await
        }
    }
}

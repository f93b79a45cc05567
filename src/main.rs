use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use brandscope::config::AppConfig;
use brandscope::domain::report::ReportData;
use brandscope::report::{FrontendAggregator, OptimizedAggregator};
use brandscope::services::http::ApiClient;
use brandscope::services::{
    AnalysisService, AuditService, BrandService, PersonasService, QuestionService, TopicsService,
};
use brandscope::session::SessionStore;
use brandscope::wizard::{RemoteBackend, WizardController};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    info!(backend = %config.api_base_url, "brandscope starting");

    let store = SessionStore::open(&config.database_path).await?;
    let Some(token) = store.load_latest().await? else {
        info!("No analysis session to resume; run the wizard through a frontend first");
        return Ok(());
    };

    info!(
        study_id = %token.study_id,
        audit_id = %token.audit_id,
        "Resuming analysis session"
    );

    let client = ApiClient::new(&config);
    let analysis = AnalysisService::new(client.clone());
    let backend = Arc::new(RemoteBackend::new(
        BrandService::new(client.clone()),
        AuditService::new(client.clone()),
        TopicsService::new(client.clone()),
        PersonasService::new(client.clone()),
        QuestionService::new(client.clone()),
        analysis.clone(),
    ));

    let mut controller = WizardController::new(
        config.clone(),
        backend,
        store,
        token.study_id.clone(),
    );
    controller.resume(&token)?;

    let primary = OptimizedAggregator::new(analysis.clone(), config.recommendations.clone());
    let fallback = FrontendAggregator::new(analysis.clone(), config.recommendations.clone());

    let report = controller
        .run_analysis(&analysis, &primary, &fallback, |status| {
            info!(
                status = ?status.status,
                progress = status.progress_percentage,
                "Analysis in progress"
            );
        })
        .await?;

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &ReportData) {
    println!(
        "Overall visibility: {}% ({} of {} responses)",
        report.overall.percentage,
        report.overall.mentioned_responses,
        report.overall.total_responses
    );

    println!("\nBrand rankings:");
    for ranking in &report.rankings {
        let marker = if ranking.is_target_brand { " (you)" } else { "" };
        println!(
            "  {}. {}{} - {} mentions across {} queries",
            ranking.rank, ranking.brand_name, marker, ranking.mention_count, ranking.query_count
        );
    }

    println!("\nTop recommendations:");
    for recommendation in report.recommendations.iter().take(3) {
        println!(
            "  [{:?}/{:?}] {}",
            recommendation.impact, recommendation.effort, recommendation.title
        );
    }
}

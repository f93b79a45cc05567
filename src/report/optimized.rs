use std::collections::HashMap;

use crate::config::RecommendationConfig;
use crate::domain::report::{
    BrandRanking, BrandVisibility, ComprehensiveReport, MatrixCell, PersonaVisibility,
    ReportData, SourceBreakdown, SourceCategory, TopicVisibility,
};
use crate::report::recommendations::build_recommendations;
use crate::report::sources::categorize_host;

// Optimized aggregation path: the backend already joined and counted, this
// only reshapes its payload into ReportData. Recommendations stay a client
// heuristic in both paths, computed from the reshaped sections.

fn clamp_percentage(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

/// Reshapes the comprehensive-report payload into [`ReportData`].
pub fn reshape(report: &ComprehensiveReport, cfg: &RecommendationConfig) -> ReportData {
    let overall = BrandVisibility {
        percentage: clamp_percentage(report.overall_visibility.percentage),
        mentioned_responses: report.overall_visibility.mentioned_responses,
        total_responses: report.overall_visibility.total_responses,
    };

    let mut rankings: Vec<BrandRanking> = report
        .brand_rankings
        .iter()
        .map(|r| BrandRanking {
            rank: 0,
            brand_name: r.brand_name.clone(),
            mention_count: r.mention_count,
            query_count: r.query_count,
            is_target_brand: r.is_target_brand,
        })
        .collect();
    rankings.sort_by(|a, b| {
        b.is_target_brand
            .cmp(&a.is_target_brand)
            .then(b.mention_count.cmp(&a.mention_count))
            .then(a.brand_name.cmp(&b.brand_name))
    });
    rankings.truncate(5);
    for (index, ranking) in rankings.iter_mut().enumerate() {
        ranking.rank = index + 1;
    }

    let personas = report
        .persona_visibility
        .iter()
        .map(|p| PersonaVisibility {
            persona_id: p.persona_id.clone(),
            persona_name: p.persona_name.clone(),
            visibility: clamp_percentage(p.visibility),
            total_responses: p.total_responses,
        })
        .collect();

    let topics: Vec<TopicVisibility> = report
        .topic_visibility
        .iter()
        .map(|t| TopicVisibility {
            topic_name: t.topic_name.clone(),
            visibility: clamp_percentage(t.visibility),
            total_responses: t.total_responses,
        })
        .collect();

    let matrix: Vec<MatrixCell> = report
        .matrix
        .iter()
        .map(|cell| MatrixCell {
            persona_id: cell.persona_id.clone(),
            persona_name: cell.persona_name.clone(),
            topic_name: cell.topic_name.clone(),
            score: clamp_percentage(cell.score),
            query_count: cell.query_count,
        })
        .collect();

    let mut source_counts: HashMap<SourceCategory, usize> = HashMap::new();
    for source in &report.source_counts {
        *source_counts
            .entry(categorize_host(&source.hostname))
            .or_insert(0) += source.count;
    }
    let mut sources: Vec<SourceBreakdown> = source_counts
        .into_iter()
        .map(|(category, count)| SourceBreakdown { category, count })
        .collect();
    sources.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.category.label().cmp(b.category.label()))
    });

    let recommendations = build_recommendations(&overall, &matrix, &topics, &rankings, cfg);

    ReportData {
        overall,
        rankings,
        personas,
        topics,
        matrix,
        recommendations,
        sources,
    }
}

use crate::config::RecommendationConfig;
use crate::domain::report::{
    BrandRanking, BrandVisibility, EffortLevel, ImpactLevel, MatrixCell, Recommendation,
    RecommendationKind, TopicVisibility,
};

// These heuristics are placeholders carried over from the product's first
// iteration, not a statistically grounded model. All parameters come from
// RecommendationConfig.

/// potential = min(cap, max(current + uplift, floor))
pub fn potential_score(current: u32, cfg: &RecommendationConfig) -> u32 {
    (current + cfg.potential_uplift)
        .max(cfg.potential_floor)
        .min(cfg.potential_cap)
}

pub fn impact_for_gap(gap: u32, cfg: &RecommendationConfig) -> ImpactLevel {
    if gap >= cfg.high_impact_gap {
        ImpactLevel::High
    } else if gap >= cfg.medium_impact_gap {
        ImpactLevel::Medium
    } else {
        ImpactLevel::Low
    }
}

/// Names containing a configured "complex" marker are assumed expensive to
/// address; otherwise effort falls out of the current score.
pub fn effort_for(name: &str, current: u32, cfg: &RecommendationConfig) -> EffortLevel {
    let lowered = name.to_lowercase();
    if cfg
        .complex_name_markers
        .iter()
        .any(|marker| lowered.contains(marker.as_str()))
    {
        EffortLevel::High
    } else if current < cfg.high_effort_score {
        EffortLevel::Medium
    } else {
        EffortLevel::Low
    }
}

fn impact_points(impact: ImpactLevel) -> f64 {
    match impact {
        ImpactLevel::High => 100.0,
        ImpactLevel::Medium => 60.0,
        ImpactLevel::Low => 20.0,
    }
}

/// priority = gap_weight * gap + impact_weight * impact_points
pub fn priority(gap: u32, impact: ImpactLevel, cfg: &RecommendationConfig) -> f64 {
    cfg.gap_weight * gap as f64 + cfg.impact_weight * impact_points(impact)
}

fn recommendation(
    kind: RecommendationKind,
    title: String,
    description: String,
    name_for_effort: &str,
    current: u32,
    cfg: &RecommendationConfig,
) -> Recommendation {
    let potential = potential_score(current, cfg);
    let gap = potential.saturating_sub(current);
    let impact = impact_for_gap(gap, cfg);
    Recommendation {
        kind,
        title,
        description,
        current_score: current,
        potential_score: potential,
        impact,
        effort: effort_for(name_for_effort, current, cfg),
        priority: priority(gap, impact, cfg),
    }
}

/// Builds the three recommendation families from already-aggregated data,
/// highest priority first.
pub fn build_recommendations(
    overall: &BrandVisibility,
    matrix: &[MatrixCell],
    topics: &[TopicVisibility],
    rankings: &[BrandRanking],
    cfg: &RecommendationConfig,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    // Opportunity gaps: persona x topic cells scoring below the floor.
    for cell in matrix {
        if cell.score < cfg.potential_floor && cell.query_count > 0 {
            let name = format!("{} / {}", cell.persona_name, cell.topic_name);
            recommendations.push(recommendation(
                RecommendationKind::OpportunityGap,
                format!("Close the visibility gap for {}", name),
                format!(
                    "Only {}% of responses for {} mention the brand across {} queries.",
                    cell.score, name, cell.query_count
                ),
                &name,
                cell.score,
                cfg,
            ));
        }
    }

    // Content strategy: topics with weak overall visibility.
    for topic in topics {
        if topic.visibility < cfg.potential_floor && topic.total_responses > 0 {
            recommendations.push(recommendation(
                RecommendationKind::ContentStrategy,
                format!("Publish content targeting \"{}\"", topic.topic_name),
                format!(
                    "Brand visibility within \"{}\" sits at {}% over {} responses.",
                    topic.topic_name, topic.visibility, topic.total_responses
                ),
                &topic.topic_name,
                topic.visibility,
                cfg,
            ));
        }
    }

    // Competitive insights: competitors out-mentioning the target brand.
    let target_mentions = rankings
        .iter()
        .find(|r| r.is_target_brand)
        .map(|r| r.mention_count)
        .unwrap_or(0);
    for competitor in rankings
        .iter()
        .filter(|r| !r.is_target_brand && r.mention_count > target_mentions)
    {
        recommendations.push(recommendation(
            RecommendationKind::CompetitiveInsight,
            format!("{} is outpacing the brand", competitor.brand_name),
            format!(
                "{} was mentioned {} times against the brand's {} across tracked queries.",
                competitor.brand_name, competitor.mention_count, target_mentions
            ),
            &competitor.brand_name,
            overall.percentage,
            cfg,
        ));
    }

    recommendations.sort_by(|a, b| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> RecommendationConfig {
        RecommendationConfig::default()
    }

    #[test]
    fn test_potential_formula() {
        // min(85, max(current + 20, 45))
        assert_eq!(potential_score(0, &cfg()), 45);
        assert_eq!(potential_score(10, &cfg()), 45);
        assert_eq!(potential_score(30, &cfg()), 50);
        assert_eq!(potential_score(70, &cfg()), 85);
        assert_eq!(potential_score(100, &cfg()), 85);
    }

    #[test]
    fn test_impact_thresholds() {
        assert_eq!(impact_for_gap(45, &cfg()), ImpactLevel::High);
        assert_eq!(impact_for_gap(40, &cfg()), ImpactLevel::High);
        assert_eq!(impact_for_gap(25, &cfg()), ImpactLevel::Medium);
        assert_eq!(impact_for_gap(5, &cfg()), ImpactLevel::Low);
    }

    #[test]
    fn test_complex_names_are_high_effort() {
        assert_eq!(effort_for("Enterprise IT buyer", 80, &cfg()), EffortLevel::High);
        assert_eq!(effort_for("Casual shopper", 80, &cfg()), EffortLevel::Low);
        assert_eq!(effort_for("Casual shopper", 10, &cfg()), EffortLevel::Medium);
    }

    #[test]
    fn test_opportunity_gap_requires_queries() {
        let matrix = vec![
            MatrixCell {
                persona_id: "p1".to_string(),
                persona_name: "Shopper".to_string(),
                topic_name: "Pricing".to_string(),
                score: 10,
                query_count: 4,
            },
            MatrixCell {
                persona_id: "p1".to_string(),
                persona_name: "Shopper".to_string(),
                topic_name: "Support".to_string(),
                score: 0,
                query_count: 0,
            },
        ];
        let recommendations = build_recommendations(
            &BrandVisibility::default(),
            &matrix,
            &[],
            &[],
            &cfg(),
        );
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].kind, RecommendationKind::OpportunityGap);
        assert_eq!(recommendations[0].current_score, 10);
        assert_eq!(recommendations[0].potential_score, 45);
    }

    #[test]
    fn test_competitive_insight_only_when_outpaced() {
        let rankings = vec![
            BrandRanking {
                rank: 1,
                brand_name: "Acme".to_string(),
                mention_count: 10,
                query_count: 8,
                is_target_brand: true,
            },
            BrandRanking {
                rank: 2,
                brand_name: "Rival".to_string(),
                mention_count: 14,
                query_count: 9,
                is_target_brand: false,
            },
            BrandRanking {
                rank: 3,
                brand_name: "Minor".to_string(),
                mention_count: 3,
                query_count: 2,
                is_target_brand: false,
            },
        ];
        let recommendations = build_recommendations(
            &BrandVisibility {
                percentage: 40,
                mentioned_responses: 4,
                total_responses: 10,
            },
            &[],
            &[],
            &rankings,
            &cfg(),
        );
        assert_eq!(recommendations.len(), 1);
        assert_eq!(
            recommendations[0].kind,
            RecommendationKind::CompetitiveInsight
        );
        assert!(recommendations[0].title.contains("Rival"));
    }

    #[test]
    fn test_sorted_by_priority_descending() {
        let matrix = vec![
            MatrixCell {
                persona_id: "p1".to_string(),
                persona_name: "Shopper".to_string(),
                topic_name: "Pricing".to_string(),
                score: 40,
                query_count: 2,
            },
            MatrixCell {
                persona_id: "p2".to_string(),
                persona_name: "Analyst".to_string(),
                topic_name: "Support".to_string(),
                score: 2,
                query_count: 2,
            },
        ];
        let recommendations = build_recommendations(
            &BrandVisibility::default(),
            &matrix,
            &[],
            &[],
            &cfg(),
        );
        assert_eq!(recommendations.len(), 2);
        assert!(recommendations[0].priority >= recommendations[1].priority);
        assert_eq!(recommendations[0].current_score, 2);
    }
}

use std::collections::HashSet;

use crate::config::RecommendationConfig;
use crate::domain::analysis::AnalysisResults;
use crate::domain::report::{
    BrandRanking, BrandVisibility, MatrixCell, PersonaVisibility, ReportData, TopicVisibility,
};
use crate::report::recommendations::build_recommendations;
use crate::report::sources::source_breakdown;

// Frontend fallback aggregation over the raw flat result arrays. Linear
// filters only; inputs are tens of items. All ratios check the denominator
// first and return 0 rather than dividing by zero, and a missing input
// array yields an empty section rather than an error.

/// Joins the flat arrays into a complete report.
pub fn aggregate(results: &AnalysisResults, cfg: &RecommendationConfig) -> ReportData {
    let overall = overall_visibility(results);
    let rankings = brand_rankings(results);
    let personas = persona_visibility(results);
    let topics = topic_visibility(results);
    let matrix = visibility_matrix(results);
    let recommendations = build_recommendations(&overall, &matrix, &topics, &rankings, cfg);
    let sources = source_breakdown(&results.citations);

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

fn ratio_percentage(mentioned: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (mentioned as f64 / total as f64 * 100.0).round();
    pct.min(100.0) as u32
}

fn target_response_ids(results: &AnalysisResults) -> HashSet<&str> {
    results
        .brand_mentions
        .iter()
        .filter(|m| m.is_target_brand)
        .map(|m| m.response_id.as_str())
        .collect()
}

/// Distinct responses mentioning the target brand over all responses.
pub fn overall_visibility(results: &AnalysisResults) -> BrandVisibility {
    let targets = target_response_ids(results);
    let mentioned = results
        .responses
        .iter()
        .filter(|r| targets.contains(r.id.as_str()))
        .count();
    let total = results.responses.len();
    BrandVisibility {
        percentage: ratio_percentage(mentioned, total),
        mentioned_responses: mentioned,
        total_responses: total,
    }
}

/// Groups mentions by brand name, counting mentions and distinct responding
/// queries; the target brand always ranks first, then mention count
/// descending; top 5.
pub fn brand_rankings(results: &AnalysisResults) -> Vec<BrandRanking> {
    let mut brands: Vec<BrandRanking> = Vec::new();

    for mention in &results.brand_mentions {
        let index = match brands
            .iter()
            .position(|b| b.brand_name == mention.brand_name)
        {
            Some(index) => index,
            None => {
                brands.push(BrandRanking {
                    rank: 0,
                    brand_name: mention.brand_name.clone(),
                    mention_count: 0,
                    query_count: 0,
                    is_target_brand: false,
                });
                brands.len() - 1
            }
        };
        brands[index].mention_count += 1;
        brands[index].is_target_brand |= mention.is_target_brand;
    }

    for brand in &mut brands {
        let queries: HashSet<&str> = results
            .brand_mentions
            .iter()
            .filter(|m| m.brand_name == brand.brand_name)
            .filter_map(|m| {
                results
                    .responses
                    .iter()
                    .find(|r| r.id == m.response_id)
                    .map(|r| r.query_id.as_str())
            })
            .collect();
        brand.query_count = queries.len();
    }

    brands.sort_by(|a, b| {
        b.is_target_brand
            .cmp(&a.is_target_brand)
            .then(b.mention_count.cmp(&a.mention_count))
            .then(a.brand_name.cmp(&b.brand_name))
    });
    brands.truncate(5);
    for (index, brand) in brands.iter_mut().enumerate() {
        brand.rank = index + 1;
    }
    brands
}

fn visibility_over_queries(results: &AnalysisResults, query_ids: &HashSet<&str>) -> (u32, usize) {
    let targets = target_response_ids(results);
    let scoped: Vec<&str> = results
        .responses
        .iter()
        .filter(|r| query_ids.contains(r.query_id.as_str()))
        .map(|r| r.id.as_str())
        .collect();
    let mentioned = scoped.iter().filter(|id| targets.contains(*id)).count();
    (ratio_percentage(mentioned, scoped.len()), scoped.len())
}

pub fn persona_visibility(results: &AnalysisResults) -> Vec<PersonaVisibility> {
    results
        .personas
        .iter()
        .map(|persona| {
            let query_ids: HashSet<&str> = results
                .queries
                .iter()
                .filter(|q| q.persona_id.as_deref() == Some(persona.id.as_str()))
                .map(|q| q.id.as_str())
                .collect();
            let (visibility, total) = visibility_over_queries(results, &query_ids);
            PersonaVisibility {
                persona_id: persona.id.clone(),
                persona_name: persona.name.clone(),
                visibility,
                total_responses: total,
            }
        })
        .collect()
}

pub fn topic_visibility(results: &AnalysisResults) -> Vec<TopicVisibility> {
    results
        .topics
        .iter()
        .map(|topic| {
            let query_ids: HashSet<&str> = results
                .queries
                .iter()
                .filter(|q| q.topic_name.as_deref() == Some(topic.name.as_str()))
                .map(|q| q.id.as_str())
                .collect();
            let (visibility, total) = visibility_over_queries(results, &query_ids);
            TopicVisibility {
                topic_name: topic.name.clone(),
                visibility,
                total_responses: total,
            }
        })
        .collect()
}

/// One cell per (persona, topic) pair; pairs with no matching queries score
/// 0 with a query count of 0.
pub fn visibility_matrix(results: &AnalysisResults) -> Vec<MatrixCell> {
    let mut matrix = Vec::with_capacity(results.personas.len() * results.topics.len());

    for persona in &results.personas {
        for topic in &results.topics {
            let query_ids: HashSet<&str> = results
                .queries
                .iter()
                .filter(|q| {
                    q.persona_id.as_deref() == Some(persona.id.as_str())
                        && q.topic_name.as_deref() == Some(topic.name.as_str())
                })
                .map(|q| q.id.as_str())
                .collect();
            let (score, _) = visibility_over_queries(results, &query_ids);
            matrix.push(MatrixCell {
                persona_id: persona.id.clone(),
                persona_name: persona.name.clone(),
                topic_name: topic.name.clone(),
                score,
                query_count: query_ids.len(),
            });
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{
        BrandMention, PersonaRecord, QueryRecord, ResponseRecord, TopicRecord,
    };

    fn response(id: &str, query_id: &str) -> ResponseRecord {
        ResponseRecord {
            id: id.to_string(),
            query_id: query_id.to_string(),
            text: String::new(),
            model: None,
        }
    }

    fn query(id: &str, persona_id: &str, topic_name: &str) -> QueryRecord {
        QueryRecord {
            id: id.to_string(),
            question_text: String::new(),
            persona_id: Some(persona_id.to_string()),
            topic_name: Some(topic_name.to_string()),
        }
    }

    fn mention(id: &str, response_id: &str, brand: &str, target: bool) -> BrandMention {
        BrandMention {
            id: id.to_string(),
            response_id: response_id.to_string(),
            brand_name: brand.to_string(),
            is_target_brand: target,
            sentiment: None,
            position: None,
        }
    }

    fn persona(id: &str, name: &str) -> PersonaRecord {
        PersonaRecord {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn topic(name: &str) -> TopicRecord {
        TopicRecord {
            name: name.to_string(),
            category: None,
        }
    }

    #[test]
    fn test_overall_visibility_forty_percent() {
        // 10 responses, 4 with a target mention.
        let mut results = AnalysisResults::default();
        for i in 0..10 {
            results
                .responses
                .push(response(&format!("r{}", i), &format!("q{}", i)));
        }
        for i in 0..4 {
            results.brand_mentions.push(mention(
                &format!("m{}", i),
                &format!("r{}", i),
                "Acme",
                true,
            ));
        }

        let overall = overall_visibility(&results);
        assert_eq!(overall.percentage, 40);
        assert_eq!(overall.mentioned_responses, 4);
        assert_eq!(overall.total_responses, 10);
    }

    #[test]
    fn test_duplicate_mentions_count_response_once() {
        let mut results = AnalysisResults::default();
        results.responses.push(response("r1", "q1"));
        results.responses.push(response("r2", "q2"));
        // Two mentions inside the same response
        results.brand_mentions.push(mention("m1", "r1", "Acme", true));
        results.brand_mentions.push(mention("m2", "r1", "Acme", true));

        let overall = overall_visibility(&results);
        assert_eq!(overall.mentioned_responses, 1);
        assert_eq!(overall.percentage, 50);
    }

    #[test]
    fn test_zero_responses_is_zero_not_nan() {
        let results = AnalysisResults::default();
        let overall = overall_visibility(&results);
        assert_eq!(overall.percentage, 0);
        assert!(persona_visibility(&results).is_empty());
        assert!(visibility_matrix(&results).is_empty());
    }

    #[test]
    fn test_target_brand_ranks_first_regardless_of_count() {
        let mut results = AnalysisResults::default();
        results.responses.push(response("r1", "q1"));
        results.responses.push(response("r2", "q2"));
        results.responses.push(response("r3", "q3"));
        // Rival has 3 mentions, target only 1.
        results.brand_mentions.push(mention("m1", "r1", "Rival", false));
        results.brand_mentions.push(mention("m2", "r2", "Rival", false));
        results.brand_mentions.push(mention("m3", "r3", "Rival", false));
        results.brand_mentions.push(mention("m4", "r1", "Acme", true));

        let rankings = brand_rankings(&results);
        assert_eq!(rankings[0].brand_name, "Acme");
        assert!(rankings[0].is_target_brand);
        assert_eq!(rankings[0].rank, 1);
        assert_eq!(rankings[1].brand_name, "Rival");
        assert_eq!(rankings[1].mention_count, 3);
    }

    #[test]
    fn test_non_target_ties_break_by_mention_count() {
        let mut results = AnalysisResults::default();
        for i in 0..4 {
            results
                .responses
                .push(response(&format!("r{}", i), &format!("q{}", i)));
        }
        results.brand_mentions.push(mention("m1", "r0", "Alpha", false));
        results.brand_mentions.push(mention("m2", "r1", "Beta", false));
        results.brand_mentions.push(mention("m3", "r2", "Beta", false));
        results.brand_mentions.push(mention("m4", "r3", "Gamma", false));

        let rankings = brand_rankings(&results);
        assert_eq!(rankings[0].brand_name, "Beta");
        assert_eq!(rankings[0].mention_count, 2);
    }

    #[test]
    fn test_rankings_truncate_to_five() {
        let mut results = AnalysisResults::default();
        for i in 0..7 {
            let rid = format!("r{}", i);
            results.responses.push(response(&rid, &format!("q{}", i)));
            results.brand_mentions.push(mention(
                &format!("m{}", i),
                &rid,
                &format!("Brand{}", i),
                false,
            ));
        }
        assert_eq!(brand_rankings(&results).len(), 5);
    }

    #[test]
    fn test_ranking_counts_distinct_queries() {
        let mut results = AnalysisResults::default();
        // Two responses to the same query, both mentioning Acme.
        results.responses.push(response("r1", "q1"));
        results.responses.push(response("r2", "q1"));
        results.brand_mentions.push(mention("m1", "r1", "Acme", true));
        results.brand_mentions.push(mention("m2", "r2", "Acme", true));

        let rankings = brand_rankings(&results);
        assert_eq!(rankings[0].mention_count, 2);
        assert_eq!(rankings[0].query_count, 1);
    }

    #[test]
    fn test_matrix_has_all_cells_and_zero_for_unmatched_pairs() {
        let mut results = AnalysisResults::default();
        results.personas.push(persona("p1", "Shopper"));
        results.personas.push(persona("p2", "Analyst"));
        results.topics.push(topic("Pricing"));
        results.topics.push(topic("Support"));
        // Only p1 x Pricing has a query, fully visible.
        results.queries.push(query("q1", "p1", "Pricing"));
        results.responses.push(response("r1", "q1"));
        results.brand_mentions.push(mention("m1", "r1", "Acme", true));

        let matrix = visibility_matrix(&results);
        assert_eq!(matrix.len(), 4);
        for cell in &matrix {
            assert!(cell.score <= 100);
        }

        let scored = matrix
            .iter()
            .find(|c| c.persona_id == "p1" && c.topic_name == "Pricing")
            .unwrap();
        assert_eq!(scored.score, 100);
        assert_eq!(scored.query_count, 1);

        let empty = matrix
            .iter()
            .find(|c| c.persona_id == "p2" && c.topic_name == "Support")
            .unwrap();
        assert_eq!(empty.score, 0);
        assert_eq!(empty.query_count, 0);
    }

    #[test]
    fn test_persona_visibility_scoped_to_own_queries() {
        let mut results = AnalysisResults::default();
        results.personas.push(persona("p1", "Shopper"));
        results.personas.push(persona("p2", "Analyst"));
        results.queries.push(query("q1", "p1", "Pricing"));
        results.queries.push(query("q2", "p2", "Pricing"));
        results.responses.push(response("r1", "q1"));
        results.responses.push(response("r2", "q2"));
        results.brand_mentions.push(mention("m1", "r1", "Acme", true));

        let visibility = persona_visibility(&results);
        let p1 = visibility.iter().find(|p| p.persona_id == "p1").unwrap();
        let p2 = visibility.iter().find(|p| p.persona_id == "p2").unwrap();
        assert_eq!(p1.visibility, 100);
        assert_eq!(p2.visibility, 0);
    }

    #[test]
    fn test_aggregate_produces_full_report() {
        let mut results = AnalysisResults::default();
        results.personas.push(persona("p1", "Shopper"));
        results.topics.push(topic("Pricing"));
        results.queries.push(query("q1", "p1", "Pricing"));
        results.responses.push(response("r1", "q1"));
        results.responses.push(response("r2", "q1"));
        results.brand_mentions.push(mention("m1", "r1", "Acme", true));

        let report = aggregate(&results, &RecommendationConfig::default());
        assert_eq!(report.overall.percentage, 50);
        assert_eq!(report.matrix.len(), 1);
        assert_eq!(report.rankings.len(), 1);
        assert!(report.sources.is_empty());
    }
}

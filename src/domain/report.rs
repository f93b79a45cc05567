use serde::{Deserialize, Serialize};

/// Fully aggregated report, ready for rendering. Produced either by the
/// backend's comprehensive-report endpoint (reshaped) or by the local
/// fallback aggregation; never by mixing the two.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportData {
    pub overall: BrandVisibility,
    pub rankings: Vec<BrandRanking>,
    pub personas: Vec<PersonaVisibility>,
    pub topics: Vec<TopicVisibility>,
    pub matrix: Vec<MatrixCell>,
    pub recommendations: Vec<Recommendation>,
    pub sources: Vec<SourceBreakdown>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BrandVisibility {
    /// Percentage of responses mentioning the target brand, 0..=100.
    pub percentage: u32,
    pub mentioned_responses: usize,
    pub total_responses: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrandRanking {
    pub rank: usize,
    pub brand_name: String,
    pub mention_count: usize,
    /// Distinct queries whose responses mention this brand.
    pub query_count: usize,
    pub is_target_brand: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonaVisibility {
    pub persona_id: String,
    pub persona_name: String,
    pub visibility: u32,
    pub total_responses: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopicVisibility {
    pub topic_name: String,
    pub visibility: u32,
    pub total_responses: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatrixCell {
    pub persona_id: String,
    pub persona_name: String,
    pub topic_name: String,
    /// Visibility restricted to queries matching both persona and topic,
    /// 0..=100. Pairs with no queries score 0.
    pub score: u32,
    pub query_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub current_score: u32,
    pub potential_score: u32,
    pub impact: ImpactLevel,
    pub effort: EffortLevel,
    pub priority: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    OpportunityGap,
    ContentStrategy,
    CompetitiveInsight,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceBreakdown {
    pub category: SourceCategory,
    pub count: usize,
}

/// Fixed buckets for citation hostnames. Categorization is a pure function
/// of the hostname; anything unrecognized lands in `Other`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SourceCategory {
    SocialMedia,
    Entertainment,
    News,
    Ecommerce,
    Reference,
    Forum,
    Blog,
    Education,
    Review,
    Government,
    Other,
}

impl SourceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SourceCategory::SocialMedia => "Social Media",
            SourceCategory::Entertainment => "Entertainment",
            SourceCategory::News => "News",
            SourceCategory::Ecommerce => "E-commerce",
            SourceCategory::Reference => "Reference",
            SourceCategory::Forum => "Forum",
            SourceCategory::Blog => "Blog",
            SourceCategory::Education => "Education",
            SourceCategory::Review => "Review",
            SourceCategory::Government => "Government",
            SourceCategory::Other => "Unknown/Other",
        }
    }
}

/// Pre-aggregated payload from the comprehensive-report endpoint. The
/// optimized aggregation path reshapes this into [`ReportData`] without
/// recomputing anything.
#[derive(Debug, Clone, Deserialize)]
pub struct ComprehensiveReport {
    pub overall_visibility: WireVisibility,
    #[serde(default)]
    pub brand_rankings: Vec<WireRanking>,
    #[serde(default)]
    pub persona_visibility: Vec<WirePersonaVisibility>,
    #[serde(default)]
    pub topic_visibility: Vec<WireTopicVisibility>,
    #[serde(default)]
    pub matrix: Vec<WireMatrixCell>,
    #[serde(default)]
    pub source_counts: Vec<WireSourceCount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireVisibility {
    pub percentage: f64,
    #[serde(default)]
    pub mentioned_responses: usize,
    #[serde(default)]
    pub total_responses: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireRanking {
    pub brand_name: String,
    pub mention_count: usize,
    #[serde(default)]
    pub query_count: usize,
    #[serde(default)]
    pub is_target_brand: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePersonaVisibility {
    pub persona_id: String,
    pub persona_name: String,
    pub visibility: f64,
    #[serde(default)]
    pub total_responses: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireTopicVisibility {
    pub topic_name: String,
    pub visibility: f64,
    #[serde(default)]
    pub total_responses: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireMatrixCell {
    pub persona_id: String,
    pub persona_name: String,
    pub topic_name: String,
    pub score: f64,
    #[serde(default)]
    pub query_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireSourceCount {
    pub hostname: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_label() {
        assert_eq!(SourceCategory::Other.label(), "Unknown/Other");
    }

    #[test]
    fn test_comprehensive_report_tolerates_missing_sections() {
        let report: ComprehensiveReport = serde_json::from_str(
            r#"{"overall_visibility": {"percentage": 42.0}}"#,
        )
        .unwrap();
        assert_eq!(report.overall_visibility.percentage, 42.0);
        assert!(report.brand_rankings.is_empty());
        assert!(report.matrix.is_empty());
    }
}

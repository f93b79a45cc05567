use crate::domain::topic::TopicCategory;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated question, always scoped to one persona and one topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub persona_id: String,
    pub topic_name: String,
    pub topic_type: TopicCategory,
}

impl Question {
    pub fn new(
        text: String,
        persona_id: String,
        topic_name: String,
        topic_type: TopicCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            persona_id,
            topic_name,
            topic_type,
        }
    }
}

/// Counts questions per persona id. Used by the completeness heuristic that
/// decides which personas are offered for retry.
pub fn questions_per_persona(questions: &[Question]) -> std::collections::HashMap<&str, usize> {
    let mut counts = std::collections::HashMap::new();
    for question in questions {
        *counts.entry(question.persona_id.as_str()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_per_persona() {
        let questions = vec![
            Question::new(
                "How much does it cost?".to_string(),
                "p1".to_string(),
                "Pricing".to_string(),
                TopicCategory::Unbranded,
            ),
            Question::new(
                "Is Acme cheaper than rivals?".to_string(),
                "p1".to_string(),
                "Pricing".to_string(),
                TopicCategory::Comparative,
            ),
            Question::new(
                "What is Acme known for?".to_string(),
                "p2".to_string(),
                "Reputation".to_string(),
                TopicCategory::Branded,
            ),
        ];

        let counts = questions_per_persona(&questions);
        assert_eq!(counts.get("p1"), Some(&2));
        assert_eq!(counts.get("p2"), Some(&1));
        assert_eq!(counts.get("p3"), None);
    }
}

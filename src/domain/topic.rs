use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Topic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: TopicCategory,
    #[serde(default)]
    pub edited_by_user: bool,
}

/// Conversation category used to scope generated questions. Exactly three
/// values; filtering and display both key off this.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TopicCategory {
    Unbranded,
    Branded,
    Comparative,
}

impl TopicCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicCategory::Unbranded => "unbranded",
            TopicCategory::Branded => "branded",
            TopicCategory::Comparative => "comparative",
        }
    }

    pub fn all() -> [TopicCategory; 3] {
        [
            TopicCategory::Unbranded,
            TopicCategory::Branded,
            TopicCategory::Comparative,
        ]
    }
}

/// A partial edit to a topic; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<TopicCategory>,
}

impl Topic {
    pub fn new(name: String, description: String, category: TopicCategory) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            category,
            edited_by_user: false,
        }
    }

    /// Applies a partial edit and marks the topic as user-edited.
    pub fn apply(&mut self, edit: &TopicEdit) {
        if let Some(name) = &edit.name {
            self.name = name.clone();
        }
        if let Some(description) = &edit.description {
            self.description = description.clone();
        }
        if let Some(category) = edit.category {
            self.category = category;
        }
        self.edited_by_user = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_name_only() {
        let mut topic = Topic::new(
            "Pricing".to_string(),
            "Questions about cost".to_string(),
            TopicCategory::Unbranded,
        );
        let before = topic.clone();

        topic.apply(&TopicEdit {
            name: Some("X".to_string()),
            ..TopicEdit::default()
        });

        assert_eq!(topic.name, "X");
        assert!(topic.edited_by_user);
        // Everything else untouched
        assert_eq!(topic.id, before.id);
        assert_eq!(topic.description, before.description);
        assert_eq!(topic.category, before.category);
    }

    #[test]
    fn test_apply_category() {
        let mut topic = Topic::new(
            "Acme vs rivals".to_string(),
            String::new(),
            TopicCategory::Branded,
        );
        topic.apply(&TopicEdit {
            category: Some(TopicCategory::Comparative),
            ..TopicEdit::default()
        });
        assert_eq!(topic.category, TopicCategory::Comparative);
        assert!(topic.edited_by_user);
    }

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&TopicCategory::Comparative).unwrap();
        assert_eq!(json, "\"comparative\"");
        let parsed: TopicCategory = serde_json::from_str("\"unbranded\"").unwrap();
        assert_eq!(parsed, TopicCategory::Unbranded);
    }

    #[test]
    fn test_exactly_three_categories() {
        assert_eq!(TopicCategory::all().len(), 3);
    }
}

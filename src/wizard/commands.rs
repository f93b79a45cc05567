use crate::domain::question::Question;
use crate::domain::topic::{Topic, TopicEdit};
use crate::wizard::state::WizardState;

// Optimistic edits: apply locally first, sync remotely second, roll back
// the captured fields if the sync fails. Each command snapshots exactly
// what it changes.

#[derive(Debug)]
pub struct TopicEditCommand {
    topic_id: String,
    edit: TopicEdit,
    previous: Option<Topic>,
}

impl TopicEditCommand {
    pub fn new(topic_id: String, edit: TopicEdit) -> Self {
        Self {
            topic_id,
            edit,
            previous: None,
        }
    }

    /// Applies the edit locally, capturing the previous topic for rollback.
    /// Returns the updated topic for the remote sync.
    pub fn apply(&mut self, state: &mut WizardState) -> Result<Topic, String> {
        let topic = state
            .topics
            .iter_mut()
            .find(|t| t.id == self.topic_id)
            .ok_or_else(|| format!("Topic not found: {}", self.topic_id))?;
        self.previous = Some(topic.clone());
        topic.apply(&self.edit);
        Ok(topic.clone())
    }

    /// Restores the snapshot taken by `apply`. A no-op if apply never ran.
    pub fn rollback(&mut self, state: &mut WizardState) {
        if let Some(previous) = self.previous.take() {
            if let Some(topic) = state.topics.iter_mut().find(|t| t.id == self.topic_id) {
                *topic = previous;
            }
        }
    }
}

#[derive(Debug)]
pub struct QuestionEditCommand {
    question_id: String,
    new_text: String,
    previous_text: Option<String>,
}

impl QuestionEditCommand {
    pub fn new(question_id: String, new_text: String) -> Self {
        Self {
            question_id,
            new_text,
            previous_text: None,
        }
    }

    pub fn apply(&mut self, state: &mut WizardState) -> Result<Question, String> {
        let question = state
            .questions
            .iter_mut()
            .find(|q| q.id == self.question_id)
            .ok_or_else(|| format!("Question not found: {}", self.question_id))?;
        self.previous_text = Some(question.text.clone());
        question.text = self.new_text.clone();
        Ok(question.clone())
    }

    pub fn rollback(&mut self, state: &mut WizardState) {
        if let Some(previous) = self.previous_text.take() {
            if let Some(question) = state
                .questions
                .iter_mut()
                .find(|q| q.id == self.question_id)
            {
                question.text = previous;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::topic::TopicCategory;

    fn state_with_topic() -> (WizardState, String) {
        let mut state = WizardState::new();
        let topic = Topic::new(
            "Pricing".to_string(),
            "Cost questions".to_string(),
            TopicCategory::Unbranded,
        );
        let id = topic.id.clone();
        state.topics.push(topic);
        (state, id)
    }

    #[test]
    fn test_apply_then_rollback_restores_everything() {
        let (mut state, id) = state_with_topic();
        let mut command = TopicEditCommand::new(
            id.clone(),
            TopicEdit {
                name: Some("X".to_string()),
                ..TopicEdit::default()
            },
        );

        let updated = command.apply(&mut state).unwrap();
        assert_eq!(updated.name, "X");
        assert!(updated.edited_by_user);
        assert_eq!(state.topics[0].name, "X");

        command.rollback(&mut state);
        assert_eq!(state.topics[0].name, "Pricing");
        assert!(!state.topics[0].edited_by_user);
    }

    #[test]
    fn test_apply_unknown_topic_fails_without_touching_state() {
        let (mut state, _) = state_with_topic();
        let mut command = TopicEditCommand::new("missing".to_string(), TopicEdit::default());
        assert!(command.apply(&mut state).is_err());
        assert_eq!(state.topics[0].name, "Pricing");
    }

    #[test]
    fn test_rollback_without_apply_is_noop() {
        let (mut state, id) = state_with_topic();
        let mut command = TopicEditCommand::new(id, TopicEdit::default());
        command.rollback(&mut state);
        assert_eq!(state.topics[0].name, "Pricing");
    }

    #[test]
    fn test_question_edit_rollback_restores_text() {
        let mut state = WizardState::new();
        let question = Question::new(
            "How much?".to_string(),
            "p1".to_string(),
            "Pricing".to_string(),
            TopicCategory::Unbranded,
        );
        let id = question.id.clone();
        state.questions.push(question);

        let mut command = QuestionEditCommand::new(id, "How much does it cost?".to_string());
        command.apply(&mut state).unwrap();
        assert_eq!(state.questions[0].text, "How much does it cost?");

        command.rollback(&mut state);
        assert_eq!(state.questions[0].text, "How much?");
    }
}

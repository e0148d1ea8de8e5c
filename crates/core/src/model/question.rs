use serde::{Deserialize, Serialize};

use crate::model::ids::{AnswerOptionId, QuestionId};

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: AnswerOptionId,
    pub text: String,
}

/// A single assessment question, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    /// Thematic block the question belongs to (used for grouping in the UI).
    #[serde(default)]
    pub thematic_block: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub answer_options: Vec<AnswerOption>,
}

impl Question {
    /// Look up an answer option by id.
    #[must_use]
    pub fn option(&self, id: &AnswerOptionId) -> Option<&AnswerOption> {
        self.answer_options.iter().find(|option| &option.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_question_payload() {
        let json = r#"{
            "id": "q1",
            "text": "What do you enjoy most?",
            "thematic_block": "motivation",
            "type": "single_choice",
            "answer_options": [
                {"id": "a", "text": "Building things"},
                {"id": "b", "text": "Talking to people"}
            ]
        }"#;

        let question: Question = serde_json::from_str(json).unwrap();

        assert_eq!(question.id, QuestionId::new("q1"));
        assert_eq!(question.kind.as_deref(), Some("single_choice"));
        assert_eq!(question.answer_options.len(), 2);
        assert_eq!(
            question.option(&AnswerOptionId::new("b")).map(|o| o.text.as_str()),
            Some("Talking to people")
        );
        assert!(question.option(&AnswerOptionId::new("z")).is_none());
    }
}

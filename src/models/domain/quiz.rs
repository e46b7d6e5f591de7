use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog-owned quiz shape. This service only ever reads quizzes; the
/// `correct` flags and `explanation` texts are trusted, server-side-only
/// data and must not cross the student trust boundary unsanitized.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub name: String,
    pub owner_teacher_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub questions: Vec<QuizQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub order: i16,
    pub options: Vec<QuizQuestionOption>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestionOption {
    pub id: String,
    pub text: String,
    pub correct: bool,
    pub explanation: String, // explanation for why this option is correct or incorrect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_round_trip_serialization() {
        let quiz = Quiz {
            id: "quiz-1".to_string(),
            name: "Basics".to_string(),
            owner_teacher_id: "teacher-1".to_string(),
            title: Some("The Basics".to_string()),
            description: None,
            questions: vec![QuizQuestion {
                id: "q-1".to_string(),
                title: "Sample".to_string(),
                description: "Pick one".to_string(),
                order: 1,
                options: vec![QuizQuestionOption {
                    id: "o-1".to_string(),
                    text: "True".to_string(),
                    correct: true,
                    explanation: "Correct statement".to_string(),
                }],
            }],
            created_at: Some(Utc::now()),
            modified_at: None,
        };

        let json = serde_json::to_string(&quiz).expect("quiz should serialize");
        let parsed: Quiz = serde_json::from_str(&json).expect("quiz should deserialize");
        assert_eq!(quiz, parsed);
    }
}

use crate::models::{
    domain::Quiz,
    dto::response::{StudentAnswerOption, StudentQuestion, StudentQuiz},
};

/// Strip everything a student must not see before quiz content crosses the
/// trust boundary: the `correct` flag and the instructor-only `explanation`
/// (which reveals correctness indirectly). Pure and deterministic; the
/// stored option order is preserved so the output cannot correlate position
/// with correctness.
pub fn sanitize(quiz: Quiz) -> StudentQuiz {
    StudentQuiz {
        id: quiz.id,
        name: quiz.name,
        title: quiz.title,
        description: quiz.description,
        questions: quiz
            .questions
            .into_iter()
            .map(|question| StudentQuestion {
                id: question.id,
                title: question.title,
                description: question.description,
                order: question.order,
                options: question
                    .options
                    .into_iter()
                    .map(|option| StudentAnswerOption {
                        id: option.id,
                        text: option.text,
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::test_quiz;
    use serde_json::Value;

    fn collect_keys(value: &Value, keys: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (key, nested) in map {
                    keys.push(key.clone());
                    collect_keys(nested, keys);
                }
            }
            Value::Array(items) => {
                for item in items {
                    collect_keys(item, keys);
                }
            }
            _ => {}
        }
    }

    #[test]
    fn test_output_contains_no_correctness_markers() {
        let quiz = test_quiz("quiz-1", "teacher-1");
        let sanitized = sanitize(quiz);

        let json = serde_json::to_value(&sanitized).expect("sanitized quiz should serialize");
        let mut keys = Vec::new();
        collect_keys(&json, &mut keys);

        assert!(!keys.iter().any(|k| k == "correct"));
        assert!(!keys.iter().any(|k| k == "is_correct"));
        assert!(!keys.iter().any(|k| k == "explanation"));
    }

    #[test]
    fn test_questions_and_options_are_carried_over() {
        let quiz = test_quiz("quiz-1", "teacher-1");
        let question_count = quiz.questions.len();
        let option_counts: Vec<usize> = quiz.questions.iter().map(|q| q.options.len()).collect();

        let sanitized = sanitize(quiz);

        assert_eq!(sanitized.questions.len(), question_count);
        for (question, expected) in sanitized.questions.iter().zip(option_counts) {
            assert_eq!(question.options.len(), expected);
        }
    }

    #[test]
    fn test_option_order_is_preserved() {
        let quiz = test_quiz("quiz-1", "teacher-1");
        let expected_ids: Vec<Vec<String>> = quiz
            .questions
            .iter()
            .map(|q| q.options.iter().map(|o| o.id.clone()).collect())
            .collect();

        let sanitized = sanitize(quiz);

        for (question, expected) in sanitized.questions.iter().zip(expected_ids) {
            let actual: Vec<String> = question.options.iter().map(|o| o.id.clone()).collect();
            assert_eq!(actual, expected);
        }
    }
}

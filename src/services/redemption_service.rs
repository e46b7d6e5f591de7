use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::AccessLogEntry, dto::response::StudentQuiz},
    repositories::{AccessCodeRepository, AccessLogRepository, QuizRepository},
    services::sanitizer::sanitize,
};

/// The Redeemer: validates a submitted code, consumes one use atomically,
/// records the access, and hands back the sanitized quiz. Students need no
/// prior enrollment; their identity is used for audit logging only.
pub struct RedemptionService {
    codes: Arc<dyn AccessCodeRepository>,
    logs: Arc<dyn AccessLogRepository>,
    quizzes: Arc<dyn QuizRepository>,
}

impl RedemptionService {
    pub fn new(
        codes: Arc<dyn AccessCodeRepository>,
        logs: Arc<dyn AccessLogRepository>,
        quizzes: Arc<dyn QuizRepository>,
    ) -> Self {
        Self {
            codes,
            logs,
            quizzes,
        }
    }

    pub async fn redeem(&self, submitted_code: &str, student_id: &str) -> AppResult<StudentQuiz> {
        // generated codes are uppercase; accept sloppily typed input
        let normalized = submitted_code.trim().to_ascii_uppercase();

        let code = self
            .codes
            .find_active_by_code(&normalized)
            .await?
            .ok_or(AppError::InvalidCode)?;

        let now = Utc::now();
        if code.has_expired(now) {
            // lazy expiry: persist the explicit idempotent transition, then reject
            self.codes.deactivate(&code.id).await?;
            return Err(AppError::CodeExpired);
        }

        if code.usage_exhausted() {
            return Err(AppError::UsageExceeded);
        }

        // the snapshot check above can race a concurrent redemption; the
        // conditional increment is the arbiter and never overshoots the cap
        let code = self
            .codes
            .consume_use(&code.id)
            .await?
            .ok_or(AppError::UsageExceeded)?;

        let quiz = self.quizzes.find_by_id(&code.quiz_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Quiz with id '{}' not found", code.quiz_id))
        })?;

        self.logs
            .append(AccessLogEntry::new(&code.id, student_id, now))
            .await?;

        log::debug!("access code {} redeemed by student {}", code.id, student_id);

        Ok(sanitize(quiz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::AccessCode;
    use crate::repositories::{
        MockAccessCodeRepository, MockAccessLogRepository, MockQuizRepository,
    };
    use crate::test_utils::fixtures::{expired_code, test_quiz};

    fn service(
        codes: MockAccessCodeRepository,
        logs: MockAccessLogRepository,
        quizzes: MockQuizRepository,
    ) -> RedemptionService {
        RedemptionService::new(Arc::new(codes), Arc::new(logs), Arc::new(quizzes))
    }

    #[tokio::test]
    async fn test_unknown_code_is_invalid() {
        let mut codes = MockAccessCodeRepository::new();
        codes.expect_find_active_by_code().returning(|_| Ok(None));

        let svc = service(codes, MockAccessLogRepository::new(), MockQuizRepository::new());
        let result = svc.redeem("NOSUCH", "student-1").await;
        assert!(matches!(result, Err(AppError::InvalidCode)));
    }

    #[tokio::test]
    async fn test_submitted_code_is_normalized() {
        let mut codes = MockAccessCodeRepository::new();
        codes
            .expect_find_active_by_code()
            .withf(|value| value == "ABC123")
            .times(1)
            .returning(|_| Ok(None));

        let svc = service(codes, MockAccessLogRepository::new(), MockQuizRepository::new());
        let result = svc.redeem("  abc123 ", "student-1").await;
        assert!(matches!(result, Err(AppError::InvalidCode)));
    }

    #[tokio::test]
    async fn test_expired_code_is_deactivated_then_rejected() {
        let code = expired_code("quiz-1", "teacher-1");
        let code_id = code.id.clone();

        let mut codes = MockAccessCodeRepository::new();
        let stored = code.clone();
        codes
            .expect_find_active_by_code()
            .returning(move |_| Ok(Some(stored.clone())));
        codes
            .expect_deactivate()
            .withf(move |id| id == code_id)
            .times(1)
            .returning(|_| Ok(()));
        codes.expect_consume_use().times(0);

        let svc = service(codes, MockAccessLogRepository::new(), MockQuizRepository::new());
        let result = svc.redeem(&code.code, "student-1").await;
        assert!(matches!(result, Err(AppError::CodeExpired)));
    }

    #[tokio::test]
    async fn test_exhausted_snapshot_short_circuits() {
        let mut code = AccessCode::new("ABC123".to_string(), "quiz-1", "teacher-1", 60, Some(2));
        code.usage_count = 2;

        let mut codes = MockAccessCodeRepository::new();
        let stored = code.clone();
        codes
            .expect_find_active_by_code()
            .returning(move |_| Ok(Some(stored.clone())));
        codes.expect_consume_use().times(0);

        let svc = service(codes, MockAccessLogRepository::new(), MockQuizRepository::new());
        let result = svc.redeem("ABC123", "student-1").await;
        assert!(matches!(result, Err(AppError::UsageExceeded)));
    }

    #[tokio::test]
    async fn test_lost_increment_race_reports_usage_exceeded() {
        let code = AccessCode::new("ABC123".to_string(), "quiz-1", "teacher-1", 60, Some(1));

        let mut codes = MockAccessCodeRepository::new();
        let stored = code.clone();
        codes
            .expect_find_active_by_code()
            .returning(move |_| Ok(Some(stored.clone())));
        // cap was taken between the snapshot check and the write
        codes.expect_consume_use().times(1).returning(|_| Ok(None));

        let mut logs = MockAccessLogRepository::new();
        logs.expect_append().times(0);

        let svc = service(codes, logs, MockQuizRepository::new());
        let result = svc.redeem("ABC123", "student-1").await;
        assert!(matches!(result, Err(AppError::UsageExceeded)));
    }

    #[tokio::test]
    async fn test_successful_redemption_logs_and_sanitizes() {
        let code = AccessCode::new("ABC123".to_string(), "quiz-1", "teacher-1", 60, Some(2));
        let code_id = code.id.clone();

        let mut codes = MockAccessCodeRepository::new();
        let stored = code.clone();
        codes
            .expect_find_active_by_code()
            .returning(move |_| Ok(Some(stored.clone())));
        let stored = code.clone();
        codes.expect_consume_use().times(1).returning(move |_| {
            let mut consumed = stored.clone();
            consumed.usage_count += 1;
            Ok(Some(consumed))
        });

        let mut quizzes = MockQuizRepository::new();
        quizzes
            .expect_find_by_id()
            .withf(|id| id == "quiz-1")
            .returning(|id| Ok(Some(test_quiz(id, "teacher-1"))));

        let mut logs = MockAccessLogRepository::new();
        logs.expect_append()
            .withf(move |entry| entry.code_id == code_id && entry.student_id == "student-1")
            .times(1)
            .returning(Ok);

        let svc = service(codes, logs, quizzes);
        let quiz = svc
            .redeem("ABC123", "student-1")
            .await
            .expect("redemption should succeed");

        assert_eq!(quiz.id, "quiz-1");
        let json = serde_json::to_string(&quiz).expect("student quiz should serialize");
        assert!(!json.contains("correct"));
        assert!(!json.contains("explanation"));
    }
}

use std::sync::Arc;

use chrono::Duration;
use rand::Rng;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{access_code::CODE_LENGTH, AccessCode},
    repositories::{AccessCodeRepository, QuizRepository},
};

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Bounded retries before generation gives up; only reachable when the
/// live-code namespace is close to saturated.
const MAX_GENERATION_ATTEMPTS: usize = 8;

/// Draw one candidate code value. Pure over the RNG so tests can seed it.
fn generate_candidate<R: Rng>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

/// Code Generator and Lifecycle Manager: mints access codes and owns the
/// issuer-scoped revoke / extend / regenerate transitions.
pub struct AccessCodeService {
    codes: Arc<dyn AccessCodeRepository>,
    quizzes: Arc<dyn QuizRepository>,
}

impl AccessCodeService {
    pub fn new(codes: Arc<dyn AccessCodeRepository>, quizzes: Arc<dyn QuizRepository>) -> Self {
        Self { codes, quizzes }
    }

    pub async fn generate(
        &self,
        quiz_id: &str,
        issuer_id: &str,
        expiry_minutes: i64,
        max_usage: Option<i64>,
    ) -> AppResult<AccessCode> {
        if expiry_minutes <= 0 {
            return Err(AppError::ValidationError(
                "expiry_minutes must be positive".to_string(),
            ));
        }
        if matches!(max_usage, Some(cap) if cap <= 0) {
            return Err(AppError::ValidationError(
                "max_usage must be positive when set".to_string(),
            ));
        }

        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        if quiz.owner_teacher_id != issuer_id {
            return Err(AppError::NotAuthorized(
                "Only the quiz owner can issue access codes".to_string(),
            ));
        }

        self.issue(quiz_id, issuer_id, expiry_minutes, max_usage)
            .await
    }

    /// Allocate a unique value among live codes and persist the new row.
    /// Both a live-value hit and a duplicate-key insert count as collisions
    /// and trigger a retry with a fresh candidate.
    async fn issue(
        &self,
        quiz_id: &str,
        issuer_id: &str,
        expiry_minutes: i64,
        max_usage: Option<i64>,
    ) -> AppResult<AccessCode> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = generate_candidate(&mut rand::thread_rng());

            if self.codes.find_active_by_code(&candidate).await?.is_some() {
                continue;
            }

            let code = AccessCode::new(candidate, quiz_id, issuer_id, expiry_minutes, max_usage);
            match self.codes.create(code).await {
                Ok(created) => {
                    log::debug!("issued access code {} for quiz {}", created.id, quiz_id);
                    return Ok(created);
                }
                // lost the uniqueness race to a concurrent generator
                Err(AppError::AlreadyExists(_)) => continue,
                Err(err) => return Err(err),
            }
        }

        Err(AppError::GenerationExhausted)
    }

    /// Idempotent: revoking an already-inactive code is a no-op success.
    pub async fn revoke(&self, code_id: &str, issuer_id: &str) -> AppResult<()> {
        let code = self.owned_code(code_id, issuer_id).await?;

        if !code.active {
            return Ok(());
        }

        self.codes.deactivate(code_id).await?;
        log::info!("access code {} revoked by {}", code_id, issuer_id);
        Ok(())
    }

    /// Pushes `expires_at` out without touching `active`. Expiry is lazy, so
    /// a code that lapsed in time but was never revoked becomes redeemable
    /// again once the new expiry is in the future.
    pub async fn extend(
        &self,
        code_id: &str,
        issuer_id: &str,
        additional_minutes: i64,
    ) -> AppResult<AccessCode> {
        if additional_minutes <= 0 {
            return Err(AppError::ValidationError(
                "additional_minutes must be positive".to_string(),
            ));
        }

        let code = self.owned_code(code_id, issuer_id).await?;
        let new_expiry = code.expires_at + Duration::minutes(additional_minutes);

        self.codes.set_expires_at(code_id, new_expiry).await
    }

    /// Invalidate-and-reissue: the old code becomes permanently unredeemable
    /// while its usage count and audit history stay readable. The new code
    /// keeps the old expiry span and usage cap.
    pub async fn regenerate(&self, code_id: &str, issuer_id: &str) -> AppResult<AccessCode> {
        let old = self.owned_code(code_id, issuer_id).await?;

        self.codes.deactivate(&old.id).await?;
        log::info!("access code {} superseded by regeneration", old.id);

        let span_minutes = old.expiry_span_minutes().max(1);
        self.issue(&old.quiz_id, issuer_id, span_minutes, old.max_usage)
            .await
    }

    /// Every code issued for one of the caller's quizzes, newest first.
    pub async fn list_for_quiz(&self, quiz_id: &str, issuer_id: &str) -> AppResult<Vec<AccessCode>> {
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        if quiz.owner_teacher_id != issuer_id {
            return Err(AppError::NotAuthorized(
                "Only the quiz owner can list its access codes".to_string(),
            ));
        }

        self.codes.list_by_quiz(quiz_id).await
    }

    async fn owned_code(&self, code_id: &str, issuer_id: &str) -> AppResult<AccessCode> {
        let code = self.codes.find_by_id(code_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Access code with id '{}' not found", code_id))
        })?;

        if code.issuer_id != issuer_id {
            return Err(AppError::NotAuthorized(
                "Only the issuing teacher can manage this code".to_string(),
            ));
        }

        Ok(code)
    }
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the human-typeable code value.
pub const CODE_LENGTH: usize = 6;

/// One issued access code. Never physically deleted: once revoked or
/// superseded it stays in the collection as an inert row so its audit
/// history remains addressable.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AccessCode {
    pub id: String,
    pub code: String,
    pub quiz_id: String,
    pub issuer_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// `false` means administratively revoked or superseded, independent of
    /// time-based expiry.
    pub active: bool,
    pub usage_count: i64,
    pub max_usage: Option<i64>,
}

impl AccessCode {
    pub fn new(
        code: String,
        quiz_id: &str,
        issuer_id: &str,
        expiry_minutes: i64,
        max_usage: Option<i64>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            code,
            quiz_id: quiz_id.to_string(),
            issuer_id: issuer_id.to_string(),
            created_at: now,
            expires_at: now + Duration::minutes(expiry_minutes),
            active: true,
            usage_count: 0,
            max_usage,
        }
    }

    pub fn has_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn usage_exhausted(&self) -> bool {
        self.max_usage.is_some_and(|cap| self.usage_count >= cap)
    }

    /// Redeemability is derived, never stored. Expiry is evaluated lazily
    /// against the supplied instant; only `active` is persisted state.
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        self.active && !self.has_expired(now) && !self.usage_exhausted()
    }

    /// The expiry window this code was originally issued with.
    pub fn expiry_span_minutes(&self) -> i64 {
        (self.expires_at - self.created_at).num_minutes()
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One successful redemption. Append-only: entries are never mutated or
/// deleted by this service; retention is the store's concern.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AccessLogEntry {
    pub id: String,
    pub code_id: String,
    pub student_id: String,
    pub accessed_at: DateTime<Utc>,
}

impl AccessLogEntry {
    pub fn new(code_id: &str, student_id: &str, accessed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            code_id: code_id.to_string(),
            student_id: student_id.to_string(),
            accessed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let now = Utc::now();
        let entry = AccessLogEntry::new("code-1", "student-1", now);

        assert_eq!(entry.code_id, "code-1");
        assert_eq!(entry.student_id, "student-1");
        assert_eq!(entry.accessed_at, now);
        assert!(!entry.id.is_empty());
    }
}

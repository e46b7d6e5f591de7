use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::AccessLogEntry,
    repositories::{AccessCodeRepository, AccessLogRepository},
};

/// The Access Auditor: issuer-scoped, read-only paging over a code's
/// redemption history.
pub struct AccessLogService {
    codes: Arc<dyn AccessCodeRepository>,
    logs: Arc<dyn AccessLogRepository>,
}

impl AccessLogService {
    pub fn new(codes: Arc<dyn AccessCodeRepository>, logs: Arc<dyn AccessLogRepository>) -> Self {
        Self { codes, logs }
    }

    pub async fn list_accesses(
        &self,
        code_id: &str,
        issuer_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<AccessLogEntry>, i64)> {
        let code = self.codes.find_by_id(code_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Access code with id '{}' not found", code_id))
        })?;

        if code.issuer_id != issuer_id {
            return Err(AppError::NotAuthorized(
                "Only the issuing teacher can view access history".to_string(),
            ));
        }

        self.logs.list_by_code(code_id, offset, limit).await
    }
}

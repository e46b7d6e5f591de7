use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateCodeRequest {
    #[validate(length(min = 1))]
    pub quiz_id: String,

    // at most a year out
    #[validate(range(min = 1, max = 525600))]
    pub expiry_minutes: i64,

    #[validate(range(min = 1))]
    pub max_usage: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RedeemCodeRequest {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExtendCodeRequest {
    #[validate(range(min = 1, max = 525600))]
    pub additional_minutes: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).min(100)
    }
}

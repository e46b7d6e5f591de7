pub mod access_code_service;
pub mod access_log_service;
pub mod redemption_service;
pub mod sanitizer;

pub use access_code_service::AccessCodeService;
pub use access_log_service::AccessLogService;
pub use redemption_service::RedemptionService;

pub mod access_code;
pub mod access_log;
pub mod quiz;

pub use access_code::AccessCode;
pub use access_log::AccessLogEntry;
pub use quiz::{Quiz, QuizQuestion, QuizQuestionOption};

pub mod access_code_repository;
pub mod access_log_repository;
pub mod quiz_repository;

pub use access_code_repository::{AccessCodeRepository, MongoAccessCodeRepository};
pub use access_log_repository::{AccessLogRepository, MongoAccessLogRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};

#[cfg(test)]
pub use access_code_repository::MockAccessCodeRepository;
#[cfg(test)]
pub use access_log_repository::MockAccessLogRepository;
#[cfg(test)]
pub use quiz_repository::MockQuizRepository;

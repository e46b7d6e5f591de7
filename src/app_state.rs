use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoAccessCodeRepository, MongoAccessLogRepository, MongoQuizRepository},
    services::{AccessCodeService, AccessLogService, RedemptionService},
};

#[derive(Clone)]
pub struct AppState {
    pub access_code_service: Arc<AccessCodeService>,
    pub redemption_service: Arc<RedemptionService>,
    pub access_log_service: Arc<AccessLogService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let code_repository = Arc::new(MongoAccessCodeRepository::new(&db));
        code_repository.ensure_indexes().await?;

        let log_repository = Arc::new(MongoAccessLogRepository::new(&db));
        log_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));

        let access_code_service = Arc::new(AccessCodeService::new(
            code_repository.clone(),
            quiz_repository.clone(),
        ));
        let redemption_service = Arc::new(RedemptionService::new(
            code_repository.clone(),
            log_repository.clone(),
            quiz_repository,
        ));
        let access_log_service = Arc::new(AccessLogService::new(code_repository, log_repository));

        Ok(Self {
            access_code_service,
            redemption_service,
            access_log_service,
            db,
            config: Arc::new(config),
        })
    }
}

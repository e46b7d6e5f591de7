use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::AccessLogEntry};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessLogRepository: Send + Sync {
    async fn append(&self, entry: AccessLogEntry) -> AppResult<AccessLogEntry>;
    /// Page through a code's redemptions in append order (`accessed_at`
    /// ascending). Returns the page and the total count.
    async fn list_by_code(
        &self,
        code_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<AccessLogEntry>, i64)>;
}

pub struct MongoAccessLogRepository {
    collection: Collection<AccessLogEntry>,
}

impl MongoAccessLogRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("access_logs");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for access_logs collection");

        let code_accessed_index = IndexModel::builder()
            .keys(doc! { "code_id": 1, "accessed_at": 1 })
            .options(
                IndexOptions::builder()
                    .name("code_accessed".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(code_accessed_index).await?;

        log::info!("Successfully created indexes for access_logs collection");
        Ok(())
    }
}

#[async_trait]
impl AccessLogRepository for MongoAccessLogRepository {
    async fn append(&self, entry: AccessLogEntry) -> AppResult<AccessLogEntry> {
        self.collection.insert_one(&entry).await?;
        Ok(entry)
    }

    async fn list_by_code(
        &self,
        code_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<AccessLogEntry>, i64)> {
        let filter = doc! { "code_id": code_id };

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let entries = self
            .collection
            .find(filter)
            .sort(doc! { "accessed_at": 1 })
            .skip(offset.max(0) as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((entries, total))
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Bson},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::AccessCode};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessCodeRepository: Send + Sync {
    /// Insert a new code. Fails with `AlreadyExists` when another live code
    /// holds the same value (uniqueness-index race), which callers treat as
    /// a retry trigger.
    async fn create(&self, code: AccessCode) -> AppResult<AccessCode>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<AccessCode>>;
    /// Lookup by code value among live rows only. Live is the uniqueness
    /// scope, so at most one row can match.
    async fn find_active_by_code(&self, code: &str) -> AppResult<Option<AccessCode>>;
    /// Atomically take one use: the usage-cap check and the increment are a
    /// single conditional write. Returns the updated row, or `None` when the
    /// row was no longer consumable (cap reached or deactivated in between).
    async fn consume_use(&self, id: &str) -> AppResult<Option<AccessCode>>;
    /// Idempotent transition to `active = false`.
    async fn deactivate(&self, id: &str) -> AppResult<()>;
    async fn set_expires_at(
        &self,
        id: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<AccessCode>;
    async fn list_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<AccessCode>>;
}

pub struct MongoAccessCodeRepository {
    collection: Collection<AccessCode>,
}

impl MongoAccessCodeRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("access_codes");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for access_codes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // Uniqueness is scoped to live codes: revoked and superseded rows
        // may keep their value, a second active row may not.
        let live_code_index = IndexModel::builder()
            .keys(doc! { "code": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! { "active": true })
                    .name("code_live_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1 })
            .options(IndexOptions::builder().name("quiz_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(live_code_index).await?;
        self.collection.create_index(quiz_index).await?;

        log::info!("Successfully created indexes for access_codes collection");
        Ok(())
    }
}

#[async_trait]
impl AccessCodeRepository for MongoAccessCodeRepository {
    async fn create(&self, code: AccessCode) -> AppResult<AccessCode> {
        self.collection.insert_one(&code).await?;
        Ok(code)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<AccessCode>> {
        let code = self.collection.find_one(doc! { "id": id }).await?;
        Ok(code)
    }

    async fn find_active_by_code(&self, code: &str) -> AppResult<Option<AccessCode>> {
        let found = self
            .collection
            .find_one(doc! { "code": code, "active": true })
            .await?;
        Ok(found)
    }

    async fn consume_use(&self, id: &str) -> AppResult<Option<AccessCode>> {
        // Cap check and increment in one conditional write; two concurrent
        // redemptions can never jointly exceed max_usage.
        let filter = doc! {
            "id": id,
            "active": true,
            "$or": [
                { "max_usage": Bson::Null },
                { "$expr": { "$lt": ["$usage_count", "$max_usage"] } },
            ],
        };

        let updated = self
            .collection
            .find_one_and_update(filter, doc! { "$inc": { "usage_count": 1 } })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    async fn deactivate(&self, id: &str) -> AppResult<()> {
        self.collection
            .update_one(doc! { "id": id }, doc! { "$set": { "active": false } })
            .await?;
        Ok(())
    }

    async fn set_expires_at(
        &self,
        id: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<AccessCode> {
        use crate::errors::AppError;

        let updated = self
            .collection
            .find_one_and_update(
                doc! { "id": id },
                doc! { "$set": { "expires_at": to_bson(&expires_at)? } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        updated.ok_or_else(|| AppError::NotFound(format!("Access code with id '{}' not found", id)))
    }

    async fn list_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<AccessCode>> {
        let codes = self
            .collection
            .find(doc! { "quiz_id": quiz_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(codes)
    }
}

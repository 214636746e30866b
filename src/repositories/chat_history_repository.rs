use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson},
    options::{IndexOptions, UpdateOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{ChatHistory, Exchange},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatHistoryRepository: Send + Sync {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<ChatHistory>>;
    async fn append_exchange(&self, user_id: &str, exchange: Exchange) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoChatHistoryRepository {
    collection: Collection<ChatHistory>,
}

impl MongoChatHistoryRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("chat_history");
        Self { collection }
    }
}

#[async_trait]
impl ChatHistoryRepository for MongoChatHistoryRepository {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<ChatHistory>> {
        let history = self
            .collection
            .find_one(doc! { "user_id": user_id })
            .await?;
        Ok(history)
    }

    async fn append_exchange(&self, user_id: &str, exchange: Exchange) -> AppResult<()> {
        let exchange_bson = to_bson(&exchange)?;

        // One document per user; first exchange creates it
        self.collection
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$push": { "history": exchange_bson } },
            )
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await?;

        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for chat_history collection");

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(user_index).await?;

        log::info!("Successfully created indexes for chat_history collection");
        Ok(())
    }
}

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Media,
};

#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn create(&self, media: Media) -> AppResult<Media>;
    async fn list(&self, limit: i64) -> AppResult<Vec<Media>>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoMediaRepository {
    collection: Collection<Media>,
}

impl MongoMediaRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("media");
        Self { collection }
    }
}

#[async_trait]
impl MediaRepository for MongoMediaRepository {
    async fn create(&self, media: Media) -> AppResult<Media> {
        self.collection.insert_one(&media).await?;
        Ok(media)
    }

    async fn list(&self, limit: i64) -> AppResult<Vec<Media>> {
        let items = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(items)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Media with id '{}' not found", id)));
        }

        Ok(())
    }
}

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{db::Database, errors::AppResult, models::domain::Subscription};

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn list(&self, limit: i64) -> AppResult<Vec<Subscription>>;
}

pub struct MongoSubscriptionRepository {
    collection: Collection<Subscription>,
}

impl MongoSubscriptionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("subscriptions");
        Self { collection }
    }
}

#[async_trait]
impl SubscriptionRepository for MongoSubscriptionRepository {
    async fn list(&self, limit: i64) -> AppResult<Vec<Subscription>> {
        let items = self
            .collection
            .find(doc! {})
            .sort(doc! { "start_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(items)
    }
}

use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::RefreshToken};

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn create(&self, token: RefreshToken) -> AppResult<RefreshToken>;
    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>>;
    async fn delete_by_token(&self, token: &str) -> AppResult<()>;
}

pub struct MongoRefreshTokenRepository {
    collection: Collection<RefreshToken>,
}

impl MongoRefreshTokenRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("refresh_tokens");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let token_index = IndexModel::builder()
            .keys(doc! { "token": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("token_unique".to_string())
                    .build(),
            )
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().name("user_id".to_string()).build())
            .build();

        self.collection.create_index(token_index).await?;
        self.collection.create_index(user_index).await?;

        Ok(())
    }
}

#[async_trait]
impl RefreshTokenRepository for MongoRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        self.collection.insert_one(&token).await?;
        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        let found = self.collection.find_one(doc! { "token": token }).await?;
        Ok(found)
    }

    async fn delete_by_token(&self, token: &str) -> AppResult<()> {
        self.collection.delete_one(doc! { "token": token }).await?;
        Ok(())
    }
}

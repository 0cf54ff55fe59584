use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Ebook,
};

#[async_trait]
pub trait EbookRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Ebook>>;
    async fn title_exists(&self, title: &str) -> AppResult<bool>;
    async fn list(
        &self,
        category_key: &str,
        subcategory_id: &str,
        language: Option<&str>,
        title_query: Option<&str>,
    ) -> AppResult<Vec<Ebook>>;
    async fn create(&self, ebook: Ebook) -> AppResult<Ebook>;
    async fn update(&self, ebook: Ebook) -> AppResult<Ebook>;
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Atomic $inc; silently a no-op when the book is gone.
    async fn increment_download(&self, id: &str) -> AppResult<()>;
}

pub struct MongoEbookRepository {
    collection: Collection<Ebook>,
}

impl MongoEbookRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("ebooks");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for ebooks collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let title_index = IndexModel::builder()
            .keys(doc! { "title": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("title_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(title_index).await?;

        Ok(())
    }
}

#[async_trait]
impl EbookRepository for MongoEbookRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Ebook>> {
        let ebook = self.collection.find_one(doc! { "id": id }).await?;
        Ok(ebook)
    }

    async fn title_exists(&self, title: &str) -> AppResult<bool> {
        let ebook = self.collection.find_one(doc! { "title": title }).await?;
        Ok(ebook.is_some())
    }

    async fn list(
        &self,
        category_key: &str,
        subcategory_id: &str,
        language: Option<&str>,
        title_query: Option<&str>,
    ) -> AppResult<Vec<Ebook>> {
        let mut filter = doc! {
            "category_key": category_key,
            "subcategory_id": subcategory_id,
        };
        // Array membership: matches when the language list contains the value
        if let Some(language) = language {
            filter.insert("languages", language);
        }
        if let Some(q) = title_query {
            filter.insert(
                "title",
                doc! { "$regex": regex::escape(q), "$options": "i" },
            );
        }

        let ebooks = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(ebooks)
    }

    async fn create(&self, ebook: Ebook) -> AppResult<Ebook> {
        self.collection.insert_one(&ebook).await?;
        Ok(ebook)
    }

    async fn update(&self, ebook: Ebook) -> AppResult<Ebook> {
        let result = self
            .collection
            .replace_one(doc! { "id": &ebook.id }, &ebook)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "E-book with id '{}' not found",
                ebook.id
            )));
        }

        Ok(ebook)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "E-book with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn increment_download(&self, id: &str) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "id": id },
                doc! { "$inc": { "download_count": 1_i64 } },
            )
            .await?;
        Ok(())
    }
}

use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::Page};

#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &str, language: &str) -> AppResult<Option<Page>>;
    async fn upsert(&self, page: Page) -> AppResult<Page>;
}

pub struct MongoPageRepository {
    collection: Collection<Page>,
}

impl MongoPageRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("pages");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        // One "about-us" per language
        let slug_lang_index = IndexModel::builder()
            .keys(doc! { "slug": 1, "language": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("slug_language_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(slug_lang_index).await?;
        Ok(())
    }
}

#[async_trait]
impl PageRepository for MongoPageRepository {
    async fn find_by_slug(&self, slug: &str, language: &str) -> AppResult<Option<Page>> {
        let page = self
            .collection
            .find_one(doc! { "slug": slug, "language": language })
            .await?;
        Ok(page)
    }

    async fn upsert(&self, page: Page) -> AppResult<Page> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.collection
            .replace_one(
                doc! { "slug": &page.slug, "language": &page.language },
                &page,
            )
            .with_options(options)
            .await?;
        Ok(page)
    }
}

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Category, Subcategory},
};

/// Category/subcategory tree for one content section. Each section (current
/// affairs, quizzes, e-books, papers) gets its own instance over its own
/// collection pair.
#[async_trait]
pub trait TaxonomyRepository: Send + Sync {
    async fn list_categories(&self) -> AppResult<Vec<Category>>;
    async fn find_category(&self, id: &str) -> AppResult<Option<Category>>;
    async fn create_category(&self, category: Category) -> AppResult<Category>;
    async fn update_category(&self, category: Category) -> AppResult<Category>;
    async fn delete_category(&self, id: &str) -> AppResult<()>;

    async fn list_subcategories(&self, category_key: &str) -> AppResult<Vec<Subcategory>>;
    async fn list_all_subcategories(&self) -> AppResult<Vec<Subcategory>>;
    async fn find_subcategory(&self, id: &str) -> AppResult<Option<Subcategory>>;
    async fn subcategory_exists(&self, id: &str, category_key: &str) -> AppResult<bool>;
    async fn create_subcategory(&self, subcategory: Subcategory) -> AppResult<Subcategory>;
    async fn update_subcategory(&self, subcategory: Subcategory) -> AppResult<Subcategory>;
    async fn delete_subcategory(&self, id: &str) -> AppResult<()>;
}

pub struct MongoTaxonomyRepository {
    categories: Collection<Category>,
    subcategories: Collection<Subcategory>,
}

impl MongoTaxonomyRepository {
    pub fn new(db: &Database, categories_collection: &str, subcategories_collection: &str) -> Self {
        Self {
            categories: db.get_collection(categories_collection),
            subcategories: db.get_collection(subcategories_collection),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let unique_id = |name: &str| {
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name(name.to_string())
                        .build(),
                )
                .build()
        };

        self.categories.create_index(unique_id("id_unique")).await?;
        self.subcategories
            .create_index(unique_id("id_unique"))
            .await?;

        let category_key_index = IndexModel::builder()
            .keys(doc! { "category_key": 1 })
            .options(IndexOptions::builder().name("category_key".to_string()).build())
            .build();
        self.subcategories.create_index(category_key_index).await?;

        Ok(())
    }
}

#[async_trait]
impl TaxonomyRepository for MongoTaxonomyRepository {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let categories = self
            .categories
            .find(doc! {})
            .sort(doc! { "title": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(categories)
    }

    async fn find_category(&self, id: &str) -> AppResult<Option<Category>> {
        let category = self.categories.find_one(doc! { "id": id }).await?;
        Ok(category)
    }

    async fn create_category(&self, category: Category) -> AppResult<Category> {
        self.categories.insert_one(&category).await?;
        Ok(category)
    }

    async fn update_category(&self, category: Category) -> AppResult<Category> {
        let result = self
            .categories
            .replace_one(doc! { "id": &category.id }, &category)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Category with id '{}' not found",
                category.id
            )));
        }

        Ok(category)
    }

    async fn delete_category(&self, id: &str) -> AppResult<()> {
        let result = self.categories.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Category with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn list_subcategories(&self, category_key: &str) -> AppResult<Vec<Subcategory>> {
        let subcategories = self
            .subcategories
            .find(doc! { "category_key": category_key })
            .sort(doc! { "title": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(subcategories)
    }

    async fn list_all_subcategories(&self) -> AppResult<Vec<Subcategory>> {
        let subcategories = self
            .subcategories
            .find(doc! {})
            .sort(doc! { "title": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(subcategories)
    }

    async fn find_subcategory(&self, id: &str) -> AppResult<Option<Subcategory>> {
        let subcategory = self.subcategories.find_one(doc! { "id": id }).await?;
        Ok(subcategory)
    }

    async fn subcategory_exists(&self, id: &str, category_key: &str) -> AppResult<bool> {
        let subcategory = self
            .subcategories
            .find_one(doc! { "id": id, "category_key": category_key })
            .await?;
        Ok(subcategory.is_some())
    }

    async fn create_subcategory(&self, subcategory: Subcategory) -> AppResult<Subcategory> {
        self.subcategories.insert_one(&subcategory).await?;
        Ok(subcategory)
    }

    async fn update_subcategory(&self, subcategory: Subcategory) -> AppResult<Subcategory> {
        let result = self
            .subcategories
            .replace_one(doc! { "id": &subcategory.id }, &subcategory)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Subcategory with id '{}' not found",
                subcategory.id
            )));
        }

        Ok(subcategory)
    }

    async fn delete_subcategory(&self, id: &str) -> AppResult<()> {
        let result = self.subcategories.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Subcategory with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}

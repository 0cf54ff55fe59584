use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Category, Ebook, Subcategory},
        dto::{
            request::{
                CreateCategoryRequest, CreateEbookRequest, CreateSubcategoryRequest,
                EbookListQuery, UpdateCategoryRequest, UpdateEbookRequest,
            },
            response::{CategoryWithSubs, EbookListItem, SubcategoryTile},
        },
    },
    repositories::{EbookRepository, TaxonomyRepository},
};

pub struct EbookService {
    ebooks: Arc<dyn EbookRepository>,
    taxonomy: Arc<dyn TaxonomyRepository>,
}

impl EbookService {
    pub fn new(ebooks: Arc<dyn EbookRepository>, taxonomy: Arc<dyn TaxonomyRepository>) -> Self {
        Self { ebooks, taxonomy }
    }

    /* ----- Public ----- */

    pub async fn get_categories(&self) -> AppResult<Vec<Category>> {
        self.taxonomy.list_categories().await
    }

    pub async fn get_subcategories(&self, category_key: &str) -> AppResult<Vec<Subcategory>> {
        self.taxonomy.list_subcategories(category_key).await
    }

    pub async fn get_categories_with_subs(&self) -> AppResult<Vec<CategoryWithSubs>> {
        let categories = self.taxonomy.list_categories().await?;
        let subcategories = self.taxonomy.list_all_subcategories().await?;

        let mut by_category: HashMap<String, Vec<Subcategory>> = HashMap::new();
        for sub in subcategories {
            by_category.entry(sub.category_key.clone()).or_default().push(sub);
        }

        Ok(categories
            .into_iter()
            .map(|category| {
                let subs = by_category.remove(&category.id).unwrap_or_default();
                CategoryWithSubs {
                    id: category.id,
                    title: category.title,
                    logo: category.logo,
                    description: category.description,
                    subcategories: subs
                        .into_iter()
                        .map(|s| SubcategoryTile {
                            id: s.id,
                            title: s.title,
                            logo: s.logo,
                            description: s.description,
                        })
                        .collect(),
                }
            })
            .collect())
    }

    pub async fn list(
        &self,
        category_key: &str,
        subcategory_id: &str,
        query: &EbookListQuery,
    ) -> AppResult<Vec<EbookListItem>> {
        let ebooks = self
            .ebooks
            .list(
                category_key,
                subcategory_id,
                query.lang.as_deref(),
                query.q.as_deref(),
            )
            .await?;
        Ok(ebooks.into_iter().map(EbookListItem::from).collect())
    }

    pub async fn detail(&self, ebook_id: &str) -> AppResult<Ebook> {
        self.ebooks
            .find_by_id(ebook_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    pub async fn track_download(&self, ebook_id: &str) -> AppResult<()> {
        self.ebooks.increment_download(ebook_id).await
    }

    /* ----- Admin ----- */

    pub async fn create_category(&self, request: CreateCategoryRequest) -> AppResult<Category> {
        if self.taxonomy.find_category(&request.id).await?.is_some() {
            return Err(AppError::AlreadyExists("Category exists".to_string()));
        }

        let category = Category::new(&request.id, &request.title, request.logo, request.description);
        self.taxonomy.create_category(category).await
    }

    pub async fn update_category(
        &self,
        id: &str,
        request: UpdateCategoryRequest,
    ) -> AppResult<Category> {
        let mut category = self
            .taxonomy
            .find_category(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id '{}' not found", id)))?;

        if let Some(title) = request.title {
            category.title = title;
        }
        if let Some(logo) = request.logo {
            category.logo = Some(logo);
        }
        if let Some(description) = request.description {
            category.description = Some(description);
        }

        self.taxonomy.update_category(category).await
    }

    pub async fn delete_category(&self, id: &str) -> AppResult<()> {
        self.taxonomy.delete_category(id).await
    }

    pub async fn create_subcategory(
        &self,
        category_key: &str,
        request: CreateSubcategoryRequest,
    ) -> AppResult<Subcategory> {
        if self.taxonomy.find_category(category_key).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Category with id '{}' not found",
                category_key
            )));
        }

        let subcategory = Subcategory::new(
            &request.id,
            category_key,
            &request.title,
            request.logo,
            request.description,
        );
        self.taxonomy.create_subcategory(subcategory).await
    }

    pub async fn update_subcategory(
        &self,
        id: &str,
        request: UpdateCategoryRequest,
    ) -> AppResult<Subcategory> {
        let mut subcategory = self
            .taxonomy
            .find_subcategory(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Subcategory with id '{}' not found", id)))?;

        if let Some(title) = request.title {
            subcategory.title = title;
        }
        if let Some(logo) = request.logo {
            subcategory.logo = Some(logo);
        }
        if let Some(description) = request.description {
            subcategory.description = Some(description);
        }

        self.taxonomy.update_subcategory(subcategory).await
    }

    pub async fn delete_subcategory(&self, id: &str) -> AppResult<()> {
        self.taxonomy.delete_subcategory(id).await
    }

    pub async fn create_ebook(
        &self,
        category_key: &str,
        subcategory_id: &str,
        request: CreateEbookRequest,
    ) -> AppResult<Ebook> {
        if !self
            .taxonomy
            .subcategory_exists(subcategory_id, category_key)
            .await?
        {
            return Err(AppError::NotFound(
                "Invalid category/subcategory".to_string(),
            ));
        }

        // Titles double as a natural key
        if self.ebooks.title_exists(&request.title).await? {
            return Err(AppError::AlreadyExists(format!(
                "E-book titled '{}' already exists",
                request.title
            )));
        }

        let mut ebook = Ebook::new(&request.title, category_key, subcategory_id, &request.pdf_url);
        ebook.thumbnail = request.thumbnail;
        ebook.description = request.description;
        if let Some(languages) = request.languages {
            ebook.languages = languages;
        }
        if let Some(validity) = request.validity {
            ebook.validity = validity;
        }
        if let Some(is_paid) = request.is_paid {
            ebook.is_paid = is_paid;
        }

        self.ebooks.create(ebook).await
    }

    pub async fn update_ebook(&self, id: &str, request: UpdateEbookRequest) -> AppResult<Ebook> {
        let mut ebook = self
            .ebooks
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        if let Some(title) = request.title {
            ebook.title = title;
        }
        if let Some(thumbnail) = request.thumbnail {
            ebook.thumbnail = Some(thumbnail);
        }
        if let Some(pdf_url) = request.pdf_url {
            ebook.pdf_url = pdf_url;
        }
        if let Some(description) = request.description {
            ebook.description = Some(description);
        }
        if let Some(languages) = request.languages {
            ebook.languages = languages;
        }
        if let Some(validity) = request.validity {
            ebook.validity = validity;
        }
        if let Some(is_paid) = request.is_paid {
            ebook.is_paid = is_paid;
        }

        self.ebooks.update(ebook).await
    }

    pub async fn delete_ebook(&self, id: &str) -> AppResult<()> {
        self.ebooks.delete(id).await
    }
}

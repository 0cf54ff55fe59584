use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::Page, dto::request::UpsertPageRequest},
    repositories::PageRepository,
};

pub struct PageService {
    pages: Arc<dyn PageRepository>,
}

impl PageService {
    pub fn new(pages: Arc<dyn PageRepository>) -> Self {
        Self { pages }
    }

    pub async fn get_page(&self, slug: &str, language: Option<&str>) -> AppResult<Page> {
        let language = language.unwrap_or("en");

        self.pages
            .find_by_slug(slug, language)
            .await?
            .ok_or_else(|| AppError::NotFound("Page not found".to_string()))
    }

    /// Create-or-replace for the (slug, language) pair; the page keeps its id
    /// across edits.
    pub async fn upsert_page(&self, request: UpsertPageRequest) -> AppResult<Page> {
        let language = request.language.as_deref().unwrap_or("en");

        let mut page = match self.pages.find_by_slug(&request.slug, language).await? {
            Some(existing) => existing,
            None => Page::new(&request.slug, language, &request.title),
        };

        page.title = request.title;
        page.content = request.content.unwrap_or_default();
        page.images = request.images.unwrap_or_default();
        page.updated_at = Utc::now();

        self.pages.upsert(page).await
    }
}

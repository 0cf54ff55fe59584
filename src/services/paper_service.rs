use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Category, PreviousPaper, Subcategory},
        dto::{
            request::{
                CreateCategoryRequest, CreatePaperRequest, CreateSubcategoryRequest,
                UpdateCategoryRequest, UpdatePaperRequest,
            },
            response::{MonthFacet, PaperSummary, PapersListResponse},
        },
    },
    repositories::{PaperRepository, TaxonomyRepository},
    services::month_label,
};

const RECENT_PAPERS_LIMIT: i64 = 10;

pub struct PaperService {
    papers: Arc<dyn PaperRepository>,
    taxonomy: Arc<dyn TaxonomyRepository>,
}

impl PaperService {
    pub fn new(papers: Arc<dyn PaperRepository>, taxonomy: Arc<dyn TaxonomyRepository>) -> Self {
        Self { papers, taxonomy }
    }

    /* ----- Public ----- */

    pub async fn get_categories(&self) -> AppResult<Vec<Category>> {
        self.taxonomy.list_categories().await
    }

    pub async fn get_subcategories(&self, category_key: &str) -> AppResult<Vec<Subcategory>> {
        self.taxonomy.list_subcategories(category_key).await
    }

    /// The filtered list plus a sidebar of the subcategory's latest papers.
    pub async fn list(
        &self,
        category_key: &str,
        subcategory_id: &str,
        month: Option<&str>,
    ) -> AppResult<PapersListResponse> {
        let papers = self.papers.list(category_key, subcategory_id, month).await?;

        let recent_papers = self
            .papers
            .recent_for_subcategory(category_key, subcategory_id, RECENT_PAPERS_LIMIT)
            .await?;

        Ok(PapersListResponse {
            papers,
            recent_papers: recent_papers.into_iter().map(PaperSummary::from).collect(),
        })
    }

    pub async fn recent(&self) -> AppResult<Vec<PaperSummary>> {
        let papers = self.papers.recent(RECENT_PAPERS_LIMIT).await?;
        Ok(papers.into_iter().map(PaperSummary::from).collect())
    }

    pub async fn archives(&self) -> AppResult<Vec<MonthFacet>> {
        let archives = self.papers.month_archives().await?;

        Ok(archives
            .into_iter()
            .map(|(month, count)| match month {
                Some(month) => MonthFacet {
                    label: month_label(&month),
                    key: month,
                    count,
                },
                None => MonthFacet {
                    key: "Unknown".to_string(),
                    label: "Unknown".to_string(),
                    count,
                },
            })
            .collect())
    }

    /// Download tracking must never block the download itself; failures are
    /// logged and reported as not-recorded.
    pub async fn track_download(&self, paper_id: &str) -> bool {
        match self.papers.increment_download(paper_id).await {
            Ok(()) => true,
            Err(err) => {
                log::error!("trackDownload error for paper {}: {}", paper_id, err);
                false
            }
        }
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

    pub async fn create_paper(
        &self,
        category_key: &str,
        subcategory_id: &str,
        request: CreatePaperRequest,
    ) -> AppResult<PreviousPaper> {
        if !self
            .taxonomy
            .subcategory_exists(subcategory_id, category_key)
            .await?
        {
            return Err(AppError::NotFound(
                "Invalid category/subcategory".to_string(),
            ));
        }

        let mut paper =
            PreviousPaper::new(&request.title, &request.pdf_url, category_key, subcategory_id);
        paper.logo = request.logo;
        paper.month = request.month;
        if let Some(is_paid) = request.is_paid {
            paper.is_paid = is_paid;
        }

        self.papers.create(paper).await
    }

    pub async fn update_paper(&self, id: &str, request: UpdatePaperRequest) -> AppResult<PreviousPaper> {
        let mut paper = self
            .papers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Paper not found".to_string()))?;

        if let Some(title) = request.title {
            paper.title = title;
        }
        if let Some(pdf_url) = request.pdf_url {
            paper.pdf_url = pdf_url;
        }
        if let Some(logo) = request.logo {
            paper.logo = Some(logo);
        }
        if let Some(month) = request.month {
            paper.month = Some(month);
        }
        if let Some(is_paid) = request.is_paid {
            paper.is_paid = is_paid;
        }

        self.papers.update(paper).await
    }

    pub async fn delete_paper(&self, id: &str) -> AppResult<()> {
        self.papers.delete(id).await
    }
}

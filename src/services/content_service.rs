use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Article, ArticleDetail, Category, Subcategory},
        dto::{
            request::{
                ArticleListQuery, CreateArticleRequest, CreateCategoryRequest,
                CreateSubcategoryRequest, UpdateArticleRequest, UpdateCategoryRequest,
            },
            response::{
                ArticleDetailResponse, ArticleListResponse, ArticleView, Breadcrumbs,
                CategoryLanding, CategoryWithSubs, LandingTile, ListMeta, MonthFacet, RecentPost,
                SubcategoryTile,
            },
        },
    },
    repositories::{ArticleFilter, ArticleRepository, ArticleSearch, TaxonomyRepository},
    services::month_label,
};

const KNOWN_SCOPES: [&str; 8] = [
    "international",
    "state news",
    "banking",
    "business news",
    "books & authors",
    "sports",
    "awards",
    "all",
];

const RECENT_POSTS_LIMIT: i64 = 8;

pub struct ContentService {
    articles: Arc<dyn ArticleRepository>,
    taxonomy: Arc<dyn TaxonomyRepository>,
}

impl ContentService {
    pub fn new(articles: Arc<dyn ArticleRepository>, taxonomy: Arc<dyn TaxonomyRepository>) -> Self {
        Self { articles, taxonomy }
    }

    fn month_facets(raw: Vec<(String, i64)>) -> Vec<MonthFacet> {
        raw.into_iter()
            .map(|(key, count)| MonthFacet {
                label: month_label(&key),
                key,
                count,
            })
            .collect()
    }

    /* ----- Public ----- */

    pub async fn get_categories(&self) -> AppResult<Vec<Category>> {
        self.taxonomy.list_categories().await
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

    /// Subcategory tiles for a category page, each with its article count.
    pub async fn category_landing(&self, category_key: &str) -> AppResult<CategoryLanding> {
        let category_key = category_key.to_lowercase();

        let category = self
            .taxonomy
            .find_category(&category_key)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        let subcategories = self.taxonomy.list_subcategories(&category_key).await?;

        let sub_ids: Vec<String> = subcategories.iter().map(|s| s.id.clone()).collect();
        let counts: HashMap<String, i64> = self
            .articles
            .count_by_subcategory(&sub_ids)
            .await?
            .into_iter()
            .collect();

        let tiles = subcategories
            .into_iter()
            .map(|sub| LandingTile {
                count: counts.get(&sub.id).copied().unwrap_or(0),
                logo: sub.logo.or_else(|| category.logo.clone()),
                id: sub.id,
                title: sub.title,
                description: sub.description,
            })
            .collect();

        Ok(CategoryLanding { category, tiles })
    }

    pub async fn list_articles(
        &self,
        category_key: &str,
        subcategory_id: &str,
        query: &ArticleListQuery,
    ) -> AppResult<ArticleListResponse> {
        let category_key = category_key.to_lowercase();
        let language = query.lang.clone().unwrap_or_else(|| "en".to_string());

        let q = query.q.as_deref().unwrap_or("").trim().to_string();
        let search = if q.is_empty() {
            None
        } else {
            let q_lower = q.to_lowercase();
            if KNOWN_SCOPES.contains(&q_lower.as_str()) {
                // "all" is a scope that means no scope filter
                if q_lower == "all" {
                    None
                } else {
                    Some(ArticleSearch::Scope(q))
                }
            } else {
                Some(ArticleSearch::Text(q))
            }
        };

        let filter = ArticleFilter {
            category_key: category_key.clone(),
            subcategory_id: subcategory_id.to_string(),
            month: query.month.clone(),
            language: Some(language.clone()),
            search,
        };

        let page = query.page();
        let limit = query.limit();
        let skip = (page - 1) * limit;

        let (articles, total) = self.articles.list(&filter, skip, limit).await?;

        let months = self
            .articles
            .month_facets(&category_key, subcategory_id, &language)
            .await?;

        Ok(ArticleListResponse {
            meta: ListMeta { total, page, limit },
            articles,
            months: Self::month_facets(months),
        })
    }

    pub async fn article_detail(
        &self,
        category_key: &str,
        subcategory_id: &str,
        article_id: &str,
        requested_lang: Option<&str>,
    ) -> AppResult<ArticleDetailResponse> {
        let article = self
            .articles
            .find_in_section(article_id, category_key, subcategory_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Article not found".to_string()))?;

        if let Some(lang) = requested_lang {
            if article.language != lang {
                return Err(AppError::NotFound(
                    "Article not found for requested language".to_string(),
                ));
            }
        }

        let detail = self.articles.get_detail(&article.id).await?;

        let (category, subcategory) = (
            self.taxonomy.find_category(category_key).await?,
            self.taxonomy.find_subcategory(subcategory_id).await?,
        );

        let recent = self
            .articles
            .recent(
                category_key,
                subcategory_id,
                &article.language,
                &article.id,
                RECENT_POSTS_LIMIT,
            )
            .await?;

        let months = self
            .articles
            .month_facets(category_key, subcategory_id, &article.language)
            .await?;

        Ok(ArticleDetailResponse {
            article: ArticleView {
                body: detail.as_ref().map(|d| d.body.clone()).unwrap_or_default(),
                content_url: detail.map(|d| d.content_url).unwrap_or_default(),
                article,
            },
            breadcrumbs: Breadcrumbs {
                category: category.map(|c| c.title),
                subcategory: subcategory.map(|s| s.title),
            },
            recent_posts: recent
                .into_iter()
                .map(|a| RecentPost {
                    id: a.id,
                    title: a.title,
                    date: a.date,
                })
                .collect(),
            months: Self::month_facets(months),
        })
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

    pub async fn create_article(
        &self,
        category_key: &str,
        subcategory_id: &str,
        request: CreateArticleRequest,
    ) -> AppResult<Article> {
        let mut article = Article::new(&request.title, category_key, subcategory_id);
        article.excerpt = request.excerpt;
        if let Some(date) = request.date {
            article.date = date;
        }
        article.month = request.month;
        article.scope = request.scope;
        article.image = request.image;
        if let Some(language) = request.language {
            article.language = language;
        }
        article.author = request.author;

        // Metadata and heavy body live in separate collections
        let detail = ArticleDetail {
            article_id: article.id.clone(),
            body: request.body.unwrap_or_default(),
            content_url: request.content_url.unwrap_or_default(),
        };

        self.articles.create(article, detail).await
    }

    pub async fn update_article(&self, id: &str, request: UpdateArticleRequest) -> AppResult<Article> {
        let mut article = self
            .articles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Article not found".to_string()))?;

        if let Some(title) = request.title {
            article.title = title;
        }
        if let Some(excerpt) = request.excerpt {
            article.excerpt = Some(excerpt);
        }
        if let Some(date) = request.date {
            article.date = date;
        }
        if let Some(month) = request.month {
            article.month = Some(month);
        }
        if let Some(scope) = request.scope {
            article.scope = Some(scope);
        }
        if let Some(image) = request.image {
            article.image = Some(image);
        }
        if let Some(language) = request.language {
            article.language = language;
        }
        if let Some(author) = request.author {
            article.author = Some(author);
        }
        article.updated_at = Utc::now();

        let article = self.articles.update(article).await?;

        // Body updates upsert, in case the detail record went missing
        if request.body.is_some() || request.content_url.is_some() {
            let existing = self.articles.get_detail(id).await?;
            let detail = ArticleDetail {
                article_id: id.to_string(),
                body: request
                    .body
                    .or_else(|| existing.as_ref().map(|d| d.body.clone()))
                    .unwrap_or_default(),
                content_url: request
                    .content_url
                    .or(existing.map(|d| d.content_url))
                    .unwrap_or_default(),
            };
            self.articles.upsert_detail(detail).await?;
        }

        Ok(article)
    }

    pub async fn delete_article(&self, id: &str) -> AppResult<()> {
        self.articles.delete(id).await
    }
}

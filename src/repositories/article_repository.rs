use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Article, ArticleDetail},
    repositories::doc_count,
};

/// Text search is limited to title/excerpt; the body lives in a different
/// collection and is not searched.
#[derive(Debug, Clone)]
pub enum ArticleSearch {
    /// Exact (case-insensitive) match on the scope field, e.g. "sports"
    Scope(String),
    /// Substring match on title or excerpt
    Text(String),
}

#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub category_key: String,
    pub subcategory_id: String,
    pub month: Option<String>,
    pub language: Option<String>,
    pub search: Option<ArticleSearch>,
}

impl ArticleFilter {
    fn to_document(&self) -> Document {
        let mut filter = doc! {
            "category_key": &self.category_key,
            "subcategory_id": &self.subcategory_id,
        };
        if let Some(month) = &self.month {
            filter.insert("month", month);
        }
        if let Some(language) = &self.language {
            filter.insert("language", language);
        }
        match &self.search {
            Some(ArticleSearch::Scope(scope)) => {
                filter.insert(
                    "scope",
                    doc! { "$regex": format!("^{}$", regex::escape(scope)), "$options": "i" },
                );
            }
            Some(ArticleSearch::Text(q)) => {
                let pattern = doc! { "$regex": regex::escape(q), "$options": "i" };
                filter.insert(
                    "$or",
                    vec![
                        doc! { "title": pattern.clone() },
                        doc! { "excerpt": pattern },
                    ],
                );
            }
            None => {}
        }
        filter
    }
}

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Article>>;
    async fn find_in_section(
        &self,
        id: &str,
        category_key: &str,
        subcategory_id: &str,
    ) -> AppResult<Option<Article>>;
    async fn list(&self, filter: &ArticleFilter, skip: i64, limit: i64)
        -> AppResult<(Vec<Article>, i64)>;
    async fn recent(
        &self,
        category_key: &str,
        subcategory_id: &str,
        language: &str,
        exclude_id: &str,
        limit: i64,
    ) -> AppResult<Vec<Article>>;
    async fn month_facets(
        &self,
        category_key: &str,
        subcategory_id: &str,
        language: &str,
    ) -> AppResult<Vec<(String, i64)>>;
    async fn count_by_subcategory(&self, subcategory_ids: &[String]) -> AppResult<Vec<(String, i64)>>;

    async fn create(&self, article: Article, detail: ArticleDetail) -> AppResult<Article>;
    async fn update(&self, article: Article) -> AppResult<Article>;
    async fn get_detail(&self, article_id: &str) -> AppResult<Option<ArticleDetail>>;
    async fn upsert_detail(&self, detail: ArticleDetail) -> AppResult<()>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoArticleRepository {
    articles: Collection<Article>,
    details: Collection<ArticleDetail>,
}

impl MongoArticleRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            articles: db.get_collection("articles"),
            details: db.get_collection("articledetails"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for articles collections");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let section_index = IndexModel::builder()
            .keys(doc! { "category_key": 1, "subcategory_id": 1, "date": -1 })
            .options(IndexOptions::builder().name("section_date".to_string()).build())
            .build();

        let detail_index = IndexModel::builder()
            .keys(doc! { "article_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("article_id_unique".to_string())
                    .build(),
            )
            .build();

        self.articles.create_index(id_index).await?;
        self.articles.create_index(section_index).await?;
        self.details.create_index(detail_index).await?;

        Ok(())
    }
}

#[async_trait]
impl ArticleRepository for MongoArticleRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Article>> {
        let article = self.articles.find_one(doc! { "id": id }).await?;
        Ok(article)
    }

    async fn find_in_section(
        &self,
        id: &str,
        category_key: &str,
        subcategory_id: &str,
    ) -> AppResult<Option<Article>> {
        let article = self
            .articles
            .find_one(doc! {
                "id": id,
                "category_key": category_key,
                "subcategory_id": subcategory_id,
            })
            .await?;
        Ok(article)
    }

    async fn list(
        &self,
        filter: &ArticleFilter,
        skip: i64,
        limit: i64,
    ) -> AppResult<(Vec<Article>, i64)> {
        let filter_doc = filter.to_document();

        let total = self.articles.count_documents(filter_doc.clone()).await? as i64;

        let articles = self
            .articles
            .find(filter_doc)
            .sort(doc! { "date": -1 })
            .skip(skip.max(0) as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((articles, total))
    }

    async fn recent(
        &self,
        category_key: &str,
        subcategory_id: &str,
        language: &str,
        exclude_id: &str,
        limit: i64,
    ) -> AppResult<Vec<Article>> {
        let articles = self
            .articles
            .find(doc! {
                "category_key": category_key,
                "subcategory_id": subcategory_id,
                "language": language,
                "id": { "$ne": exclude_id },
            })
            .sort(doc! { "date": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(articles)
    }

    async fn month_facets(
        &self,
        category_key: &str,
        subcategory_id: &str,
        language: &str,
    ) -> AppResult<Vec<(String, i64)>> {
        let pipeline = vec![
            doc! { "$match": {
                "category_key": category_key,
                "subcategory_id": subcategory_id,
                "language": language,
            }},
            doc! { "$group": {
                "_id": { "$ifNull": ["$month", "unknown"] },
                "count": { "$sum": 1 },
            }},
            doc! { "$sort": { "_id": -1 } },
        ];

        let mut cursor = self.articles.aggregate(pipeline).await?;
        let mut facets = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            let key = doc.get_str("_id").unwrap_or("unknown").to_string();
            facets.push((key, doc_count(&doc, "count")));
        }
        Ok(facets)
    }

    async fn count_by_subcategory(
        &self,
        subcategory_ids: &[String],
    ) -> AppResult<Vec<(String, i64)>> {
        if subcategory_ids.is_empty() {
            return Ok(Vec::new());
        }

        let pipeline = vec![
            doc! { "$match": { "subcategory_id": { "$in": subcategory_ids } } },
            doc! { "$group": { "_id": "$subcategory_id", "count": { "$sum": 1 } } },
        ];

        let mut cursor = self.articles.aggregate(pipeline).await?;
        let mut counts = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            let key = doc.get_str("_id").unwrap_or_default().to_string();
            counts.push((key, doc_count(&doc, "count")));
        }
        Ok(counts)
    }

    async fn create(&self, article: Article, detail: ArticleDetail) -> AppResult<Article> {
        self.articles.insert_one(&article).await?;
        self.details.insert_one(&detail).await?;
        Ok(article)
    }

    async fn update(&self, article: Article) -> AppResult<Article> {
        let result = self
            .articles
            .replace_one(doc! { "id": &article.id }, &article)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Article with id '{}' not found",
                article.id
            )));
        }

        Ok(article)
    }

    async fn get_detail(&self, article_id: &str) -> AppResult<Option<ArticleDetail>> {
        let detail = self
            .details
            .find_one(doc! { "article_id": article_id })
            .await?;
        Ok(detail)
    }

    async fn upsert_detail(&self, detail: ArticleDetail) -> AppResult<()> {
        use mongodb::options::ReplaceOptions;

        let options = ReplaceOptions::builder().upsert(true).build();
        self.details
            .replace_one(doc! { "article_id": &detail.article_id }, &detail)
            .with_options(options)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.articles.delete_one(doc! { "id": id }).await?;
        // The detail record goes regardless of whether the article existed
        self.details.delete_one(doc! { "article_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Article with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::PreviousPaper,
    repositories::doc_count,
};

#[async_trait]
pub trait PaperRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<PreviousPaper>>;
    async fn list(
        &self,
        category_key: &str,
        subcategory_id: &str,
        month: Option<&str>,
    ) -> AppResult<Vec<PreviousPaper>>;
    async fn recent_for_subcategory(
        &self,
        category_key: &str,
        subcategory_id: &str,
        limit: i64,
    ) -> AppResult<Vec<PreviousPaper>>;
    async fn recent(&self, limit: i64) -> AppResult<Vec<PreviousPaper>>;

    /// (month, count) pairs across the whole collection, newest month first.
    async fn month_archives(&self) -> AppResult<Vec<(Option<String>, i64)>>;

    async fn create(&self, paper: PreviousPaper) -> AppResult<PreviousPaper>;
    async fn update(&self, paper: PreviousPaper) -> AppResult<PreviousPaper>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    async fn increment_download(&self, id: &str) -> AppResult<()>;
}

pub struct MongoPaperRepository {
    collection: Collection<PreviousPaper>,
}

impl MongoPaperRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("previous_papers");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for previous_papers collection");

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
            .keys(doc! { "category_key": 1, "subcategory_id": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("section_created".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(section_index).await?;

        Ok(())
    }
}

#[async_trait]
impl PaperRepository for MongoPaperRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<PreviousPaper>> {
        let paper = self.collection.find_one(doc! { "id": id }).await?;
        Ok(paper)
    }

    async fn list(
        &self,
        category_key: &str,
        subcategory_id: &str,
        month: Option<&str>,
    ) -> AppResult<Vec<PreviousPaper>> {
        let mut filter = doc! {
            "category_key": category_key,
            "subcategory_id": subcategory_id,
        };
        if let Some(month) = month {
            filter.insert("month", month);
        }

        let papers = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(papers)
    }

    async fn recent_for_subcategory(
        &self,
        category_key: &str,
        subcategory_id: &str,
        limit: i64,
    ) -> AppResult<Vec<PreviousPaper>> {
        let papers = self
            .collection
            .find(doc! {
                "category_key": category_key,
                "subcategory_id": subcategory_id,
            })
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(papers)
    }

    async fn recent(&self, limit: i64) -> AppResult<Vec<PreviousPaper>> {
        let papers = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(papers)
    }

    async fn month_archives(&self) -> AppResult<Vec<(Option<String>, i64)>> {
        let pipeline = vec![
            doc! { "$group": { "_id": "$month", "count": { "$sum": 1 } } },
            doc! { "$sort": { "_id": -1 } },
        ];

        let mut cursor = self.collection.aggregate(pipeline).await?;
        let mut archives = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            let month = doc.get_str("_id").ok().map(|s| s.to_string());
            archives.push((month, doc_count(&doc, "count")));
        }
        Ok(archives)
    }

    async fn create(&self, paper: PreviousPaper) -> AppResult<PreviousPaper> {
        self.collection.insert_one(&paper).await?;
        Ok(paper)
    }

    async fn update(&self, paper: PreviousPaper) -> AppResult<PreviousPaper> {
        let result = self
            .collection
            .replace_one(doc! { "id": &paper.id }, &paper)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Paper with id '{}' not found",
                paper.id
            )));
        }

        Ok(paper)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Paper with id '{}' not found", id)));
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

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::{AppError, AppResult}, models::domain::Quiz};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn list_by_subcategory(
        &self,
        category_key: &str,
        subcategory_id: &str,
        month: Option<&str>,
    ) -> AppResult<Vec<Quiz>>;
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn update(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizzes");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

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

        self.collection.create_index(id_index).await?;
        self.collection.create_index(section_index).await?;

        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn list_by_subcategory(
        &self,
        category_key: &str,
        subcategory_id: &str,
        month: Option<&str>,
    ) -> AppResult<Vec<Quiz>> {
        let mut filter = doc! {
            "category_key": category_key,
            "subcategory_id": subcategory_id,
        };
        if let Some(month) = month {
            filter.insert("month", month);
        }

        let quizzes = self
            .collection
            .find(filter)
            .sort(doc! { "date": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let result = self
            .collection
            .replace_one(doc! { "id": &quiz.id }, &quiz)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                quiz.id
            )));
        }

        Ok(quiz)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }

        Ok(())
    }
}

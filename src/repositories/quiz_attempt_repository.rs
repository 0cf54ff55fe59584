use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::QuizAttempt};

/// Append-only store of scored submissions. Rank queries use strict
/// comparisons, so the attempt being ranked never counts against itself.
#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    async fn insert(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt>;

    /// Attempts on this quiz with a strictly higher score.
    async fn count_better_score(&self, quiz_id: &str, score: i64) -> AppResult<i64>;

    /// Attempts on this quiz with exactly this score and a strictly lower time.
    async fn count_same_score_faster(
        &self,
        quiz_id: &str,
        score: i64,
        time_taken_seconds: i64,
    ) -> AppResult<i64>;

    /// All attempts on this quiz.
    async fn count_for_quiz(&self, quiz_id: &str) -> AppResult<i64>;
}

pub struct MongoQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_results");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_results collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // Covers both rank count queries
        let rank_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "score": -1, "time_taken_seconds": 1 })
            .options(IndexOptions::builder().name("quiz_rank".to_string()).build())
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().name("user_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(rank_index).await?;
        self.collection.create_index(user_index).await?;

        Ok(())
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn insert(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn count_better_score(&self, quiz_id: &str, score: i64) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! {
                "quiz_id": quiz_id,
                "score": { "$gt": score },
            })
            .await?;
        Ok(count as i64)
    }

    async fn count_same_score_faster(
        &self,
        quiz_id: &str,
        score: i64,
        time_taken_seconds: i64,
    ) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! {
                "quiz_id": quiz_id,
                "score": score,
                "time_taken_seconds": { "$lt": time_taken_seconds },
            })
            .await?;
        Ok(count as i64)
    }

    async fn count_for_quiz(&self, quiz_id: &str) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "quiz_id": quiz_id })
            .await?;
        Ok(count as i64)
    }
}

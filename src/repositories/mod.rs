pub mod article_repository;
pub mod ebook_repository;
pub mod media_repository;
pub mod page_repository;
pub mod paper_repository;
pub mod quiz_attempt_repository;
pub mod quiz_repository;
pub mod refresh_token_repository;
pub mod subscription_repository;
pub mod taxonomy_repository;
pub mod user_repository;

pub use article_repository::{ArticleFilter, ArticleRepository, ArticleSearch, MongoArticleRepository};
pub use ebook_repository::{EbookRepository, MongoEbookRepository};
pub use media_repository::{MediaRepository, MongoMediaRepository};
pub use page_repository::{MongoPageRepository, PageRepository};
pub use paper_repository::{MongoPaperRepository, PaperRepository};
pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use refresh_token_repository::{MongoRefreshTokenRepository, RefreshTokenRepository};
pub use subscription_repository::{MongoSubscriptionRepository, SubscriptionRepository};
pub use taxonomy_repository::{MongoTaxonomyRepository, TaxonomyRepository};
pub use user_repository::{MongoUserRepository, UserRepository};

use mongodb::bson::{Bson, Document};

/// Aggregation counts come back as Int32 or Int64 depending on the server.
pub(crate) fn doc_count(doc: &Document, key: &str) -> i64 {
    match doc.get(key) {
        Some(Bson::Int32(n)) => *n as i64,
        Some(Bson::Int64(n)) => *n,
        Some(Bson::Double(n)) => *n as i64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_doc_count_handles_int_widths() {
        assert_eq!(doc_count(&doc! { "count": 3_i32 }, "count"), 3);
        assert_eq!(doc_count(&doc! { "count": 7_i64 }, "count"), 7);
        assert_eq!(doc_count(&doc! {}, "count"), 0);
    }
}

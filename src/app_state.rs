use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoArticleRepository, MongoEbookRepository, MongoMediaRepository, MongoPageRepository,
        MongoPaperRepository, MongoQuizAttemptRepository, MongoQuizRepository,
        MongoRefreshTokenRepository, MongoSubscriptionRepository, MongoTaxonomyRepository,
        MongoUserRepository,
    },
    services::{
        admin_service::AdminService, auth_service::AuthService, content_service::ContentService,
        ebook_service::EbookService, email::Mailer, page_service::PageService,
        paper_service::PaperService, quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth_service: Arc<AuthService>,
    pub quiz_service: Arc<QuizService>,
    pub content_service: Arc<ContentService>,
    pub ebook_service: Arc<EbookService>,
    pub paper_service: Arc<PaperService>,
    pub page_service: Arc<PageService>,
    pub admin_service: Arc<AdminService>,
    pub jwt_service: JwtService,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let jwt_service = JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
            config.refresh_expiration_hours,
        );

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;
        let refresh_token_repository = Arc::new(MongoRefreshTokenRepository::new(&db));
        refresh_token_repository.ensure_indexes().await?;

        let mailer = Arc::new(Mailer::new(config.resend_api_key.clone(), &config.mail_from));
        let auth_service = Arc::new(AuthService::new(
            user_repository,
            refresh_token_repository,
            Arc::new(jwt_service.clone()),
            mailer,
            &config.frontend_url,
        ));

        // Each content section keeps its own category tree
        let quiz_taxonomy = Arc::new(MongoTaxonomyRepository::new(
            &db,
            "quiz_categories",
            "quiz_subcategories",
        ));
        quiz_taxonomy.ensure_indexes().await?;
        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;
        let attempt_repository = Arc::new(MongoQuizAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;
        let quiz_service = Arc::new(QuizService::new(
            quiz_repository,
            attempt_repository,
            quiz_taxonomy,
        ));

        let article_taxonomy = Arc::new(MongoTaxonomyRepository::new(
            &db,
            "categories",
            "subcategories",
        ));
        article_taxonomy.ensure_indexes().await?;
        let article_repository = Arc::new(MongoArticleRepository::new(&db));
        article_repository.ensure_indexes().await?;
        let content_service = Arc::new(ContentService::new(article_repository, article_taxonomy));

        let ebook_taxonomy = Arc::new(MongoTaxonomyRepository::new(
            &db,
            "ebook_categories",
            "ebook_subcategories",
        ));
        ebook_taxonomy.ensure_indexes().await?;
        let ebook_repository = Arc::new(MongoEbookRepository::new(&db));
        ebook_repository.ensure_indexes().await?;
        let ebook_service = Arc::new(EbookService::new(ebook_repository, ebook_taxonomy));

        let paper_taxonomy = Arc::new(MongoTaxonomyRepository::new(
            &db,
            "paper_categories",
            "paper_subcategories",
        ));
        paper_taxonomy.ensure_indexes().await?;
        let paper_repository = Arc::new(MongoPaperRepository::new(&db));
        paper_repository.ensure_indexes().await?;
        let paper_service = Arc::new(PaperService::new(paper_repository, paper_taxonomy));

        let page_repository = Arc::new(MongoPageRepository::new(&db));
        page_repository.ensure_indexes().await?;
        let page_service = Arc::new(PageService::new(page_repository));

        let media_repository = Arc::new(MongoMediaRepository::new(&db));
        let subscription_repository = Arc::new(MongoSubscriptionRepository::new(&db));
        let admin_service = Arc::new(AdminService::new(media_repository, subscription_repository));

        Ok(Self {
            db,
            auth_service,
            quiz_service,
            content_service,
            ebook_service,
            paper_service,
            page_service,
            admin_service,
            jwt_service,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}

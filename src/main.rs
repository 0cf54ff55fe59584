use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use prepdesk_server::{
    app_state::AppState,
    config::Config,
    handlers::{
        admin_handler, auth_handler, content_handler, ebook_handler, health_check, page_handler,
        paper_handler, quiz_handler,
    },
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .expect("failed to initialise application state");

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = if state.config.cors_origin == "*" {
            Cors::permissive()
        } else {
            Cors::default()
                .allowed_origin(&state.config.cors_origin)
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
        };

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(state.jwt_service.clone()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .service(health_check)
            // Auth
            .service(auth_handler::register)
            .service(auth_handler::login)
            .service(auth_handler::refresh_token)
            .service(auth_handler::change_password)
            .service(auth_handler::forgot_password)
            .service(auth_handler::reset_password)
            // Quiz: fixed-prefix routes before the submit/solution paths
            .service(quiz_handler::get_quiz_categories)
            .service(quiz_handler::get_quiz_subcategories)
            .service(quiz_handler::get_quizzes_list)
            .service(quiz_handler::get_quiz_meta)
            .service(quiz_handler::start_quiz)
            .service(quiz_handler::submit_quiz)
            .service(quiz_handler::get_quiz_solutions)
            .service(quiz_handler::create_quiz_category)
            .service(quiz_handler::update_quiz_category)
            .service(quiz_handler::delete_quiz_category)
            .service(quiz_handler::create_quiz_subcategory)
            .service(quiz_handler::update_quiz_subcategory)
            .service(quiz_handler::delete_quiz_subcategory)
            .service(quiz_handler::create_quiz)
            .service(quiz_handler::update_quiz)
            .service(quiz_handler::delete_quiz)
            // Current affairs: literal paths first, then the catch-alls
            .service(content_handler::get_categories)
            .service(content_handler::get_categories_with_subs)
            .service(content_handler::get_category_landing)
            .service(content_handler::get_articles_list)
            .service(content_handler::get_article_detail)
            .service(content_handler::create_category)
            .service(content_handler::update_category)
            .service(content_handler::delete_category)
            .service(content_handler::create_subcategory)
            .service(content_handler::update_subcategory)
            .service(content_handler::delete_subcategory)
            .service(content_handler::create_content)
            .service(content_handler::update_content)
            .service(content_handler::delete_content)
            // E-books
            .service(ebook_handler::get_ebook_categories)
            .service(ebook_handler::get_ebook_categories_with_subs)
            .service(ebook_handler::get_ebook_subcategories)
            .service(ebook_handler::get_ebooks_list)
            .service(ebook_handler::get_ebook_detail)
            .service(ebook_handler::track_ebook_download)
            .service(ebook_handler::create_ebook_category)
            .service(ebook_handler::update_ebook_category)
            .service(ebook_handler::delete_ebook_category)
            .service(ebook_handler::create_ebook_subcategory)
            .service(ebook_handler::update_ebook_subcategory)
            .service(ebook_handler::delete_ebook_subcategory)
            .service(ebook_handler::create_ebook)
            .service(ebook_handler::update_ebook)
            .service(ebook_handler::delete_ebook)
            // Previous papers
            .service(paper_handler::get_paper_categories)
            .service(paper_handler::get_paper_subcategories)
            .service(paper_handler::get_recent_papers)
            .service(paper_handler::get_paper_archives)
            .service(paper_handler::get_papers_list)
            .service(paper_handler::track_paper_download)
            .service(paper_handler::create_paper_category)
            .service(paper_handler::update_paper_category)
            .service(paper_handler::delete_paper_category)
            .service(paper_handler::create_paper_subcategory)
            .service(paper_handler::update_paper_subcategory)
            .service(paper_handler::delete_paper_subcategory)
            .service(paper_handler::create_paper)
            .service(paper_handler::update_paper)
            .service(paper_handler::delete_paper)
            // Pages & admin bookkeeping
            .service(page_handler::get_page)
            .service(page_handler::upsert_page)
            .service(admin_handler::create_media)
            .service(admin_handler::list_media)
            .service(admin_handler::delete_media)
            .service(admin_handler::list_subscriptions)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

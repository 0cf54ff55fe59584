pub mod admin_handler;
pub mod auth_handler;
pub mod content_handler;
pub mod ebook_handler;
pub mod page_handler;
pub mod paper_handler;
pub mod quiz_handler;

use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError};

#[get("/api/health")]
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    state.db.health_check().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true })))
}

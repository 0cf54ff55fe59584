use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::{
            CreateCategoryRequest, CreatePaperRequest, CreateSubcategoryRequest, MonthQuery,
            UpdateCategoryRequest, UpdatePaperRequest,
        },
        response::MessageResponse,
    },
};

/* ----- Public ----- */

#[get("/api/papers/categories")]
pub async fn get_paper_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = state.paper_service.get_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/api/papers/categories/{category_key}/subcategories")]
pub async fn get_paper_subcategories(
    state: web::Data<AppState>,
    category_key: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let subcategories = state.paper_service.get_subcategories(&category_key).await?;
    Ok(HttpResponse::Ok().json(subcategories))
}

#[get("/api/papers/recent")]
pub async fn get_recent_papers(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let recent = state.paper_service.recent().await?;
    Ok(HttpResponse::Ok().json(recent))
}

#[get("/api/papers/archives")]
pub async fn get_paper_archives(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let archives = state.paper_service.archives().await?;
    Ok(HttpResponse::Ok().json(archives))
}

#[get("/api/papers/list/{category_key}/{sub_id}")]
pub async fn get_papers_list(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse, AppError> {
    let (category_key, sub_id) = path.into_inner();
    let response = state
        .paper_service
        .list(&category_key, &sub_id, query.month.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Tracking failures still answer 200 so a flaky counter never blocks the
/// actual download.
#[post("/api/papers/download/{paper_id}")]
pub async fn track_paper_download(
    state: web::Data<AppState>,
    paper_id: web::Path<String>,
) -> HttpResponse {
    if state.paper_service.track_download(&paper_id).await {
        HttpResponse::Ok().json(MessageResponse::new("Count updated"))
    } else {
        HttpResponse::Ok().json(MessageResponse::new("Count not recorded"))
    }
}

/* ----- Admin ----- */

#[post("/api/admin/papers/category")]
pub async fn create_paper_category(
    state: web::Data<AppState>,
    request: web::Json<CreateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let category = state.paper_service.create_category(request).await?;
    Ok(HttpResponse::Created().json(category))
}

#[put("/api/admin/papers/category/{id}")]
pub async fn update_paper_category(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let category = state.paper_service.update_category(&id, request).await?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/api/admin/papers/category/{id}")]
pub async fn delete_paper_category(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.paper_service.delete_category(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/api/admin/papers/{category_key}/subcategory")]
pub async fn create_paper_subcategory(
    state: web::Data<AppState>,
    category_key: web::Path<String>,
    request: web::Json<CreateSubcategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let subcategory = state
        .paper_service
        .create_subcategory(&category_key, request)
        .await?;
    Ok(HttpResponse::Created().json(subcategory))
}

#[put("/api/admin/papers/subcategory/{id}")]
pub async fn update_paper_subcategory(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let subcategory = state.paper_service.update_subcategory(&id, request).await?;
    Ok(HttpResponse::Ok().json(subcategory))
}

#[delete("/api/admin/papers/subcategory/{id}")]
pub async fn delete_paper_subcategory(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.paper_service.delete_subcategory(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/api/admin/papers/{category_key}/{sub_id}/create")]
pub async fn create_paper(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    request: web::Json<CreatePaperRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let (category_key, sub_id) = path.into_inner();
    let request = request.into_inner();
    request.validate()?;

    let paper = state
        .paper_service
        .create_paper(&category_key, &sub_id, request)
        .await?;
    Ok(HttpResponse::Created().json(paper))
}

#[put("/api/admin/papers/{id}")]
pub async fn update_paper(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdatePaperRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let paper = state.paper_service.update_paper(&id, request).await?;
    Ok(HttpResponse::Ok().json(paper))
}

#[delete("/api/admin/papers/{id}")]
pub async fn delete_paper(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.paper_service.delete_paper(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

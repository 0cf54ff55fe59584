use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::{
            CreateCategoryRequest, CreateEbookRequest, CreateSubcategoryRequest, EbookListQuery,
            UpdateCategoryRequest, UpdateEbookRequest,
        },
        response::MessageResponse,
    },
};

/* ----- Public ----- */

#[get("/api/ebooks/categories")]
pub async fn get_ebook_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = state.ebook_service.get_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/api/ebooks/categories-with-subs")]
pub async fn get_ebook_categories_with_subs(
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let directory = state.ebook_service.get_categories_with_subs().await?;
    Ok(HttpResponse::Ok().json(directory))
}

#[get("/api/ebooks/categories/{category_key}/subcategories")]
pub async fn get_ebook_subcategories(
    state: web::Data<AppState>,
    category_key: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let subcategories = state.ebook_service.get_subcategories(&category_key).await?;
    Ok(HttpResponse::Ok().json(subcategories))
}

#[get("/api/ebooks/list/{category_key}/{sub_id}")]
pub async fn get_ebooks_list(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<EbookListQuery>,
) -> Result<HttpResponse, AppError> {
    let (category_key, sub_id) = path.into_inner();
    let books = state
        .ebook_service
        .list(&category_key, &sub_id, &query)
        .await?;
    Ok(HttpResponse::Ok().json(books))
}

#[get("/api/ebooks/detail/{ebook_id}")]
pub async fn get_ebook_detail(
    state: web::Data<AppState>,
    ebook_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let book = state.ebook_service.detail(&ebook_id).await?;
    Ok(HttpResponse::Ok().json(book))
}

#[post("/api/ebooks/download/{ebook_id}")]
pub async fn track_ebook_download(
    state: web::Data<AppState>,
    ebook_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.ebook_service.track_download(&ebook_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Count updated")))
}

/* ----- Admin ----- */

#[post("/api/admin/ebooks/category")]
pub async fn create_ebook_category(
    state: web::Data<AppState>,
    request: web::Json<CreateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let category = state.ebook_service.create_category(request).await?;
    Ok(HttpResponse::Created().json(category))
}

#[put("/api/admin/ebooks/category/{id}")]
pub async fn update_ebook_category(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let category = state.ebook_service.update_category(&id, request).await?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/api/admin/ebooks/category/{id}")]
pub async fn delete_ebook_category(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.ebook_service.delete_category(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/api/admin/ebooks/{category_key}/subcategory")]
pub async fn create_ebook_subcategory(
    state: web::Data<AppState>,
    category_key: web::Path<String>,
    request: web::Json<CreateSubcategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let subcategory = state
        .ebook_service
        .create_subcategory(&category_key, request)
        .await?;
    Ok(HttpResponse::Created().json(subcategory))
}

#[put("/api/admin/ebooks/subcategory/{id}")]
pub async fn update_ebook_subcategory(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let subcategory = state.ebook_service.update_subcategory(&id, request).await?;
    Ok(HttpResponse::Ok().json(subcategory))
}

#[delete("/api/admin/ebooks/subcategory/{id}")]
pub async fn delete_ebook_subcategory(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.ebook_service.delete_subcategory(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/api/admin/ebooks/{category_key}/{sub_id}/create")]
pub async fn create_ebook(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    request: web::Json<CreateEbookRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let (category_key, sub_id) = path.into_inner();
    let request = request.into_inner();
    request.validate()?;

    let ebook = state
        .ebook_service
        .create_ebook(&category_key, &sub_id, request)
        .await?;
    Ok(HttpResponse::Created().json(ebook))
}

#[put("/api/admin/ebooks/{id}")]
pub async fn update_ebook(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateEbookRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let ebook = state.ebook_service.update_ebook(&id, request).await?;
    Ok(HttpResponse::Ok().json(ebook))
}

#[delete("/api/admin/ebooks/{id}")]
pub async fn delete_ebook(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.ebook_service.delete_ebook(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

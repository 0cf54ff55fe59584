use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser, MaybeAuthenticated},
    errors::AppError,
    models::dto::request::{
        CreateCategoryRequest, CreateQuizRequest, CreateSubcategoryRequest, MonthQuery,
        SubmitQuizRequest, UpdateCategoryRequest, UpdateQuizRequest,
    },
};

/* ----- Public catalogue ----- */

#[get("/api/quiz/categories")]
pub async fn get_quiz_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = state.quiz_service.list_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/api/quiz/categories/{category_key}/subcategories")]
pub async fn get_quiz_subcategories(
    state: web::Data<AppState>,
    category_key: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let subcategories = state.quiz_service.list_subcategories(&category_key).await?;
    Ok(HttpResponse::Ok().json(subcategories))
}

#[get("/api/quiz/list/{category_key}/{sub_id}")]
pub async fn get_quizzes_list(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<MonthQuery>,
) -> Result<HttpResponse, AppError> {
    let (category_key, sub_id) = path.into_inner();
    let quizzes = state
        .quiz_service
        .list_quizzes(&category_key, &sub_id, query.month.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/api/quiz/meta/{quiz_id}")]
pub async fn get_quiz_meta(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let meta = state.quiz_service.quiz_meta(&quiz_id).await?;
    Ok(HttpResponse::Ok().json(meta))
}

/* ----- Taking a quiz ----- */

#[get("/api/quiz/start/{quiz_id}")]
pub async fn start_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.start_quiz(&quiz_id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

/// Optional authentication: guests get a score but no persisted attempt and
/// no rank.
#[post("/api/quiz/submit/{quiz_id}")]
pub async fn submit_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    request: web::Json<SubmitQuizRequest>,
    identity: MaybeAuthenticated,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let result = state
        .quiz_service
        .submit_quiz(&quiz_id, request, identity.0)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Full answer key; deliberately requires a signed-in caller, unlike start.
#[get("/api/quiz/solutions/{quiz_id}")]
pub async fn get_quiz_solutions(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.quiz_solutions(&quiz_id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

/* ----- Admin ----- */

#[post("/api/admin/quiz/category")]
pub async fn create_quiz_category(
    state: web::Data<AppState>,
    request: web::Json<CreateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let category = state.quiz_service.create_category(request).await?;
    Ok(HttpResponse::Created().json(category))
}

#[put("/api/admin/quiz/category/{id}")]
pub async fn update_quiz_category(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let category = state.quiz_service.update_category(&id, request).await?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/api/admin/quiz/category/{id}")]
pub async fn delete_quiz_category(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.quiz_service.delete_category(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/api/admin/quiz/{category_key}/subcategory")]
pub async fn create_quiz_subcategory(
    state: web::Data<AppState>,
    category_key: web::Path<String>,
    request: web::Json<CreateSubcategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let subcategory = state
        .quiz_service
        .create_subcategory(&category_key, request)
        .await?;
    Ok(HttpResponse::Created().json(subcategory))
}

#[put("/api/admin/quiz/subcategory/{id}")]
pub async fn update_quiz_subcategory(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateCategoryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let subcategory = state.quiz_service.update_subcategory(&id, request).await?;
    Ok(HttpResponse::Ok().json(subcategory))
}

#[delete("/api/admin/quiz/subcategory/{id}")]
pub async fn delete_quiz_subcategory(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.quiz_service.delete_subcategory(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/api/admin/quiz/{category_key}/{sub_id}/create")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    request: web::Json<CreateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let (category_key, sub_id) = path.into_inner();
    let request = request.into_inner();
    request.validate()?;

    let quiz = state
        .quiz_service
        .create_quiz(&category_key, &sub_id, request)
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[put("/api/admin/quiz/{id}")]
pub async fn update_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let request = request.into_inner();
    request.validate()?;

    let quiz = state.quiz_service.update_quiz(&id, request).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[delete("/api/admin/quiz/{id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.quiz_service.delete_quiz(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

//! HTTP handlers for the Categories API

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CategoryResult;
use crate::models::{Category, CategoryUpdate, ListQuery, NewCategory};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        get_category,
        update_category,
        delete_category,
    ),
    components(
        schemas(Category, NewCategory, CategoryUpdate),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Categories", description = "Category endpoints")
    )
)]
pub struct ApiDoc;

pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .with_state(Arc::new(service))
}

/// List categories
#[utoipa::path(
    get,
    path = "",
    tag = "Categories",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of categories", body = Vec<Category>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Query(query): Query<ListQuery>,
) -> CategoryResult<Json<Vec<Category>>> {
    Ok(Json(
        service.list_categories(query.limit, query.offset).await?,
    ))
}

/// Create a category
#[utoipa::path(
    post,
    path = "",
    tag = "Categories",
    request_body = NewCategory,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedJson(input): ValidatedJson<NewCategory>,
) -> CategoryResult<impl IntoResponse> {
    let category = service.add_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category ID (ObjectId hex)")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<String>,
) -> CategoryResult<Json<Category>> {
    Ok(Json(service.get_category(&id).await?))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category ID (ObjectId hex)")),
    request_body = CategoryUpdate,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<CategoryUpdate>,
) -> CategoryResult<Json<Category>> {
    Ok(Json(service.update_category(&id, input).await?))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category ID (ObjectId hex)")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<String>,
) -> CategoryResult<impl IntoResponse> {
    service.delete_category(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

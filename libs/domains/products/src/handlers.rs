//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CategoryCount, CreateProduct, DeleteResponse, Product, ProductPage, ProductQuery, SearchQuery,
    UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        search_products,
        category_stats,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product, CreateProduct, UpdateProduct, ProductPage, CategoryCount, DeleteResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalogue endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router. Static segments (`/search`, `/stats`) take
/// precedence over `/{id}`.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route("/stats", get(category_stats))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products with optional category filter and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(query): ValidatedQuery<ProductQuery>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.list_products(query).await?;
    Ok(Json(page))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Case-insensitive search on product name
#[utoipa::path(
    get,
    path = "/search",
    tag = "Products",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<SearchQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.search_products(query.name.as_deref()).await?;
    Ok(Json(products))
}

/// Product count per category
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Products",
    responses(
        (status = 200, description = "Counts per category", body = Vec<CategoryCount>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn category_stats<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<CategoryCount>>> {
    let stats = service.category_stats().await?;
    Ok(Json(stats))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(&id).await?;
    Ok(Json(product))
}

/// Update the given fields of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(&id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = DeleteResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<DeleteResponse>> {
    service.delete_product(&id).await?;
    Ok(Json(DeleteResponse::deleted()))
}

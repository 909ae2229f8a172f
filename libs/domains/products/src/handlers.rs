use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
};
use axum_helpers::{
    JwtAuth, UuidPath, ValidatedJson,
    auth::require_admin,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use domain_users::{UserRepository, UserSummary};

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, Product, ProductDetail, ProductFilter, ProductPage, ProductView, ReviewView,
    UpdateProduct,
};
use crate::repository::{ProductRepository, ReviewRepository};
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        related_products,
    ),
    components(
        schemas(
            Product,
            ProductView,
            ProductPage,
            ProductDetail,
            ReviewView,
            CreateProduct,
            UpdateProduct,
            ProductFilter,
            UserSummary,
            DeleteConfirmation
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Confirmation body returned by a successful delete
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteConfirmation {
    pub message: String,
}

/// Create the products router with all HTTP endpoints.
///
/// The update route sits behind the admin JWT guard; everything else is
/// public.
pub fn router<P, R, U>(service: ProductService<P, R, U>, jwt: JwtAuth) -> Router
where
    P: ProductRepository + 'static,
    R: ReviewRepository + 'static,
    U: UserRepository + 'static,
{
    let shared_service = Arc::new(service);

    let admin_routes = Router::new()
        .route("/update-product/{id}", patch(update_product))
        .route_layer(middleware::from_fn_with_state(jwt, require_admin))
        .with_state(Arc::clone(&shared_service));

    Router::new()
        .route("/", get(list_products))
        .route("/create-product", post(create_product))
        .route("/related/{id}", get(related_products))
        .route("/{id}", get(get_product).delete(delete_product))
        .with_state(shared_service)
        .merge(admin_routes)
}

/// List products with filters and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "One page of products with totals", body = ProductPage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<P: ProductRepository, R: ReviewRepository, U: UserRepository>(
    State(service): State<Arc<ProductService<P, R, U>>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.list_products(filter).await?;
    Ok(Json(page))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/create-product",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<P: ProductRepository, R: ReviewRepository, U: UserRepository>(
    State(service): State<Arc<ProductService<P, R, U>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product with its reviews
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product with reviews", body = ProductDetail),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<P: ProductRepository, R: ReviewRepository, U: UserRepository>(
    State(service): State<Arc<ProductService<P, R, U>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductDetail>> {
    let detail = service.get_product(id).await?;
    Ok(Json(detail))
}

/// Update a product (admin only)
#[utoipa::path(
    patch,
    path = "/update-product/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<P: ProductRepository, R: ReviewRepository, U: UserRepository>(
    State(service): State<Arc<ProductService<P, R, U>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product, cascading its reviews
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = DeleteConfirmation),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<P: ProductRepository, R: ReviewRepository, U: UserRepository>(
    State(service): State<Arc<ProductService<P, R, U>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<DeleteConfirmation>> {
    service.delete_product(id).await?;
    Ok(Json(DeleteConfirmation {
        message: "Product deleted successfully".to_string(),
    }))
}

/// Find related products
#[utoipa::path(
    get,
    path = "/related/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Related products, newest first", body = Vec<Product>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn related_products<P: ProductRepository, R: ReviewRepository, U: UserRepository>(
    State(service): State<Arc<ProductService<P, R, U>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Vec<Product>>> {
    let related = service.related_products(id).await?;
    Ok(Json(related))
}

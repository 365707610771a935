use crate::handlers::common::{
    created_response, success_response, validate_input, JsonBody, MessageResponse,
};
use crate::{
    entities::product::Model as ProductModel,
    errors::ApiError,
    services::{CreateProductInput, ProductFilter, UpdateProductInput},
    AppState,
};
use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Creates the router for product endpoints
pub fn products_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/low-stock", get(list_low_stock_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Request body for creating a product.
///
/// Fields are optional at the type level so a missing field is reported
/// as a validation error listing every absent field.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(max = 255))]
    #[schema(example = "Wireless Headphones")]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    #[schema(example = "Electronics")]
    pub category: Option<String>,
    #[schema(value_type = Option<f64>, example = 4999.99)]
    pub price: Option<Decimal>,
    #[schema(example = 25)]
    pub stock_quantity: Option<i32>,
    #[validate(length(max = 50))]
    #[schema(example = "ELE001")]
    pub sku: Option<String>,
    pub description: Option<String>,
}

impl CreateProductRequest {
    /// Checks required fields and produces the service input.
    /// Blank strings count as missing.
    pub fn into_input(self) -> Result<CreateProductInput, ApiError> {
        fn required(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        let name = required(self.name);
        let category = required(self.category);
        let sku = required(self.sku);

        let missing: Vec<&str> = [
            ("name", name.is_none()),
            ("category", category.is_none()),
            ("price", self.price.is_none()),
            ("sku", sku.is_none()),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(field, _)| *field)
        .collect();

        match (name, category, self.price, sku) {
            (Some(name), Some(category), Some(price), Some(sku)) => Ok(CreateProductInput {
                name,
                category,
                price,
                stock_quantity: self.stock_quantity.unwrap_or(0),
                sku,
                description: self.description.unwrap_or_default(),
            }),
            _ => Err(ApiError::ValidationError(format!(
                "Missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

/// Request body for a partial update. Absent or null fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    pub sku: Option<String>,
    pub description: Option<String>,
}

impl From<UpdateProductRequest> for UpdateProductInput {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            category: req.category,
            price: req.price,
            stock_quantity: req.stock_quantity,
            sku: req.sku,
            description: req.description,
        }
    }
}

/// Product record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Wireless Headphones")]
    pub name: String,
    #[schema(example = "Electronics")]
    pub category: String,
    #[schema(example = 4999.99)]
    pub price: f64,
    #[schema(example = 25)]
    pub stock_quantity: i32,
    #[schema(example = "ELE001")]
    pub sku: String,
    pub description: Option<String>,
    /// ISO 8601, or null
    pub created_at: Option<String>,
    /// ISO 8601, or null
    pub updated_at: Option<String>,
}

impl From<ProductModel> for ProductResponse {
    fn from(model: ProductModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            price: model.price.to_f64().unwrap_or_default(),
            stock_quantity: model.stock_quantity,
            sku: model.sku,
            description: model.description,
            created_at: model.created_at.map(|ts| ts.to_rfc3339()),
            updated_at: model.updated_at.map(|ts| ts.to_rfc3339()),
        }
    }
}

fn to_responses(models: Vec<ProductModel>) -> Vec<ProductResponse> {
    models.into_iter().map(ProductResponse::from).collect()
}

fn product_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// List products with optional filters
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductFilter),
    responses(
        (status = 200, description = "Matching products sorted by name", body = [ProductResponse])
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state.product_service.list_products(&filter).await?;
    Ok(success_response(to_responses(products)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, description = "Invalid product id", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = product_id(path)?;
    let product = state.product_service.get_product(id).await?;
    Ok(success_response(ProductResponse::from(product)))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid payload or duplicate SKU", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;
    let input = payload.into_input()?;

    let product = state.product_service.create_product(input).await?;
    Ok(created_response(ProductResponse::from(product)))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid payload or duplicate SKU", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    JsonBody(payload): JsonBody<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = product_id(path)?;
    validate_input(&payload)?;

    let product = state
        .product_service
        .update_product(id, payload.into())
        .await?;
    Ok(success_response(ProductResponse::from(product)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = product_id(path)?;
    state.product_service.delete_product(id).await?;
    Ok(success_response(MessageResponse::new(
        "Product deleted successfully",
    )))
}

/// Products with fewer than 10 units, out-of-stock included
#[utoipa::path(
    get,
    path = "/api/products/low-stock",
    responses(
        (status = 200, description = "Low-stock products", body = [ProductResponse])
    ),
    tag = "Products"
)]
pub async fn list_low_stock_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state.product_service.low_stock_products().await?;
    Ok(success_response(to_responses(products)))
}

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory Management API",
        version = "1.0.0",
        description = r#"
# Inventory Management API

CRUD over a single product table, with filtering and dashboard statistics.

## Filtering

`GET /api/products` accepts optional, combinable query parameters:
- `category`: case-insensitive substring of the category
- `search`: case-insensitive substring of name, SKU or description
- `status`: `low-stock` (1 to 9 units), `out-of-stock` (0) or `in-stock` (10 or more)

Unknown `status` values are ignored. Results are sorted by name.

## Low stock

`/api/stats` and `/api/products/low-stock` count anything under 10 units as low
stock, out-of-stock products included. The `status=low-stock` filter does not
include them.

## Errors

```json
{
  "error": "Not Found",
  "message": "Not found: Product 42 not found",
  "request_id": "6f1c...",
  "timestamp": "2025-07-18T10:30:00+00:00"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:5001", description = "Local development")
    ),
    tags(
        (name = "Products", description = "Product CRUD and listing"),
        (name = "Dashboard", description = "Statistics and activity feed")
    ),
    paths(
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::create_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::products::list_low_stock_products,
        crate::handlers::stats::get_stats,
        crate::handlers::stats::get_activity,
        crate::handlers::stats::api_home,
    ),
    components(
        schemas(
            crate::handlers::products::ProductResponse,
            crate::handlers::products::CreateProductRequest,
            crate::handlers::products::UpdateProductRequest,
            crate::handlers::common::MessageResponse,
            crate::handlers::stats::HomeResponse,
            crate::services::inventory_stats::InventoryStats,
            crate::services::inventory_stats::ActivityEntry,
            crate::services::inventory_stats::RecentActivity,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

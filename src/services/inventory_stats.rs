use crate::{
    db::SearchBuilder,
    entities::product::{self, Column, Entity as Product},
    errors::ServiceError,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::{Condition, DatabaseConnection, DbBackend, EntityTrait};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};

/// Quantities strictly below this count as low stock for the stats counter
/// and the low-stock listing. Zero is included there.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Number of products rendered into `recent_activity`
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

const LOW_STOCK_ICON: &str = "⚠️";
const NEW_PRODUCT_ICON: &str = "📦";

/// Stats/low-stock definition: anything under the threshold, zero included.
pub fn is_low_stock(quantity: i32) -> bool {
    quantity < LOW_STOCK_THRESHOLD
}

/// Stock-status bucket used by the listing filter.
///
/// `LowStock` here is 1..=9 and excludes empty shelves, unlike
/// [`is_low_stock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    /// Parses the `status` query value. Unknown values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "out-of-stock" => Some(Self::OutOfStock),
            "low-stock" => Some(Self::LowStock),
            "in-stock" => Some(Self::InStock),
            _ => None,
        }
    }

    /// Whether `quantity` falls in this bucket. Negative quantities match none.
    pub fn contains(&self, quantity: i32) -> bool {
        match self {
            Self::OutOfStock => quantity == 0,
            Self::LowStock => (1..LOW_STOCK_THRESHOLD).contains(&quantity),
            Self::InStock => quantity >= LOW_STOCK_THRESHOLD,
        }
    }

    fn push_condition(&self, builder: SearchBuilder) -> SearchBuilder {
        match self {
            Self::OutOfStock => builder.add_eq(Column::StockQuantity, 0),
            Self::LowStock => {
                builder.add_between(Column::StockQuantity, 1, LOW_STOCK_THRESHOLD - 1)
            }
            Self::InStock => builder.add_gte(Column::StockQuantity, LOW_STOCK_THRESHOLD),
        }
    }
}

/// Optional listing filters, combined with AND
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Case-insensitive substring of the category
    pub category: Option<String>,
    /// Case-insensitive substring of name, SKU or description
    pub search: Option<String>,
    /// `low-stock`, `out-of-stock` or `in-stock`; anything else is ignored
    pub status: Option<String>,
}

impl ProductFilter {
    pub fn stock_status(&self) -> Option<StockStatus> {
        self.status.as_deref().and_then(StockStatus::parse)
    }

    /// Builds the SQL predicate for `backend`. With nothing supplied the
    /// condition matches every row.
    ///
    /// Only PostgreSQL gets the text filters (as `ILIKE`). SQLite's case
    /// folding covers ASCII alone, so there the text filters are left to
    /// [`ProductFilter::matches`] once the rows are loaded.
    pub fn to_condition(&self, backend: DbBackend) -> Condition {
        let mut builder = SearchBuilder::new();

        if backend == DbBackend::Postgres {
            if let Some(category) = self.category.as_deref() {
                builder = builder.add_ilike(Column::Category, category);
            }

            if let Some(search) = self.search.as_deref() {
                let across = SearchBuilder::new()
                    .add_ilike(Column::Name, search)
                    .add_ilike(Column::Sku, search)
                    .add_ilike(Column::Description, search);
                builder = builder.add_any(across);
            }
        }

        if let Some(status) = self.stock_status() {
            builder = status.push_condition(builder);
        }

        builder.all().unwrap_or_else(Condition::all)
    }

    /// Whether rows loaded from `backend` still need [`ProductFilter::matches`]
    pub fn needs_text_match(&self, backend: DbBackend) -> bool {
        backend != DbBackend::Postgres
            && (text_filter(&self.category).is_some() || text_filter(&self.search).is_some())
    }

    /// Evaluates every filter against a loaded row, with Unicode case folding
    pub fn matches(&self, product: &product::Model) -> bool {
        fn contains_ci(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        if let Some(category) = text_filter(&self.category) {
            if !contains_ci(&product.category, category) {
                return false;
            }
        }

        if let Some(search) = text_filter(&self.search) {
            let description = product.description.as_deref().unwrap_or_default();
            if !(contains_ci(&product.name, search)
                || contains_ci(&product.sku, search)
                || contains_ci(description, search))
            {
                return false;
            }
        }

        self.stock_status()
            .map_or(true, |status| status.contains(product.stock_quantity))
    }
}

/// Text filters apply unless absent or empty
fn text_filter(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// One entry of the derived recent-activity view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActivityEntry {
    #[schema(example = "📦")]
    pub icon: String,
    #[schema(example = "New product added")]
    pub title: String,
    #[schema(example = "Wireless Headphones - SKU: ELE001")]
    pub description: String,
    /// `HH:MM` of creation, or `N/A`
    #[schema(example = "10:30")]
    pub time: String,
}

impl ActivityEntry {
    pub fn from_product(product: &product::Model) -> Self {
        let (icon, title) = if is_low_stock(product.stock_quantity) {
            (
                LOW_STOCK_ICON,
                format!(
                    "Low stock alert - Only {} units left",
                    product.stock_quantity
                ),
            )
        } else {
            (NEW_PRODUCT_ICON, "New product added".to_string())
        };

        Self {
            icon: icon.to_string(),
            title,
            description: format!("{} - SKU: {}", product.name, product.sku),
            time: product
                .created_at
                .map(|ts| ts.format("%H:%M").to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

/// Dashboard statistics over the whole product table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryStats {
    pub total_products: u64,
    /// Quantity below 10, out-of-stock included
    pub low_stock_items: u64,
    pub out_of_stock: u64,
    pub total_categories: u64,
    /// Sum of price × quantity; 0 for an empty table
    pub total_value: f64,
    pub categories: BTreeMap<String, u64>,
    pub recent_activity: Vec<ActivityEntry>,
}

/// Aggregates a full product snapshot into [`InventoryStats`].
///
/// Fails with `InternalError` when the stock value leaves `Decimal` range,
/// which only rows written around the API price bound can cause.
pub fn compute_stats(products: &[product::Model]) -> Result<InventoryStats, ServiceError> {
    let mut categories: BTreeMap<String, u64> = BTreeMap::new();
    let mut low_stock_items = 0u64;
    let mut out_of_stock = 0u64;
    let mut total_value = Decimal::ZERO;

    for product in products {
        *categories.entry(product.category.clone()).or_default() += 1;
        if is_low_stock(product.stock_quantity) {
            low_stock_items += 1;
        }
        if product.stock_quantity == 0 {
            out_of_stock += 1;
        }
        total_value = product
            .price
            .checked_mul(Decimal::from(product.stock_quantity))
            .and_then(|line_value| total_value.checked_add(line_value))
            .ok_or_else(|| {
                ServiceError::InternalError(format!(
                    "inventory value overflows at product {}",
                    product.id
                ))
            })?;
    }

    // Newest first; missing timestamps sort last, ties by id descending.
    let mut newest: Vec<&product::Model> = products.iter().collect();
    newest.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });

    Ok(InventoryStats {
        total_products: products.len() as u64,
        low_stock_items,
        out_of_stock,
        total_categories: categories.len() as u64,
        total_value: total_value.to_f64().unwrap_or_default(),
        categories,
        recent_activity: newest
            .into_iter()
            .take(RECENT_ACTIVITY_LIMIT)
            .map(ActivityEntry::from_product)
            .collect(),
    })
}

/// Entry of the static activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecentActivity {
    #[serde(rename = "type")]
    #[schema(example = "product_added")]
    pub activity_type: String,
    pub title: String,
    pub description: String,
    #[schema(example = "2025-07-18T10:30:00Z")]
    pub created_at: String,
}

impl RecentActivity {
    fn new(activity_type: &str, title: &str, description: &str, created_at: &str) -> Self {
        Self {
            activity_type: activity_type.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            created_at: created_at.to_string(),
        }
    }
}

/// Illustrative feed for the dashboard. Not backed by the product table.
pub fn mock_activity_feed() -> Vec<RecentActivity> {
    vec![
        RecentActivity::new(
            "product_added",
            "New product added",
            "Wireless Headphones - SKU: ELE001",
            "2025-07-18T10:30:00Z",
        ),
        RecentActivity::new(
            "low_stock",
            "Low stock alert",
            "Gaming Mouse - Only 3 units left",
            "2025-07-18T08:15:00Z",
        ),
        RecentActivity::new(
            "report_generated",
            "Monthly report generated",
            "July inventory summary completed",
            "2025-07-17T14:20:00Z",
        ),
    ]
}

/// Read-only aggregation over the product table
#[derive(Clone)]
pub struct InventoryStatsService {
    db: Arc<DatabaseConnection>,
}

impl InventoryStatsService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Computes dashboard statistics from a single snapshot query
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<InventoryStats, ServiceError> {
        let products = Product::find().all(&*self.db).await?;
        let stats = compute_stats(&products)?;
        debug!(
            total_products = stats.total_products,
            low_stock_items = stats.low_stock_items,
            "Computed inventory stats"
        );
        Ok(stats)
    }

    pub fn activity_feed(&self) -> Vec<RecentActivity> {
        mock_activity_feed()
    }
}

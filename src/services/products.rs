use crate::{
    entities::product::{self, Column, Entity as Product, Model as ProductModel},
    errors::ServiceError,
    services::inventory_stats::{ProductFilter, LOW_STOCK_THRESHOLD},
};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Decimal places kept for stored prices
const PRICE_SCALE: u32 = 2;

/// Exclusive bound on a price's magnitude, as DECIMAL(10,2) allows
const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Product store operations
#[derive(Clone)]
pub struct ProductService {
    db: Arc<DatabaseConnection>,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new product
    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<ProductModel, ServiceError> {
        let price = normalize_price(input.price)?;
        self.ensure_unique_sku(&input.sku, None).await?;

        let product = product::ActiveModel {
            name: Set(input.name),
            category: Set(input.category),
            price: Set(price),
            stock_quantity: Set(input.stock_quantity),
            sku: Set(input.sku),
            description: Set(Some(input.description)),
            ..Default::default()
        };

        // A concurrent insert of the same SKU still fails here with a
        // ConstraintViolation via the unique index.
        let product = product.insert(&*self.db).await?;

        info!("Created product: {}", product.id);
        Ok(product)
    }

    /// Fetch a single product
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: i32) -> Result<ProductModel, ServiceError> {
        Product::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))
    }

    /// Merge the supplied fields over an existing product
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        product_id: i32,
        input: UpdateProductInput,
    ) -> Result<ProductModel, ServiceError> {
        let price = input.price.map(normalize_price).transpose()?;
        let product = self.get_product(product_id).await?;

        if let Some(ref sku) = input.sku {
            self.ensure_unique_sku(sku, Some(product_id)).await?;
        }

        let mut active: product::ActiveModel = product.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(price) = price {
            active.price = Set(price);
        }
        if let Some(stock_quantity) = input.stock_quantity {
            active.stock_quantity = Set(stock_quantity);
        }
        if let Some(sku) = input.sku {
            active.sku = Set(sku);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }

        // updated_at is refreshed by before_save even when nothing else changed
        let product = active.update(&*self.db).await?;
        info!("Updated product: {}", product_id);
        Ok(product)
    }

    /// Remove a product permanently
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: i32) -> Result<(), ServiceError> {
        let product = self.get_product(product_id).await?;
        product.delete(&*self.db).await?;

        info!("Deleted product: {}", product_id);
        Ok(())
    }

    /// List products matching every supplied filter, sorted by name.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductModel>, ServiceError> {
        let backend = self.db.get_database_backend();
        let mut products = Product::find()
            .filter(filter.to_condition(backend))
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&*self.db)
            .await?;

        if filter.needs_text_match(backend) {
            products.retain(|product| filter.matches(product));
        }

        Ok(sort_by_name(products))
    }

    /// Products under the low-stock threshold, out-of-stock included
    #[instrument(skip(self))]
    pub async fn low_stock_products(&self) -> Result<Vec<ProductModel>, ServiceError> {
        let products = Product::find()
            .filter(Column::StockQuantity.lt(LOW_STOCK_THRESHOLD))
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&*self.db)
            .await?;

        Ok(sort_by_name(products))
    }

    async fn ensure_unique_sku(
        &self,
        sku: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = Product::find().filter(Column::Sku.eq(sku));
        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }

        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::ConstraintViolation(format!(
                "SKU {} already exists",
                sku
            )));
        }

        Ok(())
    }
}

/// Rounds to cents (half away from zero) and enforces the column's range
fn normalize_price(price: Decimal) -> Result<Decimal, ServiceError> {
    let rounded =
        price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.abs() >= PRICE_LIMIT {
        return Err(ServiceError::ValidationError(format!(
            "price must be between -{PRICE_LIMIT} and {PRICE_LIMIT} exclusive"
        )));
    }
    Ok(rounded)
}

/// Byte-wise name order, independent of the database collation.
/// The sort is stable so equal names keep the id order from the query.
fn sort_by_name(mut products: Vec<ProductModel>) -> Vec<ProductModel> {
    products.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    products
}

/// Input for creating a product
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateProductInput {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub sku: String,
    pub description: String,
}

/// Input for updating a product. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub sku: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(id: i32, name: &str) -> ProductModel {
        ProductModel {
            id,
            name: name.to_string(),
            category: "Supplies".into(),
            price: Decimal::ONE,
            stock_quantity: 1,
            sku: format!("S{id}"),
            description: None,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    #[test]
    fn prices_round_half_away_from_zero() {
        assert_eq!(normalize_price(Decimal::new(125, 3)).unwrap(), Decimal::new(13, 2));
        assert_eq!(normalize_price(Decimal::new(-125, 3)).unwrap(), Decimal::new(-13, 2));
        assert_eq!(normalize_price(Decimal::new(3_14159, 5)).unwrap(), Decimal::new(314, 2));
    }

    #[test]
    fn prices_outside_the_column_range_are_rejected() {
        assert!(normalize_price(Decimal::new(9_999_999_999, 2)).is_ok());
        assert!(matches!(
            normalize_price(Decimal::from(100_000_000)),
            Err(ServiceError::ValidationError(_))
        ));
        assert!(normalize_price(Decimal::from(-100_000_000)).is_err());
        // Rounds up onto the bound
        assert!(normalize_price(Decimal::new(99_999_999_995, 3)).is_err());
    }

    #[test]
    fn names_sort_ordinally() {
        let sorted = sort_by_name(vec![
            model(1, "banana"),
            model(2, "Zebra"),
            model(3, "apple"),
            model(4, "Apple"),
        ]);
        let names: Vec<_> = sorted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Zebra", "apple", "banana"]);
    }

    #[test]
    fn equal_names_keep_query_order() {
        let sorted = sort_by_name(vec![model(1, "Pens"), model(2, "Pens"), model(3, "Ink")]);
        let ids: Vec<_> = sorted.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}

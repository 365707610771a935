pub mod inventory_stats;
pub mod products;

pub use inventory_stats::{InventoryStatsService, ProductFilter, StockStatus};
pub use products::{CreateProductInput, ProductService, UpdateProductInput};

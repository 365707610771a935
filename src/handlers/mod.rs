pub mod common;
pub mod products;
pub mod stats;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

//! HTTP API handlers for quarry-web

pub mod health;
pub mod search;

pub use health::health_check;
pub use search::search_page;

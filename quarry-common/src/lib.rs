//! # Quarry Common Library
//!
//! Shared code for the Quarry search front end:
//! - Error types
//! - Configuration loading and first-run bootstrap
//! - Document id rewriting

pub mod config;
pub mod error;
pub mod rewrite;

pub use config::SearchConfig;
pub use error::{Error, Result};
pub use rewrite::{IdRewrite, RegexRewrite};

//! Newsroom Common Library
//!
//! Shared code for the Newsroom services including:
//! - Article, journalist and category models
//! - The article query layer and its storage backends
//! - Error types and handling
//! - Configuration management
//! - Metrics helpers

pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::{ArticleStore, DbPool, MemoryArticleStore, SqlArticleStore};
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base path of every article route
pub const ARTICLES_BASE_PATH: &str = "/api/articles";

/// Separator the storage engine places between aggregated category names
pub const CATEGORY_SEPARATOR: &str = ",";

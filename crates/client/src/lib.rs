//! Newsroom API client
//!
//! Typed wrappers over the `/api/articles` routes. Every call returns the
//! parsed JSON resource, or `ClientError::Api` carrying the status and the
//! server's `{message}` body.

mod client;
mod error;
mod merge;

pub use client::ArticleClient;
pub use error::{ClientError, Result};
pub use merge::merge_unique_by_id;

pub use newsroom_common::db::models::{
    Article, ArticleInput, ArticleWithJournalist, Category, JournalistArticle, SavedArticle,
};

//! Flattening of aggregated category columns
//!
//! The storage engine returns an article's category names as one
//! delimiter-joined string. This module is the only place that string is
//! parsed, so the query text (and the engine behind it) can change without
//! callers ever seeing anything but a clean list.

use sea_orm::FromQueryResult;

use super::models::Article;
use crate::CATEGORY_SEPARATOR;

/// One grouped row of the article aggregate query
#[derive(Debug, Clone, FromQueryResult)]
pub struct ArticleRow {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub journalist_id: Option<i64>,
    pub journalist: Option<String>,
    pub categories: Option<String>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            id: row.id,
            title: row.title,
            content: row.content,
            journalist_id: row.journalist_id,
            journalist: row.journalist,
            categories: split_categories(row.categories.as_deref()),
        }
    }
}

/// Split an aggregated category string into names.
///
/// NULL and empty aggregates give an empty list. Empty segments are dropped
/// and repeated names keep their first position.
pub fn split_categories(aggregate: Option<&str>) -> Vec<String> {
    let Some(aggregate) = aggregate else {
        return Vec::new();
    };

    let mut names: Vec<String> = Vec::new();
    for name in aggregate.split(CATEGORY_SEPARATOR) {
        if name.is_empty() || names.iter().any(|seen| seen == name) {
            continue;
        }
        names.push(name.to_string());
    }
    names
}

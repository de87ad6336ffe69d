//! The article query layer contract

use async_trait::async_trait;

use super::models::{
    Article, ArticleInput, ArticleWithJournalist, Category, JournalistArticle, SavedArticle,
};
use crate::errors::Result;

/// Resource operations on articles, independent of the storage engine.
///
/// Lookups that match nothing return `Ok(None)`; `Err` is reserved for
/// storage failures. Each call is a single statement with no surrounding
/// transaction.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Every article with journalist name and category names
    async fn list_articles(&self) -> Result<Vec<Article>>;

    /// One article in the same joined shape as `list_articles`
    async fn get_article(&self, id: i64) -> Result<Option<Article>>;

    /// All category rows
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Articles with a join row for `category_id`, still listing all of
    /// each article's categories
    async fn list_articles_by_category(&self, category_id: i64) -> Result<Vec<Article>>;

    /// Insert one article row and echo the input with the generated id
    async fn create_article(&self, input: ArticleInput) -> Result<SavedArticle>;

    /// Overwrite all four writable columns; `None` when no row has `id`
    async fn update_article(&self, id: i64, input: ArticleInput) -> Result<Option<SavedArticle>>;

    /// Remove the row if present and return `id` either way
    async fn delete_article(&self, id: i64) -> Result<i64>;

    /// Article joined with journalist email and bio
    async fn get_article_with_journalist(&self, id: i64) -> Result<Option<ArticleWithJournalist>>;

    /// All articles by one journalist
    async fn list_articles_by_journalist(&self, journalist_id: i64) -> Result<Vec<JournalistArticle>>;

    /// Check the backend is reachable
    async fn ping(&self) -> Result<()>;
}

//! In-process article store
//!
//! Mirrors the SQL store's join semantics over plain maps. Used by tests and
//! by local runs with `database.url = "memory://"`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::aggregate::ArticleRow;
use super::models::*;
use super::store::ArticleStore;
use crate::errors::Result;
use crate::metrics;
use crate::CATEGORY_SEPARATOR;

#[derive(Default)]
struct Tables {
    articles: BTreeMap<i64, ArticleModel>,
    journalists: BTreeMap<i64, Journalist>,
    categories: BTreeMap<i64, Category>,
    /// (article_id, category_id) in insertion order
    article_categories: Vec<(i64, i64)>,
    next_article_id: i64,
    next_journalist_id: i64,
    next_category_id: i64,
}

impl Tables {
    fn category_aggregate(&self, article_id: i64) -> Option<String> {
        let names: Vec<&str> = self
            .article_categories
            .iter()
            .filter(|(a, _)| *a == article_id)
            .filter_map(|(_, c)| self.categories.get(c))
            .map(|c| c.name.as_str())
            .collect();

        if names.is_empty() {
            None
        } else {
            Some(names.join(CATEGORY_SEPARATOR))
        }
    }

    fn grouped(&self, article: &ArticleModel) -> Article {
        let journalist = article
            .journalist_id
            .and_then(|id| self.journalists.get(&id))
            .map(|j| j.name.clone());

        Article::from(ArticleRow {
            id: article.id,
            title: article.title.clone(),
            content: article.content.clone(),
            journalist_id: article.journalist_id,
            journalist,
            categories: self.category_aggregate(article.id),
        })
    }

    fn with_journalist(&self, article: &ArticleModel) -> Option<(ArticleModel, Journalist)> {
        let journalist = self.journalists.get(&article.journalist_id?)?;
        Some((article.clone(), journalist.clone()))
    }
}

/// Article store held entirely in memory
#[derive(Default)]
pub struct MemoryArticleStore {
    tables: RwLock<Tables>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a journalist and return its id
    pub async fn add_journalist(&self, name: &str, email: Option<&str>, bio: Option<&str>) -> i64 {
        let mut tables = self.tables.write().await;
        tables.next_journalist_id += 1;
        let id = tables.next_journalist_id;
        tables.journalists.insert(
            id,
            Journalist {
                id,
                name: name.to_string(),
                email: email.map(str::to_string),
                bio: bio.map(str::to_string),
            },
        );
        id
    }

    /// Seed a category and return its id
    pub async fn add_category(&self, name: &str) -> i64 {
        let mut tables = self.tables.write().await;
        tables.next_category_id += 1;
        let id = tables.next_category_id;
        tables.categories.insert(
            id,
            Category {
                id,
                name: name.to_string(),
            },
        );
        id
    }

    /// Add a join row; the pair is ignored if already present
    pub async fn link_category(&self, article_id: i64, category_id: i64) {
        let mut tables = self.tables.write().await;
        if !tables.article_categories.contains(&(article_id, category_id)) {
            tables.article_categories.push((article_id, category_id));
        }
    }

    /// Raw stored row, bypassing the joined views
    pub async fn stored_article(&self, id: i64) -> Option<ArticleModel> {
        self.tables.read().await.articles.get(&id).cloned()
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        let tables = self.tables.read().await;
        Ok(tables.articles.values().map(|a| tables.grouped(a)).collect())
    }

    async fn get_article(&self, id: i64) -> Result<Option<Article>> {
        let tables = self.tables.read().await;
        Ok(tables.articles.get(&id).map(|a| tables.grouped(a)))
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn list_articles_by_category(&self, category_id: i64) -> Result<Vec<Article>> {
        let tables = self.tables.read().await;
        Ok(tables
            .articles
            .values()
            .filter(|a| tables.article_categories.contains(&(a.id, category_id)))
            .map(|a| tables.grouped(a))
            .collect())
    }

    async fn create_article(&self, input: ArticleInput) -> Result<SavedArticle> {
        let mut tables = self.tables.write().await;
        tables.next_article_id += 1;
        let id = tables.next_article_id;
        tables.articles.insert(
            id,
            ArticleModel {
                id,
                title: input.title.clone(),
                content: input.content.clone(),
                journalist_id: input.journalist_id,
                category_id: input.category_id,
            },
        );
        metrics::record_article_write("create");

        Ok(SavedArticle { id, fields: input })
    }

    async fn update_article(&self, id: i64, input: ArticleInput) -> Result<Option<SavedArticle>> {
        let mut tables = self.tables.write().await;
        let Some(article) = tables.articles.get_mut(&id) else {
            return Ok(None);
        };

        article.title = input.title.clone();
        article.content = input.content.clone();
        article.journalist_id = input.journalist_id;
        article.category_id = input.category_id;
        metrics::record_article_write("update");

        Ok(Some(SavedArticle { id, fields: input }))
    }

    async fn delete_article(&self, id: i64) -> Result<i64> {
        let mut tables = self.tables.write().await;
        // join rows are left in place, as with the SQL store
        tables.articles.remove(&id);
        metrics::record_article_write("delete");

        Ok(id)
    }

    async fn get_article_with_journalist(&self, id: i64) -> Result<Option<ArticleWithJournalist>> {
        let tables = self.tables.read().await;
        Ok(tables
            .articles
            .get(&id)
            .and_then(|a| tables.with_journalist(a))
            .map(|(article, journalist)| ArticleWithJournalist {
                id: article.id,
                title: article.title,
                content: article.content,
                journalist_id: journalist.id,
                journalist_name: journalist.name,
                email: journalist.email,
                bio: journalist.bio,
            }))
    }

    async fn list_articles_by_journalist(&self, journalist_id: i64) -> Result<Vec<JournalistArticle>> {
        let tables = self.tables.read().await;
        Ok(tables
            .articles
            .values()
            .filter(|a| a.journalist_id == Some(journalist_id))
            .filter_map(|a| tables.with_journalist(a))
            .map(|(article, journalist)| JournalistArticle {
                id: article.id,
                title: article.title,
                content: article.content,
                journalist_id: journalist.id,
                journalist_name: journalist.name,
            })
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

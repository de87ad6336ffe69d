//! SQL implementation of the article query layer
//!
//! Grouped reads go through raw statements from `query`, then through the
//! flattening step in `aggregate`. Everything else uses SeaORM entities.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::aggregate::ArticleRow;
use super::models::*;
use super::query::{article_statement, ArticleScope};
use super::store::ArticleStore;
use super::DbPool;
use crate::errors::Result;
use crate::metrics;

/// Article store backed by a relational database
#[derive(Clone)]
pub struct SqlArticleStore {
    pool: DbPool,
}

impl SqlArticleStore {
    /// Create a new store over the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.pool.connection()
    }

    async fn grouped_articles(&self, scope: ArticleScope) -> Result<Vec<Article>> {
        let stmt = article_statement(self.pool.backend(), scope);
        let rows = ArticleRow::find_by_statement(stmt).all(self.conn()).await?;

        debug!(?scope, rows = rows.len(), "Grouped article read");

        Ok(rows.into_iter().map(Article::from).collect())
    }
}

#[async_trait]
impl ArticleStore for SqlArticleStore {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        self.grouped_articles(ArticleScope::All).await
    }

    async fn get_article(&self, id: i64) -> Result<Option<Article>> {
        let mut articles = self.grouped_articles(ArticleScope::ById(id)).await?;
        Ok(articles.pop())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        CategoryEntity::find()
            .order_by_asc(CategoryColumn::Id)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    async fn list_articles_by_category(&self, category_id: i64) -> Result<Vec<Article>> {
        self.grouped_articles(ArticleScope::InCategory(category_id)).await
    }

    async fn create_article(&self, input: ArticleInput) -> Result<SavedArticle> {
        let article = ArticleActiveModel {
            id: NotSet,
            title: Set(input.title.clone()),
            content: Set(input.content.clone()),
            journalist_id: Set(input.journalist_id),
            category_id: Set(input.category_id),
        };

        let result = ArticleEntity::insert(article).exec(self.conn()).await?;
        metrics::record_article_write("create");

        debug!(article_id = result.last_insert_id, "Article created");

        Ok(SavedArticle {
            id: result.last_insert_id,
            fields: input,
        })
    }

    async fn update_article(&self, id: i64, input: ArticleInput) -> Result<Option<SavedArticle>> {
        let result = ArticleEntity::update_many()
            .col_expr(ArticleColumn::Title, Expr::value(input.title.clone()))
            .col_expr(ArticleColumn::Content, Expr::value(input.content.clone()))
            .col_expr(ArticleColumn::JournalistId, Expr::value(input.journalist_id))
            .col_expr(ArticleColumn::CategoryId, Expr::value(input.category_id))
            .filter(ArticleColumn::Id.eq(id))
            .exec(self.conn())
            .await?;

        // rows_affected counts matched rows (sqlx sets CLIENT_FOUND_ROWS on MySQL)
        if result.rows_affected == 0 {
            return Ok(None);
        }

        metrics::record_article_write("update");
        debug!(article_id = id, "Article updated");

        Ok(Some(SavedArticle { id, fields: input }))
    }

    async fn delete_article(&self, id: i64) -> Result<i64> {
        let result = ArticleEntity::delete_by_id(id).exec(self.conn()).await?;
        metrics::record_article_write("delete");

        debug!(article_id = id, rows = result.rows_affected, "Article deleted");

        Ok(id)
    }

    async fn get_article_with_journalist(&self, id: i64) -> Result<Option<ArticleWithJournalist>> {
        let found = ArticleEntity::find_by_id(id)
            .find_also_related(JournalistEntity)
            .one(self.conn())
            .await?;

        Ok(match found {
            Some((article, Some(journalist))) => Some(ArticleWithJournalist {
                id: article.id,
                title: article.title,
                content: article.content,
                journalist_id: journalist.id,
                journalist_name: journalist.name,
                email: journalist.email,
                bio: journalist.bio,
            }),
            _ => None,
        })
    }

    async fn list_articles_by_journalist(&self, journalist_id: i64) -> Result<Vec<JournalistArticle>> {
        let rows = ArticleEntity::find()
            .find_also_related(JournalistEntity)
            .filter(JournalistColumn::Id.eq(journalist_id))
            .order_by_asc(ArticleColumn::Id)
            .all(self.conn())
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(article, journalist)| {
                let journalist = journalist?;
                Some(JournalistArticle {
                    id: article.id,
                    title: article.title,
                    content: article.content,
                    journalist_id: journalist.id,
                    journalist_name: journalist.name,
                })
            })
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }
}

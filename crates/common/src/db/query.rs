//! SQL text for the grouped article reads
//!
//! The aggregate function and placeholder syntax differ per engine; the
//! selected columns do not, so every backend yields the same `ArticleRow`.

use sea_orm::{DbBackend, Statement, Value};

/// Which articles the grouped read should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleScope {
    All,
    ById(i64),
    InCategory(i64),
}

fn category_aggregate(backend: DbBackend) -> &'static str {
    match backend {
        DbBackend::Postgres => "STRING_AGG(c.name, ',')",
        DbBackend::MySql | DbBackend::Sqlite => "GROUP_CONCAT(c.name)",
    }
}

fn placeholder(backend: DbBackend) -> &'static str {
    match backend {
        DbBackend::Postgres => "$1",
        DbBackend::MySql | DbBackend::Sqlite => "?",
    }
}

/// Build the grouped article statement for `scope` on `backend`
pub fn article_statement(backend: DbBackend, scope: ArticleScope) -> Statement {
    let param = placeholder(backend);

    let (filter, values): (String, Vec<Value>) = match scope {
        ArticleScope::All => (String::new(), vec![]),
        ArticleScope::ById(id) => (format!("WHERE a.id = {param}"), vec![id.into()]),
        ArticleScope::InCategory(category_id) => (
            format!(
                "WHERE a.id IN (SELECT article_id FROM article_categories WHERE category_id = {param})"
            ),
            vec![category_id.into()],
        ),
    };

    let sql = format!(
        r#"
        SELECT
            a.id, a.title, a.content, a.journalist_id,
            j.name AS journalist,
            {aggregate} AS categories
        FROM articles a
        LEFT JOIN journalists j ON a.journalist_id = j.id
        LEFT JOIN article_categories ac ON a.id = ac.article_id
        LEFT JOIN categories c ON ac.category_id = c.id
        {filter}
        GROUP BY a.id, a.title, a.content, a.journalist_id, j.name
        ORDER BY a.id
        "#,
        aggregate = category_aggregate(backend),
    );

    Statement::from_sql_and_values(backend, sql, values)
}

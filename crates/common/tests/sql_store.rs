//! SQL article store against an in-memory SQLite database

use newsroom_common::config::DatabaseConfig;
use newsroom_common::db::models::*;
use newsroom_common::{ArticleStore, DbPool, SqlArticleStore};
use sea_orm::{ActiveValue::NotSet, ConnectionTrait, DbBackend, EntityTrait, Set};

const SCHEMA: &[&str] = &[
    "CREATE TABLE journalists (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, email TEXT, bio TEXT)",
    "CREATE TABLE categories (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL)",
    "CREATE TABLE articles (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT, content TEXT, journalist_id INTEGER, category_id INTEGER)",
    "CREATE TABLE article_categories (article_id INTEGER NOT NULL, category_id INTEGER NOT NULL, PRIMARY KEY (article_id, category_id))",
];

async fn setup() -> (DbPool, SqlArticleStore) {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        // one connection so every statement sees the same in-memory database
        max_connections: 1,
        min_connections: 1,
    };
    let pool = DbPool::new(&config).await.expect("open sqlite");
    assert_eq!(pool.backend(), DbBackend::Sqlite);

    for ddl in SCHEMA {
        pool.connection().execute_unprepared(ddl).await.expect("create schema");
    }

    let store = SqlArticleStore::new(pool.clone());
    (pool, store)
}

async fn add_journalist(pool: &DbPool, name: &str, email: &str) -> i64 {
    let journalist = JournalistActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        email: Set(Some(email.to_string())),
        bio: Set(Some(format!("{name} writes things"))),
    };
    JournalistEntity::insert(journalist)
        .exec(pool.connection())
        .await
        .expect("insert journalist")
        .last_insert_id
}

async fn add_category(pool: &DbPool, name: &str) -> i64 {
    let category = CategoryActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
    };
    CategoryEntity::insert(category)
        .exec(pool.connection())
        .await
        .expect("insert category")
        .last_insert_id
}

async fn link(pool: &DbPool, article_id: i64, category_id: i64) {
    pool.connection()
        .execute_unprepared(&format!(
            "INSERT INTO article_categories (article_id, category_id) VALUES ({article_id}, {category_id})"
        ))
        .await
        .expect("insert join row");
}

fn input(title: &str, journalist_id: i64, category_id: i64) -> ArticleInput {
    ArticleInput {
        title: Some(title.to_string()),
        content: Some(format!("{title} body")),
        journalist_id: Some(journalist_id),
        category_id: Some(category_id),
    }
}

#[tokio::test]
async fn create_then_read_joined_shape() {
    let (pool, store) = setup().await;
    let ada = add_journalist(&pool, "Ada", "ada@example.com").await;
    let tech = add_category(&pool, "Tech").await;

    let saved = store.create_article(input("A", ada, tech)).await.unwrap();
    assert!(saved.id > 0);
    assert_eq!(saved.fields.title.as_deref(), Some("A"));

    let article = store.get_article(saved.id).await.unwrap().expect("article");
    assert_eq!(article.journalist.as_deref(), Some("Ada"));
    assert_eq!(article.journalist_id, Some(ada));
    // the write path stores category_id on the row, not a join row
    assert!(article.categories.is_empty());

    let stored = ArticleEntity::find_by_id(saved.id)
        .one(pool.connection())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.category_id, Some(tech));
}

#[tokio::test]
async fn categories_are_split_from_the_aggregate() {
    let (pool, store) = setup().await;
    let ada = add_journalist(&pool, "Ada", "ada@example.com").await;
    let tech = add_category(&pool, "Tech").await;
    let sports = add_category(&pool, "Sports").await;

    let both = store.create_article(input("Both", ada, tech)).await.unwrap();
    let none = store.create_article(input("None", ada, tech)).await.unwrap();
    link(&pool, both.id, tech).await;
    link(&pool, both.id, sports).await;

    let articles = store.list_articles().await.unwrap();
    assert_eq!(articles.len(), 2);

    let mut names = articles[0].categories.clone();
    names.sort();
    assert_eq!(names, vec!["Sports", "Tech"]);

    assert_eq!(articles[1].id, none.id);
    assert_eq!(articles[1].categories, Vec::<String>::new());
}

#[tokio::test]
async fn by_category_keeps_all_categories_of_matching_articles() {
    let (pool, store) = setup().await;
    let ada = add_journalist(&pool, "Ada", "ada@example.com").await;
    let tech = add_category(&pool, "Tech").await;
    let sports = add_category(&pool, "Sports").await;

    let both = store.create_article(input("Both", ada, tech)).await.unwrap();
    let tech_only = store.create_article(input("Tech only", ada, tech)).await.unwrap();
    link(&pool, both.id, tech).await;
    link(&pool, both.id, sports).await;
    link(&pool, tech_only.id, tech).await;

    let in_sports = store.list_articles_by_category(sports).await.unwrap();
    assert_eq!(in_sports.len(), 1);
    assert_eq!(in_sports[0].id, both.id);
    assert_eq!(in_sports[0].categories.len(), 2);

    let in_tech = store.list_articles_by_category(tech).await.unwrap();
    assert_eq!(in_tech.len(), 2);

    assert!(store.list_articles_by_category(999).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_article_is_none_not_error() {
    let (_pool, store) = setup().await;
    assert!(store.get_article(404).await.unwrap().is_none());
    assert!(store.get_article_with_journalist(404).await.unwrap().is_none());
}

#[tokio::test]
async fn update_overwrites_without_merging() {
    let (pool, store) = setup().await;
    let ada = add_journalist(&pool, "Ada", "ada@example.com").await;
    let saved = store.create_article(input("A", ada, 1)).await.unwrap();

    let partial = ArticleInput {
        title: Some("Renamed".into()),
        ..Default::default()
    };
    let updated = store.update_article(saved.id, partial).await.unwrap().expect("row matched");
    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.fields.title.as_deref(), Some("Renamed"));

    let stored = ArticleEntity::find_by_id(saved.id)
        .one(pool.connection())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.title.as_deref(), Some("Renamed"));
    assert_eq!(stored.content, None);
    assert_eq!(stored.journalist_id, None);
    assert_eq!(stored.category_id, None);

    assert!(store.update_article(9999, ArticleInput::default()).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_is_silent_for_missing_rows() {
    let (pool, store) = setup().await;
    let ada = add_journalist(&pool, "Ada", "ada@example.com").await;
    let saved = store.create_article(input("A", ada, 1)).await.unwrap();

    assert_eq!(store.delete_article(saved.id).await.unwrap(), saved.id);
    assert!(store.get_article(saved.id).await.unwrap().is_none());
    assert_eq!(store.delete_article(saved.id).await.unwrap(), saved.id);
}

#[tokio::test]
async fn journalist_reads() {
    let (pool, store) = setup().await;
    let ada = add_journalist(&pool, "Ada", "ada@example.com").await;
    let quiet = add_journalist(&pool, "Quiet", "quiet@example.com").await;
    let first = store.create_article(input("First", ada, 1)).await.unwrap();
    store.create_article(input("Second", ada, 1)).await.unwrap();
    let orphan = store.create_article(input("Orphan", 77, 1)).await.unwrap();

    let detail = store.get_article_with_journalist(first.id).await.unwrap().expect("joined");
    assert_eq!(detail.journalist_name, "Ada");
    assert_eq!(detail.email.as_deref(), Some("ada@example.com"));
    assert_eq!(detail.bio.as_deref(), Some("Ada writes things"));

    assert!(store.get_article_with_journalist(orphan.id).await.unwrap().is_none());

    let by_ada = store.list_articles_by_journalist(ada).await.unwrap();
    assert_eq!(by_ada.len(), 2);
    assert!(by_ada.iter().all(|a| a.journalist_name == "Ada" && a.journalist_id == ada));

    assert!(store.list_articles_by_journalist(quiet).await.unwrap().is_empty());
}

#[tokio::test]
async fn categories_listed_verbatim() {
    let (pool, store) = setup().await;
    add_category(&pool, "Tech").await;
    add_category(&pool, "Sports").await;

    let categories = store.list_categories().await.unwrap();
    let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Tech", "Sports"]);

    store.ping().await.unwrap();
}

//! Article handlers
//!
//! Each handler is one query-layer call. Absence becomes `ArticleNotFound`
//! (404); unparsable ids and bodies become `Validation` (400); storage
//! failures surface as 500 through `AppError`'s response mapping.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::instrument;

use crate::AppState;
use newsroom_common::{
    db::models::{
        Article, ArticleInput, ArticleWithJournalist, Category, JournalistArticle, SavedArticle,
    },
    errors::{AppError, Result},
};

type IdPath = std::result::Result<Path<i64>, PathRejection>;
type InputBody = std::result::Result<Json<ArticleInput>, JsonRejection>;

/// GET /api/articles
#[instrument(skip(state))]
pub async fn list_articles(State(state): State<AppState>) -> Result<Json<Vec<Article>>> {
    let articles = state.store.list_articles().await?;
    Ok(Json(articles))
}

/// GET /api/articles/{id}
#[instrument(skip(state))]
pub async fn get_article(State(state): State<AppState>, id: IdPath) -> Result<Json<Article>> {
    let Path(id) = id?;

    state
        .store
        .get_article(id)
        .await?
        .map(Json)
        .ok_or(AppError::ArticleNotFound { id })
}

/// GET /api/articles/categories
#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.store.list_categories().await?;
    Ok(Json(categories))
}

/// GET /api/articles/by-category/{category_id}
#[instrument(skip(state))]
pub async fn list_articles_by_category(
    State(state): State<AppState>,
    category_id: IdPath,
) -> Result<Json<Vec<Article>>> {
    let Path(category_id) = category_id?;
    let articles = state.store.list_articles_by_category(category_id).await?;
    Ok(Json(articles))
}

/// POST /api/articles
#[instrument(skip(state))]
pub async fn create_article(
    State(state): State<AppState>,
    body: InputBody,
) -> Result<(StatusCode, Json<SavedArticle>)> {
    let Json(input) = body?;
    let saved = state.store.create_article(input).await?;

    tracing::info!(article_id = saved.id, "Article created");

    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /api/articles/{id}
///
/// Replaces all four writable fields; fields missing from the body are
/// stored as NULL.
#[instrument(skip(state))]
pub async fn update_article(
    State(state): State<AppState>,
    id: IdPath,
    body: InputBody,
) -> Result<Json<SavedArticle>> {
    let Path(id) = id?;
    let Json(input) = body?;

    let saved = state
        .store
        .update_article(id, input)
        .await?
        .ok_or(AppError::ArticleNotFound { id })?;

    tracing::info!(article_id = id, "Article updated");

    Ok(Json(saved))
}

/// DELETE /api/articles/{id}
///
/// 204 whether or not the row existed.
#[instrument(skip(state))]
pub async fn delete_article(State(state): State<AppState>, id: IdPath) -> Result<StatusCode> {
    let Path(id) = id?;
    state.store.delete_article(id).await?;

    tracing::info!(article_id = id, "Article deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/articles/with-journalist/{id}
#[instrument(skip(state))]
pub async fn get_article_with_journalist(
    State(state): State<AppState>,
    id: IdPath,
) -> Result<Json<ArticleWithJournalist>> {
    let Path(id) = id?;

    state
        .store
        .get_article_with_journalist(id)
        .await?
        .map(Json)
        .ok_or(AppError::ArticleNotFound { id })
}

/// GET /api/articles/by-journalist/{id}
#[instrument(skip(state))]
pub async fn list_articles_by_journalist(
    State(state): State<AppState>,
    id: IdPath,
) -> Result<Json<Vec<JournalistArticle>>> {
    let Path(journalist_id) = id?;
    let articles = state.store.list_articles_by_journalist(journalist_id).await?;
    Ok(Json(articles))
}

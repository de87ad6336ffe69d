//! HTTP wrapper over the article routes

use futures::future::try_join_all;
use newsroom_common::{errors::ErrorResponse, ARTICLES_BASE_PATH};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::merge::merge_unique_by_id;
use crate::{
    Article, ArticleInput, ArticleWithJournalist, Category, JournalistArticle, SavedArticle,
};

/// Client for one gateway instance
#[derive(Clone, Debug)]
pub struct ArticleClient {
    client: reqwest::Client,
    base_url: String,
}

impl ArticleClient {
    /// `base_url` is the server origin, e.g. `http://localhost:5000`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing `reqwest::Client` (shared pool, custom timeouts)
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, ARTICLES_BASE_PATH, path)
    }

    pub async fn list_articles(&self) -> Result<Vec<Article>> {
        self.get("").await
    }

    pub async fn get_article(&self, id: i64) -> Result<Article> {
        self.get(&format!("/{id}")).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.get("/categories").await
    }

    pub async fn list_articles_by_category(&self, category_id: i64) -> Result<Vec<Article>> {
        self.get(&format!("/by-category/{category_id}")).await
    }

    pub async fn create_article(&self, input: &ArticleInput) -> Result<SavedArticle> {
        let response = self.client.post(self.url("")).json(input).send().await?;
        parse(response).await
    }

    pub async fn update_article(&self, id: i64, input: &ArticleInput) -> Result<SavedArticle> {
        let response = self
            .client
            .put(self.url(&format!("/{id}")))
            .json(input)
            .send()
            .await?;
        parse(response).await
    }

    pub async fn delete_article(&self, id: i64) -> Result<()> {
        let response = self.client.delete(self.url(&format!("/{id}"))).send().await?;
        check(response).await?;
        Ok(())
    }

    pub async fn get_article_with_journalist(&self, id: i64) -> Result<ArticleWithJournalist> {
        self.get(&format!("/with-journalist/{id}")).await
    }

    pub async fn list_articles_by_journalist(&self, journalist_id: i64) -> Result<Vec<JournalistArticle>> {
        self.get(&format!("/by-journalist/{journalist_id}")).await
    }

    /// Articles in any of the given categories.
    ///
    /// One request per category, issued concurrently, merged by article id in
    /// first-seen order. An empty selection means no filter: the full list.
    pub async fn articles_in_categories(&self, category_ids: &[i64]) -> Result<Vec<Article>> {
        if category_ids.is_empty() {
            return self.list_articles().await;
        }

        let batches = try_join_all(
            category_ids
                .iter()
                .map(|&id| self.list_articles_by_category(id)),
        )
        .await?;

        let merged = merge_unique_by_id(batches);
        debug!(categories = category_ids.len(), articles = merged.len(), "Merged category results");

        Ok(merged)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.get(self.url(path)).send().await?;
        parse(response).await
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check(response).await?;
    Ok(response.json().await?)
}

/// Turn any non-2xx response into `ClientError::Api`
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.message,
        Err(_) => fallback_message(status),
    };

    warn!(status = status.as_u16(), %message, "Article API request failed");

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

fn fallback_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_path() {
        let client = ArticleClient::new("http://localhost:5000/");
        assert_eq!(client.url(""), "http://localhost:5000/api/articles");
        assert_eq!(client.url("/7"), "http://localhost:5000/api/articles/7");
    }

    #[test]
    fn test_fallback_message() {
        assert_eq!(fallback_message(StatusCode::BAD_GATEWAY), "Bad Gateway");
    }
}

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::services::metrics::record_article;
use crate::services::{Article, ArticleError};
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateArticleRequest {
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleData {
    pub title: String,
    pub filename: String,
    pub content: String,
    /// Length of `content` in UTF-16 code units.
    pub word_count: usize,
}

#[derive(Debug, Serialize)]
pub struct GenerateArticleResponse {
    pub status: &'static str,
    pub data: ArticleData,
}

impl From<Article> for GenerateArticleResponse {
    fn from(article: Article) -> Self {
        let word_count = article.word_count();
        Self {
            status: "success",
            data: ArticleData {
                title: article.title,
                filename: article.filename,
                content: article.content,
                word_count,
            },
        }
    }
}

/// Run the article pipeline for `{ "topic": .. }`.
#[tracing::instrument(skip(state, body))]
pub async fn generate_article(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateArticleResponse>, ArticleError> {
    let request: GenerateArticleRequest = serde_json::from_slice(&body)
        .map_err(|_| ArticleError::BadRequest("Invalid JSON body".to_string()))?;
    let topic = request.topic.unwrap_or_default();

    match state.articles.generate(&topic).await {
        Ok(article) => {
            record_article("success");
            tracing::info!(
                title = %article.title,
                filename = %article.filename,
                chars = article.word_count(),
                "Article generated"
            );
            Ok(Json(article.into()))
        }
        Err(e) => {
            record_article("error");
            tracing::error!(error = %e, "Article generation failed");
            Err(e)
        }
    }
}

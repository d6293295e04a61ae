//! Multi-chapter article generation.
//!
//! A fixed four-stage pipeline over one [`TextProvider`]:
//! title, outline, one call per chapter, then Markdown assembly. Stages run
//! strictly in order and the first failure aborts the whole article.

pub mod assembly;
pub mod outline;
pub mod prompts;

use crate::config::ArticleSettings;
use crate::services::metrics;
use crate::services::providers::{ProviderError, TextProvider};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub use assembly::{article_filename, assemble_markdown};
pub use outline::{parse_outline, MAX_CHAPTERS};
pub use prompts::ChapterRole;

/// Pipeline stage, used to give provider failures context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Title,
    Outline,
    Chapter { number: usize, total: usize },
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Title => write!(f, "title"),
            Stage::Outline => write!(f, "outline"),
            Stage::Chapter { number, total } => write!(f, "chapter {}/{}", number, total),
        }
    }
}

#[derive(Error, Debug)]
pub enum ArticleError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Failed to generate outline")]
    EmptyOutline,

    #[error("{stage} generation failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: ProviderError,
    },
}

impl ArticleError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ArticleError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ArticleError::EmptyOutline | ArticleError::Stage { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ArticleError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(json!({
                "status": "error",
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}

/// A finished article. Lives only as long as the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub filename: String,
    pub content: String,
}

impl Article {
    /// Length of the Markdown in UTF-16 code units, the unit browser
    /// clients measure string length in.
    pub fn word_count(&self) -> usize {
        self.content.encode_utf16().count()
    }
}

/// Drives the article pipeline against a text provider.
pub struct ArticleGenerator {
    provider: Arc<dyn TextProvider>,
    settings: ArticleSettings,
}

impl ArticleGenerator {
    pub fn new(provider: Arc<dyn TextProvider>, settings: ArticleSettings) -> Self {
        Self { provider, settings }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// Generate a complete article for `topic`, dated today (UTC).
    pub async fn generate(&self, topic: &str) -> Result<Article, ArticleError> {
        self.generate_on(topic, Utc::now().date_naive()).await
    }

    /// Generate a complete article for `topic`, stamped with `date`.
    pub async fn generate_on(&self, topic: &str, date: NaiveDate) -> Result<Article, ArticleError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ArticleError::BadRequest(
                "Missing or empty topic field".to_string(),
            ));
        }

        tracing::info!("Extracting title");
        let title = self.extract_title(topic).await?;

        tracing::info!(title = %title, "Generating outline");
        let chapters = self.generate_outline(topic).await?;

        tracing::info!(chapters = chapters.len(), "Generating chapters");
        let bodies = self.generate_chapters(topic, &chapters).await?;

        let content = assemble_markdown(&title, date, &chapters, &bodies);
        let filename = article_filename(&title, date);

        Ok(Article {
            title,
            filename,
            content,
        })
    }

    async fn extract_title(&self, topic: &str) -> Result<String, ArticleError> {
        let raw = self
            .complete(Stage::Title, &prompts::title_prompt(topic))
            .await?;
        Ok(prompts::clean_title(&raw))
    }

    async fn generate_outline(&self, topic: &str) -> Result<Vec<String>, ArticleError> {
        let raw = self
            .complete(Stage::Outline, &prompts::outline_prompt(topic))
            .await?;

        let chapters = parse_outline(&raw);
        if chapters.is_empty() {
            tracing::warn!(raw_len = raw.len(), "Outline contained no usable chapter lines");
            return Err(ArticleError::EmptyOutline);
        }

        Ok(chapters)
    }

    /// One call per chapter, in outline order, with a fixed pause between
    /// consecutive calls. Chapters see only the topic and their position.
    async fn generate_chapters(
        &self,
        topic: &str,
        chapters: &[String],
    ) -> Result<Vec<String>, ArticleError> {
        let total = chapters.len();
        let mut bodies = Vec::with_capacity(total);

        for (index, chapter) in chapters.iter().enumerate() {
            tracing::info!(
                chapter = index + 1,
                total,
                title = %chapter,
                "Generating chapter"
            );

            let stage = Stage::Chapter {
                number: index + 1,
                total,
            };
            let prompt = prompts::chapter_prompt(topic, chapter, index, total);
            let body = self.complete(stage, &prompt).await?;
            bodies.push(body.trim().to_string());

            metrics::record_chapter();

            if index + 1 < total && !self.settings.chapter_delay.is_zero() {
                tokio::time::sleep(self.settings.chapter_delay).await;
            }
        }

        Ok(bodies)
    }

    async fn complete(&self, stage: Stage, prompt: &str) -> Result<String, ArticleError> {
        self.provider.generate(prompt).await.map_err(|source| {
            tracing::error!(stage = %stage, error = %source, "Article stage failed");
            ArticleError::Stage { stage, source }
        })
    }
}

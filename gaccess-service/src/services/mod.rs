pub mod article;
pub mod metrics;
pub mod providers;

pub use article::{Article, ArticleError, ArticleGenerator};
pub use providers::gemini::GeminiClient;
pub use providers::relay::RelayTextProvider;
pub use providers::{ProviderError, TextProvider};

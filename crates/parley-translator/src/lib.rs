pub mod mymemory;

pub use mymemory::MyMemoryTranslator;

pub type LanguageCode = String;

/// A remote service turning text in one catalog language into another.
/// Implementations must not retry on their own; the caller decides.
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

/// Why a translation produced no text. The `Display` form is what the
/// window reports as the failure reason.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("translation service error: {0}")]
    ApiError(String),

    #[error("translation service unreachable: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("translation service rate limit reached")]
    RateLimitExceeded,

    #[error("nothing to translate")]
    EmptyText,

    #[error("translator disabled")]
    Disabled,
}

use crate::utils::error_chain_fmt;
use async_trait::async_trait;

#[derive(thiserror::Error)]
pub enum TemplateError {
    #[error("Failed to load the newsletter template")]
    Unavailable(#[source] anyhow::Error),
    #[error("The template declares {{{{{0}}}}} but no resolver exists for it")]
    UnknownToken(String),
    #[error("The template has an unterminated placeholder near byte {0}")]
    Unterminated(usize),
    #[error("Assembled output still contains a placeholder near byte {0}")]
    UnresolvedToken(usize),
}

impl std::fmt::Debug for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Where the HTML skeleton comes from.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn load(&self) -> Result<String, TemplateError>;
}

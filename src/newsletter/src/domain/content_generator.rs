use crate::domain::generated_content::ImageDataUri;
use crate::domain::image_prompt::ImagePrompt;
use crate::domain::template_source::TemplateError;
use crate::domain::validation::ValidationError;
use crate::prompt::StructuredPrompt;
use crate::utils::error_chain_fmt;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[derive(thiserror::Error)]
pub enum GenerationError {
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    Provider(String),
    #[error("Content blocked: {reason}. Please revise your input.")]
    Moderation { reason: String },
    #[error("The AI returned an invalid response: {0}")]
    MalformedResponse(String),
    #[error("{0}")]
    ImageGeneration(String),
    #[error("{}", join_validation_errors(.0))]
    Validation(Vec<ValidationError>),
    #[error("{0}")]
    InProgress(String),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<ValidationError> for GenerationError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(vec![error])
    }
}

fn join_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// An opaque text and image completion service.
///
/// Implementations make exactly one outbound call per method invocation and
/// never retry.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Returns the raw JSON text the model produced for `prompt`.
    async fn generate_structured(&self, prompt: &StructuredPrompt)
        -> Result<String, GenerationError>;

    async fn generate_image(&self, prompt: &ImagePrompt) -> Result<ImageDataUri, GenerationError>;
}

/// Decode a structured completion into `T`.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T, GenerationError> {
    serde_json::from_str(raw.trim()).map_err(|e| GenerationError::MalformedResponse(e.to_string()))
}

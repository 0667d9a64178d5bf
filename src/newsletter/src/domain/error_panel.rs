use crate::domain::content_generator::GenerationError;
use serde::{Deserialize, Serialize};

const PROVIDER_PREFIX: &str = "AI generation failed:";
const BLOCKED_PREFIX: &str = "Content blocked:";

/// What the user sees when generation fails: a title and one readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPanel {
    pub title: String,
    pub message: String,
}

impl ErrorPanel {
    fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
        }
    }

    fn moderation(reason: &str) -> Self {
        let reason = reason.trim().to_lowercase();
        let reason = if reason.is_empty() {
            "safety reasons".to_string()
        } else {
            reason
        };
        Self::new(
            "Content Moderation Error",
            format!(
                "The AI could not process your request because the input was blocked for {}. \
                 Please review your content for anything that might violate safety policies \
                 (e.g., hate speech, harassment, etc.) and try again.",
                reason
            ),
        )
    }

    /// Classify a free-form message by its known prefixes; anything
    /// unrecognised is passed through.
    pub fn from_message(message: &str) -> Self {
        let raw = message
            .strip_prefix(PROVIDER_PREFIX)
            .map(str::trim_start)
            .unwrap_or(message);

        if let Some(rest) = raw.strip_prefix(BLOCKED_PREFIX) {
            let reason = rest.split('.').next().unwrap_or_default();
            return Self::moderation(reason);
        }

        Self::new("Generation Failed", raw)
    }
}

impl From<&GenerationError> for ErrorPanel {
    fn from(error: &GenerationError) -> Self {
        match error {
            GenerationError::Moderation { reason } => Self::moderation(reason),
            GenerationError::MalformedResponse(_) => Self::new(
                "Invalid AI Response",
                "The AI returned an incomplete or invalid response. This can sometimes happen \
                 with complex requests. Please try again, or simplify your content.",
            ),
            GenerationError::Configuration(message) => Self::new("Configuration Error", message),
            GenerationError::Validation(_) => Self::new("Invalid Input", error.to_string()),
            GenerationError::InProgress(message) => Self::new("Request In Progress", message),
            GenerationError::ImageGeneration(message) => {
                Self::new("Image Generation Failed", message)
            }
            GenerationError::Provider(message) => Self::from_message(message),
            GenerationError::Template(_) | GenerationError::Unexpected(_) => {
                Self::from_message(&error.to_string())
            }
        }
    }
}

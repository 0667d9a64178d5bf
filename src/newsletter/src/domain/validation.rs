use crate::domain::form_data::{FormData, SocialNetwork};
use crate::domain::http_url::HttpUrl;
use std::fmt;

/// A problem with one form field, found before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collect every field error of `form`. Image prompts are checked separately
/// because a bad one only skips the image.
pub fn validate_form(form: &FormData) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let preferences = &form.preferences;

    if form.content_blocks.is_empty() {
        errors.push(ValidationError::new(
            "rawContent",
            "At least one content block is required",
        ));
    }
    for (index, block) in form.content_blocks.iter().enumerate() {
        if block.content.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("rawContent[{}].content", index),
                format!("Block {} has no content", index + 1),
            ));
        }
    }

    if preferences.cta_text.trim().is_empty() {
        errors.push(ValidationError::new("ctaText", "CTA button text is required"));
    }
    if let Err(message) = HttpUrl::parse(preferences.cta_url.clone()) {
        errors.push(ValidationError::new("ctaUrl", message));
    }

    for network in SocialNetwork::ALL {
        let url = preferences.socials.get(network);
        if url.trim().is_empty() {
            continue;
        }
        if let Err(message) = HttpUrl::parse(url.to_string()) {
            errors.push(ValidationError::new(
                format!("socials.{}", network.label().to_lowercase()),
                message,
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

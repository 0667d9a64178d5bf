use unicode_segmentation::UnicodeSegmentation;

pub const MIN_IMAGE_PROMPT_LENGTH: usize = 10;

/// A description long enough to be worth an image generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePrompt(String);

impl ImagePrompt {
    pub fn parse(s: &str) -> Result<ImagePrompt, String> {
        let trimmed = s.trim();
        let length = trimmed.graphemes(true).count();

        if length < MIN_IMAGE_PROMPT_LENGTH {
            Err(format!(
                "The image description must be at least {} characters long ({} given)",
                MIN_IMAGE_PROMPT_LENGTH, length
            ))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn inner(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ImagePrompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// The structured answer of the text model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub header_title: String,
    pub intro: String,
    /// HTML, already styled by the model.
    pub main_content: String,
    pub highlights: Vec<String>,
    #[serde(default)]
    pub translated_intro: Option<String>,
    #[serde(default)]
    pub translated_main_content: Option<String>,
    #[serde(default)]
    pub translated_highlights: Option<Vec<String>>,
    /// Only requested by the SEO-augmented schema.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

/// Borrowed view of the secondary-language fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation<'a> {
    pub intro: &'a str,
    pub main_content: &'a str,
    pub highlights: &'a [String],
}

impl GeneratedContent {
    pub fn translation(&self) -> Option<Translation<'_>> {
        let intro = self.translated_intro.as_deref().filter(|s| !s.trim().is_empty())?;
        let main_content = self
            .translated_main_content
            .as_deref()
            .filter(|s| !s.trim().is_empty())?;
        let highlights = self.translated_highlights.as_deref()?;
        Some(Translation {
            intro,
            main_content,
            highlights,
        })
    }

    /// Enforce "translated fields exist if and only if a secondary language was
    /// requested". Missing translations are an error, unrequested ones are dropped.
    pub fn reconcile_translation(mut self, secondary_language: Option<&str>) -> Result<Self, String> {
        match secondary_language {
            Some(language) if self.translation().is_none() => Err(format!(
                "a translation into {} was requested but the response has no translated content",
                language
            )),
            Some(_) => Ok(self),
            None => {
                if self.translated_intro.is_some()
                    || self.translated_main_content.is_some()
                    || self.translated_highlights.is_some()
                {
                    tracing::warn!("Discarding translated fields that were not requested");
                }
                self.translated_intro = None;
                self.translated_main_content = None;
                self.translated_highlights = None;
                Ok(self)
            }
        }
    }

    /// Reject a response that is valid JSON but useless as a newsletter.
    pub fn check_required_fields(&self) -> Result<(), String> {
        let missing: Vec<&str> = [
            ("headerTitle", self.header_title.trim().is_empty()),
            ("intro", self.intro.trim().is_empty()),
            ("mainContent", self.main_content.trim().is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, empty)| empty.then_some(name))
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("empty required fields: {}", missing.join(", ")))
        }
    }
}

/// A base64 raster wrapped as a `data:` URI, embeddable in an `<img src>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageDataUri(String);

impl ImageDataUri {
    /// Validates the payload before wrapping it.
    pub fn from_base64(mime_type: &str, encoded: &str) -> Result<Self, String> {
        if !mime_type.starts_with("image/") {
            return Err(format!("{} is not an image mime type", mime_type));
        }
        if encoded.is_empty() {
            return Err("the image payload is empty".to_string());
        }
        STANDARD
            .decode(encoded)
            .map_err(|e| format!("the image payload is not valid base64: {}", e))?;

        Ok(Self(format!("data:{};base64,{}", mime_type, encoded)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ImageDataUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The final assembled document. Replaced wholesale on regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsletterOutput {
    pub html: String,
}

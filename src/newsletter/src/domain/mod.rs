pub mod branding;
pub mod color;
mod content_generator;
mod error_panel;
mod extracted_styles;
pub mod form_data;
mod generated_content;
mod http_url;
mod image_prompt;
mod preference_store;
pub mod rich_text_editor;
mod style_advisory;
mod template_source;
pub mod validation;

pub use crate::domain::branding::{Branding, SocialIcons};
pub use crate::domain::content_generator::{parse_structured, ContentGenerator, GenerationError};
pub use crate::domain::error_panel::ErrorPanel;
pub use crate::domain::extracted_styles::ExtractedStyles;
pub use crate::domain::form_data::{
    BlockField, ContentBlock, FormData, ImagePosition, Preferences, SeparatorStyle,
    SocialNetwork, Socials,
};
pub use crate::domain::generated_content::{
    GeneratedContent, ImageDataUri, NewsletterOutput, Translation,
};
pub use crate::domain::http_url::{HttpUrl, StyleSourceUrl};
pub use crate::domain::image_prompt::{ImagePrompt, MIN_IMAGE_PROMPT_LENGTH};
pub use crate::domain::preference_store::{PreferenceStore, PreferenceStoreError};
pub use crate::domain::rich_text_editor::{BufferEditor, RichTextEditor};
pub use crate::domain::style_advisory::{style_warnings, ContrastWarning};
pub use crate::domain::template_source::{TemplateError, TemplateSource};
pub use crate::domain::validation::{validate_form, ValidationError};

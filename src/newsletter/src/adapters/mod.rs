mod cached_template;
mod external_editor;
mod file_template_source;
mod gemini_client;
mod gemini_types;
mod http_template_source;
mod json_file_preference_store;

pub use crate::adapters::cached_template::CachedTemplate;
pub use crate::adapters::external_editor::ExternalEditor;
pub use crate::adapters::file_template_source::FileTemplateSource;
pub use crate::adapters::gemini_client::GeminiClient;
pub use crate::adapters::http_template_source::HttpTemplateSource;
pub use crate::adapters::json_file_preference_store::{JsonFilePreferenceStore, PREFERENCES_KEY};

use crate::domain::form_data::Preferences;
use serde::{Deserialize, Serialize};

/// Styles read off an existing web page. Every field is required, so a
/// response either carries all nine values or is rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedStyles {
    pub body_text_color: String,
    pub h2_color: String,
    pub h3_color: String,
    pub link_color: String,
    pub button_background_color: String,
    pub button_text_color: String,
    pub body_font_family: String,
    pub h2_font_family: String,
    pub h3_font_family: String,
}

impl ExtractedStyles {
    /// Overwrite exactly the nine imported fields.
    pub fn apply_to(self, preferences: &mut Preferences) {
        preferences.body_text_color = self.body_text_color;
        preferences.h2_color = self.h2_color;
        preferences.h3_color = self.h3_color;
        preferences.link_color = self.link_color;
        preferences.button_background_color = self.button_background_color;
        preferences.button_text_color = self.button_text_color;
        preferences.body_font_family = self.body_font_family;
        preferences.h2_font_family = self.h2_font_family;
        preferences.h3_font_family = self.h3_font_family;
    }
}

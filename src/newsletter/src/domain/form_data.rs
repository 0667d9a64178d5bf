use crate::domain::generated_content::ImageDataUri;
use serde::{Deserialize, Serialize};

/// Sentinel used by the form for "no secondary language".
pub const NO_LANGUAGE: &str = "None";

/// The complete user input for one session.
///
/// Every field has a usable default, so a partially written JSON file still
/// deserializes into a valid record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormData {
    #[serde(flatten)]
    pub preferences: Preferences,
    #[serde(rename = "rawContent")]
    pub content_blocks: Vec<ContentBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_image: Option<ImageDataUri>,
}

/// Everything in [`FormData`] that is worth remembering between sessions:
/// all settings, none of the content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub primary_language: String,
    pub secondary_language: String,
    pub tone: String,
    pub audience: String,
    pub length: String,
    pub cta_text: String,
    pub cta_url: String,
    pub separator_style: SeparatorStyle,

    pub body_font_family: String,
    pub body_font_size: u16,
    pub body_text_color: String,

    pub h2_font_family: String,
    pub h2_font_size: u16,
    pub h2_color: String,

    pub h3_font_family: String,
    pub h3_font_size: u16,
    pub h3_color: String,

    pub link_color: String,
    pub button_background_color: String,
    pub button_text_color: String,

    pub image_prompt: String,
    pub image_position: ImagePosition,

    pub socials: Socials,
}

impl Preferences {
    /// The requested translation target, if any.
    pub fn secondary_language(&self) -> Option<&str> {
        let language = self.secondary_language.trim();
        if language.is_empty() || language == NO_LANGUAGE {
            None
        } else {
            Some(language)
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            primary_language: "English".to_string(),
            secondary_language: "Bosnian".to_string(),
            tone: "Friendly".to_string(),
            audience: "Parents".to_string(),
            length: "Medium".to_string(),
            cta_text: "Volunteer Now".to_string(),
            cta_url: "https://schoolwebsite.com/volunteer-signup".to_string(),
            separator_style: SeparatorStyle::ThinLine,
            body_font_family: "Arial".to_string(),
            body_font_size: 16,
            body_text_color: "#333333".to_string(),
            h2_font_family: "Arial".to_string(),
            h2_font_size: 22,
            h2_color: "#004080".to_string(),
            h3_font_family: "Arial".to_string(),
            h3_font_size: 18,
            h3_color: "#004080".to_string(),
            link_color: "#004080".to_string(),
            button_background_color: "#ffcc00".to_string(),
            button_text_color: "#004080".to_string(),
            image_prompt: String::new(),
            image_position: ImagePosition::MiddleOfContent,
            socials: Socials::default(),
        }
    }
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            preferences: Preferences::default(),
            content_blocks: vec![
                ContentBlock {
                    id: 1,
                    title: "Annual School Fair is Almost Here!".to_string(),
                    content: "Our annual school fair is happening next Friday, **October 25th**, \
                              from *3 PM to 6 PM*. It's a day of fun, games, and community spirit!\n\n\
                              ### We Need Your Help!\n\
                              We are looking for parent volunteers for:\n\
                              - The bake sale\n\
                              - Game booths\n\
                              - Setup and cleanup"
                        .to_string(),
                },
                ContentBlock {
                    id: 2,
                    title: "Show Your Spirit".to_string(),
                    content: "Students are encouraged to wear their house colors to show school \
                              spirit! All proceeds will go towards new library books."
                        .to_string(),
                },
            ],
            generated_image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: i64,
    pub title: String,
    /// Markdown or HTML, as typed by the user.
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockField {
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "content")]
    Content,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Socials {
    pub facebook: String,
    pub instagram: String,
    pub linkedin: String,
}

impl Socials {
    pub fn get(&self, network: SocialNetwork) -> &str {
        match network {
            SocialNetwork::Facebook => &self.facebook,
            SocialNetwork::Instagram => &self.instagram,
            SocialNetwork::LinkedIn => &self.linkedin,
        }
    }

    pub fn set(&mut self, network: SocialNetwork, url: String) {
        match network {
            SocialNetwork::Facebook => self.facebook = url,
            SocialNetwork::Instagram => self.instagram = url,
            SocialNetwork::LinkedIn => self.linkedin = url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialNetwork {
    Facebook,
    Instagram,
    #[serde(rename = "linkedin")]
    LinkedIn,
}

impl SocialNetwork {
    /// Render order in the footer.
    pub const ALL: [SocialNetwork; 3] = [
        SocialNetwork::Facebook,
        SocialNetwork::Instagram,
        SocialNetwork::LinkedIn,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SocialNetwork::Facebook => "Facebook",
            SocialNetwork::Instagram => "Instagram",
            SocialNetwork::LinkedIn => "LinkedIn",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImagePosition {
    #[serde(rename = "Top of content")]
    TopOfContent,
    #[default]
    #[serde(rename = "Middle of content")]
    MiddleOfContent,
    #[serde(rename = "Before CTA")]
    BeforeCta,
}

impl ImagePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImagePosition::TopOfContent => "Top of content",
            ImagePosition::MiddleOfContent => "Middle of content",
            ImagePosition::BeforeCta => "Before CTA",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeparatorStyle {
    #[default]
    #[serde(rename = "Thin Line")]
    ThinLine,
    #[serde(rename = "Dashed Line")]
    DashedLine,
    #[serde(rename = "None")]
    None,
}

impl SeparatorStyle {
    /// Inline CSS for the separator cell, `None` when no separator is drawn.
    pub fn border_css(&self) -> Option<&'static str> {
        match self {
            SeparatorStyle::ThinLine => Some("border-bottom: 1px solid #e0e0e0;"),
            SeparatorStyle::DashedLine => Some("border-bottom: 2px dashed #cccccc;"),
            SeparatorStyle::None => None,
        }
    }
}

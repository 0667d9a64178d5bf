use crate::domain::color::{contrast_ratio, LOW_CONTRAST_THRESHOLD};
use crate::domain::form_data::Preferences;

/// Content sits on a white card in the email template.
pub const CONTENT_BACKGROUND: &str = "#ffffff";

#[derive(Debug, Clone, PartialEq)]
pub struct ContrastWarning {
    pub element: &'static str,
    pub foreground: String,
    pub background: String,
    pub ratio: f64,
}

impl std::fmt::Display for ContrastWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} on {}) has a contrast ratio of {:.2}:1, below {}:1",
            self.element, self.foreground, self.background, self.ratio, LOW_CONTRAST_THRESHOLD
        )
    }
}

/// Colour pairs that fall below WCAG AA for normal text.
pub fn style_warnings(preferences: &Preferences) -> Vec<ContrastWarning> {
    let pairs = [
        ("Body text", &preferences.body_text_color, CONTENT_BACKGROUND),
        ("H2 headings", &preferences.h2_color, CONTENT_BACKGROUND),
        ("H3 headings", &preferences.h3_color, CONTENT_BACKGROUND),
        ("Links", &preferences.link_color, CONTENT_BACKGROUND),
        (
            "Button text",
            &preferences.button_text_color,
            preferences.button_background_color.as_str(),
        ),
    ];

    pairs
        .into_iter()
        .filter_map(|(element, foreground, background)| {
            let ratio = contrast_ratio(foreground, background);
            (ratio < LOW_CONTRAST_THRESHOLD).then(|| ContrastWarning {
                element,
                foreground: foreground.clone(),
                background: background.to_string(),
                ratio,
            })
        })
        .collect()
}

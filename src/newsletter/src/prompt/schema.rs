//! Response schemas in the provider's OpenAPI subset (upper-case type names).

use crate::prompt::PromptVariant;
use serde_json::{json, Map, Value};

fn string(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn nullable_string(description: &str) -> Value {
    json!({ "type": "STRING", "description": description, "nullable": true })
}

fn string_array(description: &str, nullable: bool) -> Value {
    let mut value = json!({
        "type": "ARRAY",
        "items": { "type": "STRING" },
        "description": description,
    });
    if nullable {
        value["nullable"] = Value::Bool(true);
    }
    value
}

pub const NEWSLETTER_REQUIRED_FIELDS: [&str; 4] = ["headerTitle", "intro", "mainContent", "highlights"];

pub fn newsletter_schema(variant: PromptVariant) -> Value {
    let mut properties = Map::new();
    properties.insert(
        "headerTitle".into(),
        string("A compelling newsletter title derived from the main content."),
    );
    properties.insert(
        "intro".into(),
        string("A short welcoming paragraph in the primary language."),
    );
    properties.insert(
        "mainContent".into(),
        string("All content blocks rewritten and concatenated as one HTML string in the primary language."),
    );
    properties.insert(
        "highlights".into(),
        string_array("Key takeaways of the main content in the primary language.", false),
    );
    properties.insert(
        "translatedIntro".into(),
        nullable_string("The intro in the secondary language, or null when none was requested."),
    );
    properties.insert(
        "translatedMainContent".into(),
        nullable_string("The mainContent HTML in the secondary language, or null when none was requested."),
    );
    properties.insert(
        "translatedHighlights".into(),
        string_array("The highlights in the secondary language, or null when none was requested.", true),
    );

    if variant == PromptVariant::SeoAugmented {
        properties.insert(
            "description".into(),
            nullable_string("A meta description of at most 160 characters."),
        );
        properties.insert(
            "keywords".into(),
            string_array("Five to eight search keywords.", true),
        );
    }

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": NEWSLETTER_REQUIRED_FIELDS,
    })
}

pub const STYLE_FIELDS: [(&str, &str); 9] = [
    ("bodyTextColor", "The primary body text colour as a hex code, e.g. #333333."),
    ("h2Color", "The colour of main headings (H2) as a hex code."),
    ("h3Color", "The colour of sub-headings (H3) as a hex code."),
    ("linkColor", "The colour of hyperlink text as a hex code."),
    ("buttonBackgroundColor", "The background colour of primary buttons as a hex code."),
    ("buttonTextColor", "The text colour of primary buttons as a hex code."),
    ("bodyFontFamily", "The font family of body text, e.g. Arial."),
    ("h2FontFamily", "The font family of main headings (H2)."),
    ("h3FontFamily", "The font family of sub-headings (H3)."),
];

pub fn style_schema() -> Value {
    let properties: Map<String, Value> = STYLE_FIELDS
        .iter()
        .map(|(name, description)| (name.to_string(), string(description)))
        .collect();
    let required: Vec<&str> = STYLE_FIELDS.iter().map(|(name, _)| *name).collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

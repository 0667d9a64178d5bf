//! Turns form state into instructions for the text model.
//!
//! Everything here is a pure function of its input: the same form always
//! yields the same prompt and schema.

pub mod schema;

use crate::domain::{FormData, ImagePosition, StyleSourceUrl};
use serde_json::Value;

/// Which response contract to ask for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptVariant {
    #[default]
    Standard,
    /// Also asks for a meta description and keywords.
    SeoAugmented,
}

/// A prompt plus the JSON schema its answer must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredPrompt {
    pub system_instruction: Option<String>,
    pub user_prompt: String,
    pub response_schema: Value,
}

pub const NEWSLETTER_SYSTEM_INSTRUCTION: &str = r#"# ROLE: School Newsletter Editor

You write and translate content for a school newsletter. You receive raw content blocks and the sender's preferences and turn them into polished, natural text.

Reply with exactly one JSON object that satisfies the response schema. No markdown fences, no commentary before or after it.

## Rules

1. Rewrite the raw content for the requested tone, audience and length.
2. Convert the Markdown in the input to clean HTML for `mainContent`:
   - Every block title becomes an `<h2>` heading.
   - `### Heading` becomes an `<h3>` heading.
   - `**bold**` becomes `<strong>`, `*italic*` becomes `<em>`.
   - `-` lists become `<ul>`, numbered lists become `<ol>`, each item an `<li>`.
   - Remaining text becomes `<p>` paragraphs.
3. Give every `<h2>` and `<h3>` an inline `style` attribute built from the heading styles below, for example `style="font-family: 'Georgia', serif; font-size: 24px; color: #333333; font-weight: bold; margin-top: 16px; margin-bottom: 8px;"`.
4. `highlights` is an array of short key takeaways.
5. When a secondary language is given, translate intro, mainContent and highlights into `translatedIntro`, `translatedMainContent` and `translatedHighlights`. Otherwise leave those fields null.
"#;

/// Build the newsletter request for `form`.
pub fn build_newsletter_prompt(form: &FormData, variant: PromptVariant) -> StructuredPrompt {
    let mut system_instruction = NEWSLETTER_SYSTEM_INSTRUCTION.to_string();
    if variant == PromptVariant::SeoAugmented {
        system_instruction.push_str(
            "6. Also fill `description` (at most 160 characters) and `keywords` for search engines.\n",
        );
    }

    StructuredPrompt {
        system_instruction: Some(system_instruction),
        user_prompt: build_user_prompt(form),
        response_schema: schema::newsletter_schema(variant),
    }
}

pub fn build_user_prompt(form: &FormData) -> String {
    let p = &form.preferences;
    let mut prompt = format!(
        "# Newsletter Generation Request\n\n\
         Generate the newsletter from the data below and reply with one JSON object matching the schema.\n\n\
         ## Content Parameters\n\
         - **Primary Language:** {}\n\
         - **Secondary Language:** {}\n\
         - **Tone:** {}\n\
         - **Audience:** {}\n\
         - **Approximate Length:** {} (for the primary language content)\n",
        p.primary_language,
        p.secondary_language().unwrap_or("None"),
        p.tone,
        p.audience,
        p.length,
    );

    if let Some(language) = p.secondary_language() {
        prompt.push_str(&format!(
            "- **Translation:** translate intro, mainContent and highlights into {} and fill the translated fields.\n",
            language
        ));
    }

    prompt.push_str(&format!(
        "\n## Style Parameters\n\
         - **H2 Font Family:** {}\n\
         - **H2 Font Size:** {}px\n\
         - **H2 Color:** {}\n\
         - **H3 Font Family:** {}\n\
         - **H3 Font Size:** {}px\n\
         - **H3 Color:** {}\n",
        p.h2_font_family, p.h2_font_size, p.h2_color, p.h3_font_family, p.h3_font_size, p.h3_color,
    ));

    if !p.image_prompt.trim().is_empty() || form.generated_image.is_some() {
        prompt.push_str(&format!(
            "\n## Image\n\
             An illustration described as \"{}\" is placed {} by the template through its own placeholder. \
             Do not embed image data and do not write `<img>` tags.\n",
            p.image_prompt.trim(),
            image_position_phrase(p.image_position),
        ));
    }

    prompt.push_str("\n## Raw Content Blocks to Rewrite\n");
    let blocks = form
        .content_blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            format!(
                "--- Content Block {} ---\n**Title:** {}\n**Content:**\n{}",
                index + 1,
                block.title,
                block.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    prompt.push_str(&blocks);
    prompt.push('\n');

    prompt
}

fn image_position_phrase(position: ImagePosition) -> &'static str {
    match position {
        ImagePosition::TopOfContent => "above the main content",
        ImagePosition::MiddleOfContent => "between two of the `<h2>` sections",
        ImagePosition::BeforeCta => "just before the call-to-action button",
    }
}

/// Build the style import request for `url`.
pub fn build_style_prompt(url: &StyleSourceUrl) -> StructuredPrompt {
    let user_prompt = format!(
        "Analyze the page at the URL below and extract its key design and style elements.\n\
         Focus on the main content area and ignore headers, footers or sidebars that are styled differently.\n\
         Reply with one JSON object matching the schema.\n\n\
         - Colours are hex codes.\n\
         - Fonts are a single font-family name; pick the closest web-safe font to the one the site uses.\n\
         - When a style cannot be determined (e.g. the page has no buttons), make a reasonable choice that \
         complements the rest of the palette.\n\n\
         URL to analyze: {}\n",
        url.as_str()
    );

    StructuredPrompt {
        system_instruction: None,
        user_prompt,
        response_schema: schema::style_schema(),
    }
}

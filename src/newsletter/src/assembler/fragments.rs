//! HTML snippets spliced into the skeleton. Table layout and inline styles
//! only, so they survive email clients.

use crate::domain::color::relative_luminance;
use crate::domain::{
    Branding, ImageDataUri, ImagePosition, SeparatorStyle, SocialNetwork, Socials, Translation,
};

/// Closing tag that separates the sections of generated main content.
pub const SECTION_BOUNDARY: &str = "</h2>";

/// Keeps text from ever forming a placeholder opener in the output.
pub fn neutralize(text: &str) -> String {
    text.replace('{', "&#123;")
}

/// Escape user text for element content. Also neutralizes braces.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '{' => escaped.push_str("&#123;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn highlights_list(highlights: &[String]) -> String {
    let items: String = highlights
        .iter()
        .map(|h| format!("<li>{}</li>", neutralize(h)))
        .collect();
    format!("<ul>{}</ul>", items)
}

pub fn image_block(image: &ImageDataUri, alt: &str) -> String {
    format!(
        r#"<table role="presentation" border="0" cellpadding="0" cellspacing="0" width="100%"><tr><td style="padding: 16px 20px;"><img src="{}" alt="{}" style="display: block; width: 100%; max-width: 100%; height: auto; border: 0; border-radius: 8px;"></td></tr></table>"#,
        escape_text(image.as_str()),
        escape_text(alt.trim()),
    )
}

/// Place `image` inside already neutralized `main_content` for the positions
/// that live there. `BeforeCta` leaves the content untouched.
pub fn place_image_in_content(main_content: &str, image: &str, position: ImagePosition) -> String {
    match position {
        ImagePosition::TopOfContent => format!("{}{}", image, main_content),
        ImagePosition::MiddleOfContent => {
            let mut sections: Vec<String> = main_content
                .split(SECTION_BOUNDARY)
                .map(str::to_string)
                .collect();
            if sections.len() > 1 {
                let middle = sections.len() / 2;
                sections[middle].insert_str(0, image);
                sections.join(SECTION_BOUNDARY)
            } else {
                format!("{}{}", main_content, image)
            }
        }
        ImagePosition::BeforeCta => main_content.to_string(),
    }
}

/// Icons are picked to stay readable on the header background.
pub fn social_links(socials: &Socials, branding: &Branding) -> String {
    let icons = if relative_luminance(&branding.header_background_color) < 0.5 {
        &branding.light_icons
    } else {
        &branding.dark_icons
    };

    SocialNetwork::ALL
        .into_iter()
        .filter(|network| !socials.get(*network).trim().is_empty())
        .map(|network| {
            let label = network.label();
            format!(
                r#"<a href="{}" title="{label}"><img src="{}" alt="{label}" width="24" height="24" style="display:inline-block; border:0;"></a>"#,
                escape_text(socials.get(network).trim()),
                escape_text(icons.get(network)),
            )
        })
        .collect::<Vec<_>>()
        .join("&nbsp;&nbsp;")
}

fn content_row(padding_top: bool, inner: &str) -> String {
    let style = if padding_top { "" } else { r#" style="padding-top:0;""# };
    format!(
        r##"<table width="100%" bgcolor="#ffffff" cellpadding="20" cellspacing="0"{}><tr><td align="center"><table class="container"><tr><td>{}</td></tr></table></td></tr></table>"##,
        style, inner
    )
}

pub fn separator(style: SeparatorStyle) -> String {
    match style.border_css() {
        Some(css) => format!(
            r##"<table width="100%" bgcolor="#ffffff" cellpadding="20" cellspacing="0"><tr><td align="center"><table class="container" style="width:100%;"><tr><td style="{}">&nbsp;</td></tr></table></td></tr></table>"##,
            css
        ),
        None => String::new(),
    }
}

/// Second copy of the content in the secondary language.
pub fn translated_section(translation: &Translation<'_>, style: SeparatorStyle) -> String {
    [
        separator(style),
        content_row(true, &format!("<p>{}</p>", neutralize(translation.intro))),
        content_row(false, &neutralize(translation.main_content)),
        content_row(false, &highlights_list(translation.highlights)),
    ]
    .concat()
}

pub fn meta_tags(description: Option<&str>, keywords: Option<&[String]>) -> String {
    let mut tags = String::new();
    if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
        tags.push_str(&format!(
            r#"<meta name="description" content="{}">"#,
            escape_text(description.trim())
        ));
    }
    if let Some(keywords) = keywords.filter(|k| !k.is_empty()) {
        tags.push_str(&format!(
            r#"<meta name="keywords" content="{}">"#,
            escape_text(&keywords.join(", "))
        ));
    }
    tags
}

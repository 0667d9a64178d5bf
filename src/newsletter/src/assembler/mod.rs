//! Fills the email skeleton with generated content and user preferences.

mod fragments;
mod token;

pub use token::{Skeleton, TemplateToken};

use crate::domain::{
    Branding, FormData, GeneratedContent, ImageDataUri, ImagePosition, NewsletterOutput,
    TemplateError,
};
use fragments::{escape_text, neutralize};

/// Everything one assembly reads. Borrowed, so assembling twice from the same
/// input yields byte-identical documents.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyInput<'a> {
    pub form: &'a FormData,
    pub content: &'a GeneratedContent,
    pub image: Option<&'a ImageDataUri>,
    pub branding: &'a Branding,
    pub year: i32,
}

#[tracing::instrument(name = "Assembling newsletter", skip_all)]
pub fn assemble(
    skeleton: &Skeleton,
    input: &AssemblyInput<'_>,
) -> Result<NewsletterOutput, TemplateError> {
    let html = skeleton.render(|token| resolve(token, input));

    if let Some(offset) = html.find("{{") {
        return Err(TemplateError::UnresolvedToken(offset));
    }

    Ok(NewsletterOutput { html })
}

fn resolve(token: TemplateToken, input: &AssemblyInput<'_>) -> String {
    let preferences = &input.form.preferences;
    let content = input.content;
    let branding = input.branding;

    match token {
        TemplateToken::HeaderTitle => escape_text(&content.header_title),
        TemplateToken::Intro => neutralize(&content.intro),
        TemplateToken::MainContent => main_content(input),
        TemplateToken::Highlights => fragments::highlights_list(&content.highlights),
        TemplateToken::ExtraContentBlock => extra_content(input),
        TemplateToken::Cta => escape_text(&preferences.cta_text),
        TemplateToken::CtaUrl => escape_text(&preferences.cta_url),
        TemplateToken::SocialLinks => fragments::social_links(&preferences.socials, branding),
        TemplateToken::MetaTags => {
            fragments::meta_tags(content.description.as_deref(), content.keywords.as_deref())
        }
        TemplateToken::BodyFontFamily => escape_text(&preferences.body_font_family),
        TemplateToken::BodyFontSize => preferences.body_font_size.to_string(),
        TemplateToken::BodyTextColor => escape_text(&preferences.body_text_color),
        TemplateToken::H2FontFamily => escape_text(&preferences.h2_font_family),
        TemplateToken::H2FontSize => preferences.h2_font_size.to_string(),
        TemplateToken::H2Color => escape_text(&preferences.h2_color),
        TemplateToken::LinkColor => escape_text(&preferences.link_color),
        TemplateToken::ButtonBackgroundColor => escape_text(&preferences.button_background_color),
        TemplateToken::ButtonTextColor => escape_text(&preferences.button_text_color),
        TemplateToken::HeaderBackgroundColor => escape_text(&branding.header_background_color),
        TemplateToken::LogoUrl => escape_text(&branding.logo_url),
        TemplateToken::FooterInfo => escape_text(&branding.footer_info),
        TemplateToken::CurrentYear => input.year.to_string(),
    }
}

fn image_html(input: &AssemblyInput<'_>) -> Option<String> {
    input
        .image
        .map(|image| fragments::image_block(image, &input.form.preferences.image_prompt))
}

fn main_content(input: &AssemblyInput<'_>) -> String {
    let main_content = neutralize(&input.content.main_content);
    match image_html(input) {
        Some(image) => fragments::place_image_in_content(
            &main_content,
            &image,
            input.form.preferences.image_position,
        ),
        None => main_content,
    }
}

fn extra_content(input: &AssemblyInput<'_>) -> String {
    let preferences = &input.form.preferences;
    let mut extra = String::new();

    if preferences.image_position == ImagePosition::BeforeCta {
        if let Some(image) = image_html(input) {
            extra.push_str(&image);
        }
    }

    if preferences.secondary_language().is_some() {
        if let Some(translation) = input.content.translation() {
            extra.push_str(&fragments::translated_section(
                &translation,
                preferences.separator_style,
            ));
        }
    }

    extra
}

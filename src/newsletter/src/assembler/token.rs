use crate::domain::TemplateError;

/// Every placeholder the email skeleton may contain.
///
/// Adding a variant without a resolver in [`super::resolve`] does not compile,
/// and a skeleton naming a token missing here is rejected when it is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateToken {
    HeaderTitle,
    Intro,
    MainContent,
    Highlights,
    ExtraContentBlock,
    Cta,
    CtaUrl,
    SocialLinks,
    MetaTags,
    BodyFontFamily,
    BodyFontSize,
    BodyTextColor,
    H2FontFamily,
    H2FontSize,
    H2Color,
    LinkColor,
    ButtonBackgroundColor,
    ButtonTextColor,
    HeaderBackgroundColor,
    LogoUrl,
    FooterInfo,
    CurrentYear,
}

impl TemplateToken {
    pub const ALL: [TemplateToken; 22] = [
        TemplateToken::HeaderTitle,
        TemplateToken::Intro,
        TemplateToken::MainContent,
        TemplateToken::Highlights,
        TemplateToken::ExtraContentBlock,
        TemplateToken::Cta,
        TemplateToken::CtaUrl,
        TemplateToken::SocialLinks,
        TemplateToken::MetaTags,
        TemplateToken::BodyFontFamily,
        TemplateToken::BodyFontSize,
        TemplateToken::BodyTextColor,
        TemplateToken::H2FontFamily,
        TemplateToken::H2FontSize,
        TemplateToken::H2Color,
        TemplateToken::LinkColor,
        TemplateToken::ButtonBackgroundColor,
        TemplateToken::ButtonTextColor,
        TemplateToken::HeaderBackgroundColor,
        TemplateToken::LogoUrl,
        TemplateToken::FooterInfo,
        TemplateToken::CurrentYear,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TemplateToken::HeaderTitle => "HEADER_TITLE",
            TemplateToken::Intro => "INTRO",
            TemplateToken::MainContent => "MAIN_CONTENT",
            TemplateToken::Highlights => "HIGHLIGHTS",
            TemplateToken::ExtraContentBlock => "EXTRA_CONTENT_BLOCK",
            TemplateToken::Cta => "CTA",
            TemplateToken::CtaUrl => "CTA_URL",
            TemplateToken::SocialLinks => "SOCIAL_LINKS",
            TemplateToken::MetaTags => "META_TAGS",
            TemplateToken::BodyFontFamily => "BODY_FONT_FAMILY",
            TemplateToken::BodyFontSize => "BODY_FONT_SIZE",
            TemplateToken::BodyTextColor => "BODY_TEXT_COLOR",
            TemplateToken::H2FontFamily => "H2_FONT_FAMILY",
            TemplateToken::H2FontSize => "H2_FONT_SIZE",
            TemplateToken::H2Color => "H2_COLOR",
            TemplateToken::LinkColor => "LINK_COLOR",
            TemplateToken::ButtonBackgroundColor => "BUTTON_BACKGROUND_COLOR",
            TemplateToken::ButtonTextColor => "BUTTON_TEXT_COLOR",
            TemplateToken::HeaderBackgroundColor => "HEADER_BACKGROUND_COLOR",
            TemplateToken::LogoUrl => "LOGO_URL",
            TemplateToken::FooterInfo => "FOOTER_INFO",
            TemplateToken::CurrentYear => "CURRENT_YEAR",
        }
    }

    pub fn from_name(name: &str) -> Option<TemplateToken> {
        Self::ALL.into_iter().find(|token| token.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Token(TemplateToken),
}

/// A parsed skeleton: literal HTML interleaved with typed tokens.
///
/// Rendering walks the segments once, so resolved values are never scanned
/// for further placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    segments: Vec<Segment>,
}

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

impl Skeleton {
    pub fn parse(raw: &str) -> Result<Skeleton, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = raw;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after_open = &rest[start + OPEN.len()..];
            let end = after_open
                .find(CLOSE)
                .ok_or(TemplateError::Unterminated(offset + start))?;
            let name = after_open[..end].trim();
            let token = TemplateToken::from_name(name)
                .ok_or_else(|| TemplateError::UnknownToken(name.to_string()))?;
            segments.push(Segment::Token(token));

            let consumed = start + OPEN.len() + end + CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Skeleton { segments })
    }

    /// Tokens in order of first appearance.
    pub fn tokens(&self) -> Vec<TemplateToken> {
        let mut seen = Vec::new();
        for segment in &self.segments {
            if let Segment::Token(token) = segment {
                if !seen.contains(token) {
                    seen.push(*token);
                }
            }
        }
        seen
    }

    pub fn render<F>(&self, mut resolve: F) -> String
    where
        F: FnMut(TemplateToken) -> String,
    {
        let mut cache: Vec<(TemplateToken, String)> = Vec::new();
        let mut output = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Token(token) => {
                    if let Some((_, value)) = cache.iter().find(|(t, _)| t == token) {
                        output.push_str(value);
                    } else {
                        let value = resolve(*token);
                        output.push_str(&value);
                        cache.push((*token, value));
                    }
                }
            }
        }
        output
    }
}

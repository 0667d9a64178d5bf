use crate::adapters::{CachedTemplate, FileTemplateSource, GeminiClient, HttpTemplateSource};
use crate::assembler::{assemble, AssemblyInput};
use crate::configuration::Settings;
use crate::domain::{
    parse_structured, validate_form, Branding, ContentGenerator, ExtractedStyles, FormData,
    GeneratedContent, GenerationError, HttpUrl, ImageDataUri, ImagePrompt, NewsletterOutput,
    StyleSourceUrl, TemplateSource, ValidationError,
};
use crate::prompt::{build_newsletter_prompt, build_style_prompt, PromptVariant};
use std::sync::Arc;

/// A finished newsletter plus the image it embeds, so the caller can keep it.
#[derive(Debug, Clone)]
pub struct GeneratedNewsletter {
    pub output: NewsletterOutput,
    pub image: Option<ImageDataUri>,
}

#[derive(Clone)]
pub struct NewsletterService {
    generator: Arc<dyn ContentGenerator>,
    template: CachedTemplate,
    branding: Branding,
    variant: PromptVariant,
}

impl NewsletterService {
    pub fn new(
        generator: Arc<dyn ContentGenerator>,
        template: CachedTemplate,
        branding: Branding,
        variant: PromptVariant,
    ) -> Self {
        Self {
            generator,
            template,
            branding,
            variant,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, GenerationError> {
        let generator = GeminiClient::new(&settings.ai)?;

        let source: Arc<dyn TemplateSource> = match (&settings.template.url, &settings.template.path) {
            (Some(url), _) => {
                let url = HttpUrl::parse(url.clone()).map_err(GenerationError::Configuration)?;
                Arc::new(HttpTemplateSource::new(url, settings.ai.timeout())?)
            }
            (None, Some(path)) => Arc::new(FileTemplateSource::new(path.clone())),
            (None, None) => {
                return Err(GenerationError::Configuration(
                    "Either template.path or template.url must be configured".to_string(),
                ))
            }
        };

        let variant = if settings.ai.seo_metadata {
            PromptVariant::SeoAugmented
        } else {
            PromptVariant::Standard
        };

        Ok(Self::new(
            Arc::new(generator),
            CachedTemplate::new(source),
            settings.branding.clone(),
            variant,
        ))
    }

    /// Validate, prompt, fetch the image if one is wanted, and assemble.
    ///
    /// Nothing is returned unless every step succeeded.
    #[tracing::instrument(
        name = "Generating newsletter",
        skip(self, form),
        fields(blocks = form.content_blocks.len(), variant = ?self.variant)
    )]
    pub async fn generate_newsletter(
        &self,
        form: &FormData,
        year: i32,
    ) -> Result<GeneratedNewsletter, GenerationError> {
        validate_form(form).map_err(GenerationError::Validation)?;
        let skeleton = self
            .template
            .get()
            .await
            .map_err(|e| log_failure(e.into()))?;

        let (content, image) = tokio::try_join!(self.request_content(form), self.image_for(form))
            .map_err(log_failure)?;

        let output = assemble(
            skeleton,
            &AssemblyInput {
                form,
                content: &content,
                image: image.as_ref(),
                branding: &self.branding,
                year,
            },
        )
        .map_err(|e| log_failure(e.into()))?;

        Ok(GeneratedNewsletter { output, image })
    }

    async fn request_content(&self, form: &FormData) -> Result<GeneratedContent, GenerationError> {
        let prompt = build_newsletter_prompt(form, self.variant);
        let raw = self.generator.generate_structured(&prompt).await?;

        let content: GeneratedContent = parse_structured(&raw)?;
        content
            .check_required_fields()
            .map_err(GenerationError::MalformedResponse)?;
        content
            .reconcile_translation(form.preferences.secondary_language())
            .map_err(GenerationError::MalformedResponse)
    }

    async fn image_for(&self, form: &FormData) -> Result<Option<ImageDataUri>, GenerationError> {
        if let Some(image) = &form.generated_image {
            return Ok(Some(image.clone()));
        }
        let description = form.preferences.image_prompt.trim();
        if description.is_empty() {
            return Ok(None);
        }
        match ImagePrompt::parse(description) {
            Ok(prompt) => self.generator.generate_image(&prompt).await.map(Some),
            Err(reason) => {
                tracing::warn!(%reason, "Skipping the newsletter image");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(name = "Generating image preview", skip(self, description))]
    pub async fn generate_image_preview(
        &self,
        description: &str,
    ) -> Result<ImageDataUri, GenerationError> {
        let prompt = ImagePrompt::parse(description)
            .map_err(|e| ValidationError::new("imagePrompt", e))?;
        self.generator
            .generate_image(&prompt)
            .await
            .map_err(log_failure)
    }

    #[tracing::instrument(name = "Extracting styles", skip(self))]
    pub async fn extract_styles(&self, url: &str) -> Result<ExtractedStyles, GenerationError> {
        let url = StyleSourceUrl::parse(url).map_err(|e| ValidationError::new("styleUrl", e))?;
        let raw = self
            .generator
            .generate_structured(&build_style_prompt(&url))
            .await
            .map_err(log_failure)?;
        parse_structured(&raw)
    }
}

fn log_failure(error: GenerationError) -> GenerationError {
    tracing::error!(
        error.cause_chain = ?error,
        error.message = %error,
        "Newsletter generation failed"
    );
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TemplateError, TemplateSource};
    use crate::prompt::StructuredPrompt;
    use async_trait::async_trait;
    use claims::{assert_err, assert_none, assert_ok, assert_some};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubGenerator {
        text: String,
        text_calls: AtomicUsize,
        image_calls: AtomicUsize,
    }

    impl StubGenerator {
        fn answering(text: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                text: text.to_string(),
                text_calls: AtomicUsize::new(0),
                image_calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ContentGenerator for StubGenerator {
        async fn generate_structured(
            &self,
            _prompt: &StructuredPrompt,
        ) -> Result<String, GenerationError> {
            self.text_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.clone())
        }

        async fn generate_image(
            &self,
            _prompt: &ImagePrompt,
        ) -> Result<ImageDataUri, GenerationError> {
            self.image_calls.fetch_add(1, Ordering::SeqCst);
            Ok(ImageDataUri::from_base64("image/png", "aGVsbG8=").unwrap())
        }
    }

    struct BundledTemplate;

    #[async_trait]
    impl TemplateSource for BundledTemplate {
        async fn load(&self) -> Result<String, TemplateError> {
            Ok(include_str!("../templates/newsletter.html").to_string())
        }
    }

    fn branding() -> Branding {
        let icons = crate::domain::SocialIcons {
            facebook: "https://icons.test/facebook.png".to_string(),
            instagram: "https://icons.test/instagram.png".to_string(),
            linkedin: "https://icons.test/linkedin.png".to_string(),
        };
        Branding {
            logo_url: "https://school.test/logo.png".to_string(),
            footer_info: "Test School".to_string(),
            header_background_color: "#004080".to_string(),
            light_icons: icons.clone(),
            dark_icons: icons,
        }
    }

    fn service(generator: Arc<StubGenerator>) -> NewsletterService {
        NewsletterService::new(
            generator,
            CachedTemplate::new(Arc::new(BundledTemplate)),
            branding(),
            PromptVariant::Standard,
        )
    }

    fn bilingual_answer() -> serde_json::Value {
        serde_json::json!({
            "headerTitle": "Fair and Spirit",
            "intro": "Hello families.",
            "mainContent": "<h2>Fair</h2><p>Friday.</p><h2>Spirit</h2><p>Colours.</p>",
            "highlights": ["Fair on Friday"],
            "translatedIntro": "Zdravo porodice.",
            "translatedMainContent": "<h2>Sajam</h2><p>Petak.</p>",
            "translatedHighlights": ["Sajam u petak"]
        })
    }

    #[tokio::test]
    async fn invalid_forms_never_reach_the_provider() {
        let generator = StubGenerator::answering(bilingual_answer());
        let mut form = FormData::default();
        form.preferences.cta_url = "ftp://x".to_string();

        let error = assert_err!(service(generator.clone()).generate_newsletter(&form, 2024).await);
        assert!(matches!(error, GenerationError::Validation(_)));
        assert_eq!(generator.text_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn a_short_image_prompt_is_skipped() {
        let generator = StubGenerator::answering(bilingual_answer());
        let mut form = FormData::default();
        form.preferences.image_prompt = "a cat".to_string();

        let generated = assert_ok!(service(generator.clone()).generate_newsletter(&form, 2024).await);
        assert_none!(generated.image);
        assert_eq!(generator.image_calls.load(Ordering::SeqCst), 0);
        assert!(generated.output.html.contains("Zdravo porodice."));
    }

    #[tokio::test]
    async fn an_existing_image_is_reused() {
        let generator = StubGenerator::answering(bilingual_answer());
        let mut form = FormData::default();
        form.preferences.image_prompt = "students planting trees".to_string();
        form.generated_image = Some(ImageDataUri::from_base64("image/jpeg", "aGk=").unwrap());

        let generated = assert_ok!(service(generator.clone()).generate_newsletter(&form, 2024).await);
        assert_eq!(assert_some!(generated.image).as_str(), "data:image/jpeg;base64,aGk=");
        assert_eq!(generator.image_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn a_missing_translation_is_malformed() {
        let mut answer = bilingual_answer();
        answer["translatedIntro"] = serde_json::Value::Null;
        let generator = StubGenerator::answering(answer);

        let error = assert_err!(
            service(generator)
                .generate_newsletter(&FormData::default(), 2024)
                .await
        );
        assert!(matches!(error, GenerationError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn translated_highlights_are_required_too() {
        let mut answer = bilingual_answer();
        answer.as_object_mut().unwrap().remove("translatedHighlights");
        let generator = StubGenerator::answering(answer);
        let mut form = FormData::default();
        form.preferences.secondary_language = "Bosnian".to_string();

        let error = assert_err!(service(generator).generate_newsletter(&form, 2024).await);
        assert!(matches!(error, GenerationError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn style_urls_are_validated_first() {
        let generator = StubGenerator::answering(serde_json::json!({}));
        let error = assert_err!(service(generator.clone()).extract_styles("   ").await);

        assert!(matches!(error, GenerationError::Validation(_)));
        assert_eq!(generator.text_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn incomplete_styles_are_malformed() {
        let generator = StubGenerator::answering(serde_json::json!({ "bodyTextColor": "#000000" }));
        let error = assert_err!(service(generator).extract_styles("idss.ba").await);
        assert!(matches!(error, GenerationError::MalformedResponse(_)));
    }
}

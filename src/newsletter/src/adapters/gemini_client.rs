use crate::adapters::gemini_types::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    OutputOptions, PredictInstance, PredictParameters, PredictRequest, PredictResponse,
};
use crate::configuration::AiSettings;
use crate::domain::{ContentGenerator, GenerationError, ImageDataUri, ImagePrompt};
use crate::prompt::StructuredPrompt;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};

const API_KEY_HEADER: &str = "x-goog-api-key";
const IMAGE_MIME_TYPE: &str = "image/png";

/// Talks to the Gemini REST API. One HTTP call per operation, no retries.
pub struct GeminiClient {
    http_client: Client,
    base_url: String,
    api_key: Option<Secret<String>>,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn new(settings: &AiSettings) -> Result<Self, GenerationError> {
        let http_client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .context("Failed to build the HTTP client")?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            text_model: settings.text_model.clone(),
            image_model: settings.image_model.clone(),
        })
    }

    fn api_key(&self) -> Result<&str, GenerationError> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GenerationError::Configuration(
                    "The AI provider API key is not configured. Set APP_AI__API_KEY.".to_string(),
                )
            })
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.base_url, model, method)
    }

    async fn post<T: serde::Serialize>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Response, GenerationError> {
        let api_key = self.api_key()?;
        self.http_client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GenerationError::Provider(format!("AI generation failed: {}", e)))
    }
}

/// Turns a non-2xx answer into the provider's own message when it sent one.
async fn provider_failure(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => {
            tracing::warn!(
                http.status = status.as_u16(),
                error.code = ?envelope.error.code,
                error.status = ?envelope.error.status,
                "The provider rejected the request"
            );
            format!(
            "AI generation failed: {} ({})",
            envelope.error.message,
            envelope
                .error
                .status
                .unwrap_or_else(|| status.as_u16().to_string())
            )
        }
        Err(_) => format!("AI generation failed: the provider answered {}", status),
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    #[tracing::instrument(
        name = "Requesting structured content",
        skip(self, prompt),
        fields(model = %self.text_model)
    )]
    async fn generate_structured(
        &self,
        prompt: &StructuredPrompt,
    ) -> Result<String, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(Some("user"), &prompt.user_prompt)],
            system_instruction: prompt
                .system_instruction
                .as_deref()
                .map(|instruction| Content::text(None, instruction)),
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: prompt.response_schema.clone(),
            },
        };

        let url = self.model_url(&self.text_model, "generateContent");
        let response = self.post(&url, &request).await?;
        if !response.status().is_success() {
            return Err(GenerationError::Provider(provider_failure(response).await));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        if let Some(reason) = body.block_reason() {
            tracing::warn!(reason = %reason, "The provider withheld the answer");
            return Err(GenerationError::Moderation { reason });
        }

        match body.text() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(GenerationError::MalformedResponse(
                "the response contains no text".to_string(),
            )),
        }
    }

    #[tracing::instrument(
        name = "Requesting image",
        skip(self, prompt),
        fields(model = %self.image_model)
    )]
    async fn generate_image(&self, prompt: &ImagePrompt) -> Result<ImageDataUri, GenerationError> {
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.inner().to_string(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                output_options: OutputOptions {
                    mime_type: IMAGE_MIME_TYPE,
                },
            },
        };

        let url = self.model_url(&self.image_model, "predict");
        let response = self.post(&url, &request).await?;
        if !response.status().is_success() {
            return Err(GenerationError::ImageGeneration(
                provider_failure(response).await,
            ));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::ImageGeneration(format!("Unreadable image response: {}", e)))?;

        let prediction = body.predictions.into_iter().next().ok_or_else(|| {
            GenerationError::ImageGeneration("Image generation failed to return an image.".to_string())
        })?;

        if let Some(reason) = prediction.rai_filtered_reason {
            return Err(GenerationError::Moderation { reason });
        }

        let encoded = prediction.bytes_base64_encoded.ok_or_else(|| {
            GenerationError::ImageGeneration("Image generation failed to return an image.".to_string())
        })?;
        let mime_type = prediction
            .mime_type
            .unwrap_or_else(|| IMAGE_MIME_TYPE.to_string());

        ImageDataUri::from_base64(&mime_type, &encoded).map_err(GenerationError::ImageGeneration)
    }
}

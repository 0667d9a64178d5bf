use crate::domain::{HttpUrl, TemplateError, TemplateSource};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;

/// Fetches the skeleton from a static file host.
pub struct HttpTemplateSource {
    http_client: Client,
    url: HttpUrl,
}

impl HttpTemplateSource {
    pub fn new(url: HttpUrl, timeout: std::time::Duration) -> Result<Self, TemplateError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the HTTP client")
            .map_err(TemplateError::Unavailable)?;
        Ok(Self { http_client, url })
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateSource {
    #[tracing::instrument(name = "Fetching template", skip(self), fields(url = %self.url.inner()))]
    async fn load(&self) -> Result<String, TemplateError> {
        let body = async {
            self.http_client
                .get(self.url.inner())
                .send()
                .await?
                .error_for_status()?
                .text()
                .await
        }
        .await
        .context("Failed to fetch the template")
        .map_err(TemplateError::Unavailable)?;

        Ok(body)
    }
}

use crate::domain::{TemplateError, TemplateSource};
use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;

pub struct FileTemplateSource {
    path: PathBuf,
}

impl FileTemplateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TemplateSource for FileTemplateSource {
    #[tracing::instrument(name = "Reading template file", skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<String, TemplateError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))
            .map_err(TemplateError::Unavailable)
    }
}

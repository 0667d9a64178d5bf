use crate::assembler::Skeleton;
use crate::domain::{TemplateError, TemplateSource};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Loads and parses the skeleton once per session.
///
/// A failed load leaves the cell empty, so the next generation tries again.
#[derive(Clone)]
pub struct CachedTemplate {
    source: Arc<dyn TemplateSource>,
    skeleton: Arc<OnceCell<Skeleton>>,
}

impl CachedTemplate {
    pub fn new(source: Arc<dyn TemplateSource>) -> Self {
        Self {
            source,
            skeleton: Arc::new(OnceCell::new()),
        }
    }

    pub async fn get(&self) -> Result<&Skeleton, TemplateError> {
        self.skeleton
            .get_or_try_init(|| async {
                let raw = self.source.load().await?;
                let skeleton = Skeleton::parse(&raw)?;
                tracing::info!(tokens = skeleton.tokens().len(), "Template loaded");
                Ok(skeleton)
            })
            .await
    }
}

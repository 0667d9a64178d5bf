use crate::domain::form_data::Preferences;
use crate::utils::error_chain_fmt;
use async_trait::async_trait;

#[derive(thiserror::Error)]
pub enum PreferenceStoreError {
    #[error("Saved preferences are unreadable: {0}")]
    Corrupt(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for PreferenceStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Snapshot of the form settings, read and written only on request.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn load(&self) -> Result<Option<Preferences>, PreferenceStoreError>;

    async fn save(&self, preferences: &Preferences) -> Result<(), PreferenceStoreError>;
}

use crate::domain::{PreferenceStore, PreferenceStoreError, Preferences};
use anyhow::Context;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::PathBuf;

pub const PREFERENCES_KEY: &str = "newsletter_prefs";

/// Key-value file: a JSON object whose `newsletter_prefs` entry holds the
/// snapshot. Other keys in the file are left untouched.
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_object(&self) -> Result<Option<Map<String, Value>>, PreferenceStoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Failed to read {}", self.path.display()))
                    .into())
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(object)) => Ok(Some(object)),
            Ok(_) => Err(PreferenceStoreError::Corrupt(
                "the preference file is not a JSON object".to_string(),
            )),
            Err(e) => Err(PreferenceStoreError::Corrupt(e.to_string())),
        }
    }
}

#[async_trait]
impl PreferenceStore for JsonFilePreferenceStore {
    #[tracing::instrument(name = "Loading preferences", skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Option<Preferences>, PreferenceStoreError> {
        let Some(mut object) = self.read_object().await? else {
            return Ok(None);
        };
        match object.remove(PREFERENCES_KEY) {
            Some(snapshot) => serde_json::from_value(snapshot)
                .map(Some)
                .map_err(|e| PreferenceStoreError::Corrupt(e.to_string())),
            None => Ok(None),
        }
    }

    #[tracing::instrument(name = "Saving preferences", skip(self, preferences), fields(path = %self.path.display()))]
    async fn save(&self, preferences: &Preferences) -> Result<(), PreferenceStoreError> {
        let mut object = self.read_object().await?.unwrap_or_default();
        let snapshot =
            serde_json::to_value(preferences).context("Failed to serialize preferences")?;
        object.insert(PREFERENCES_KEY.to_string(), snapshot);

        let contents = serde_json::to_string_pretty(&Value::Object(object))
            .context("Failed to serialize preferences")?;
        tokio::fs::write(&self.path, contents)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

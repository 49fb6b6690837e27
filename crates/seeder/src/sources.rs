use std::path::PathBuf;

use serde_json::Value;
use storage::seed;

use crate::{Result, SeedKind, SeedSource, SeederError};

fn records(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(records) => Ok(records),
        _ => Err(SeederError::NotAnArray),
    }
}

/// A JSON file holding an array of records.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl SeedSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self, _kind: SeedKind) -> Result<Vec<Value>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SeederError::ReadError {
                path: self.describe(),
                source,
            })?;
        records(serde_json::from_str(&content)?)
    }
}

/// The reference data compiled into the storage crate.
pub struct BundledSource;

#[async_trait::async_trait]
impl SeedSource for BundledSource {
    fn describe(&self) -> String {
        "bundled reference data".to_string()
    }

    async fn fetch(&self, kind: SeedKind) -> Result<Vec<Value>> {
        let raw = match kind {
            SeedKind::Opportunities => seed::OPPORTUNITIES_JSON,
            SeedKind::Investors => seed::INVESTORS_JSON,
        };
        records(serde_json::from_str(raw)?)
    }
}

/// An HTTP endpoint answering with a JSON array of records.
pub struct RemoteSource {
    url: String,
    client: reqwest::Client,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("funding-journey-seeder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl SeedSource for RemoteSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self, _kind: SeedKind) -> Result<Vec<Value>> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        records(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bundled_source_returns_every_record() {
        let investors = BundledSource.fetch(SeedKind::Investors).await.unwrap();
        assert_eq!(investors.len(), 10);
    }

    #[tokio::test]
    async fn test_file_source_rejects_non_array() {
        let path = std::env::temp_dir().join("seeder-not-an-array.json");
        tokio::fs::write(&path, r#"{"id": "wbso"}"#).await.unwrap();

        let result = FileSource::new(&path).fetch(SeedKind::Opportunities).await;
        assert!(matches!(result, Err(SeederError::NotAnArray)));

        tokio::fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_missing_file_names_the_path() {
        let result = FileSource::new("/nonexistent/seed.json")
            .fetch(SeedKind::Investors)
            .await;
        let message = result.unwrap_err().to_string();
        assert!(message.contains("/nonexistent/seed.json"));
    }
}

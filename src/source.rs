//! Dataset source: local CSV file or remote URL

use crate::error::{DashboardError, Result};
use farm_dashboard_common::Dataset;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Remote(String),
    Local(PathBuf),
}

impl DataSource {
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Remote(trimmed.to_string())
        } else {
            DataSource::Local(PathBuf::from(trimmed))
        }
    }

    /// Raw CSV bytes
    pub async fn read(&self, client: &reqwest::Client) -> Result<Vec<u8>> {
        match self {
            DataSource::Remote(url) => {
                let response = client
                    .get(url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| DashboardError::Source(format!("{url}: {e}")))?;
                Ok(response.bytes().await?.to_vec())
            }
            DataSource::Local(path) => {
                if !path.exists() {
                    return Err(DashboardError::Source(format!("file not found: {}", path.display())));
                }
                Ok(tokio::fs::read(path).await?)
            }
        }
    }

    /// Read and parse the whole dataset
    pub async fn load(&self, client: &reqwest::Client) -> Result<Dataset> {
        let bytes = self.read(client).await?;
        let dataset = Dataset::from_reader(bytes.as_slice())?;
        tracing::info!(
            source = %self,
            records = dataset.records().len(),
            farms = dataset.directory().len(),
            "dataset loaded"
        );
        Ok(dataset)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Remote(url) => write!(f, "{url}"),
            DataSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        assert_eq!(
            DataSource::parse("https://example.com/data.csv"),
            DataSource::Remote("https://example.com/data.csv".into())
        );
        assert_eq!(
            DataSource::parse(" HTTP://example.com/a.csv "),
            DataSource::Remote("HTTP://example.com/a.csv".into())
        );
        assert_eq!(DataSource::parse("data/test1.csv"), DataSource::Local(PathBuf::from("data/test1.csv")));
    }

    #[tokio::test]
    async fn test_missing_local_file() {
        let source = DataSource::parse("/nonexistent/farm-data.csv");
        let client = reqwest::Client::new();
        let err = source.read(&client).await.unwrap_err();
        assert!(matches!(err, DashboardError::Source(_)));
    }
}

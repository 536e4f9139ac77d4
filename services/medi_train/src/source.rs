//! Where the training table comes from: a URL or a local file.

use medi_risk::{Dataset, RiskError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to download {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error(transparent)]
    Dataset(#[from] RiskError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Remote(String),
    Local(std::path::PathBuf),
}

impl DatasetSource {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DatasetSource::Remote(raw.to_string())
        } else {
            DatasetSource::Local(raw.into())
        }
    }

    pub async fn load(&self) -> Result<Dataset, SourceError> {
        match self {
            DatasetSource::Remote(url) => {
                log::info!("downloading dataset from {url}");
                let text = fetch(url).await.map_err(|source| SourceError::Fetch {
                    url: url.clone(),
                    source,
                })?;
                Ok(Dataset::parse(&text)?)
            }
            DatasetSource::Local(path) => {
                log::info!("reading dataset from {}", path.display());
                Ok(Dataset::from_path(path)?)
            }
        }
    }
}

async fn fetch(url: &str) -> Result<String, reqwest::Error> {
    reqwest::get(url).await?.error_for_status()?.text().await
}

use std::time::Duration;

use serde::Deserialize;

use crate::error::WallpaperError;
use crate::transport::Transport;

/// One image record from the HPImageArchive endpoint, trimmed to the fields
/// the pipeline needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageDescriptor {
    pub title: String,
    pub copyright: String,
    pub urlbase: String,
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    images: Vec<ImageDescriptor>,
}

/// Where and how to ask for the image of the day.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub host: String,
    pub market: String,
    pub timeout: Duration,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        ArchiveConfig {
            host: "https://cn.bing.com".to_string(),
            market: "zh-CN".to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

pub struct MetadataClient {
    config: ArchiveConfig,
}

impl MetadataClient {
    pub fn new(config: ArchiveConfig) -> Self {
        MetadataClient { config }
    }

    pub fn archive_url(&self) -> String {
        format!(
            "{}/HPImageArchive.aspx?format=js&idx=0&n=1&mkt={}",
            self.config.host, self.config.market
        )
    }

    /// One shot against the archive. No retry here: if the metadata lookup
    /// fails the whole run aborts, only the image transfer itself is worth
    /// retrying.
    pub fn fetch<T: Transport>(&self, transport: &T) -> Result<ImageDescriptor, WallpaperError> {
        let body = transport.fetch(&self.archive_url(), self.config.timeout)?;
        parse_descriptor(&body)
    }
}

fn parse_descriptor(body: &[u8]) -> Result<ImageDescriptor, WallpaperError> {
    let response: ArchiveResponse =
        serde_json::from_slice(body).map_err(|err| WallpaperError::Schema(err.to_string()))?;
    response
        .images
        .into_iter()
        .next()
        .ok_or_else(|| WallpaperError::Schema("archive returned no images".to_string()))
}

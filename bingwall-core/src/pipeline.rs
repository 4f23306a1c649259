use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::download::{Downloader, RetryPolicy};
use crate::error::WallpaperError;
use crate::locator;
use crate::metadata::{ArchiveConfig, MetadataClient};
use crate::resolution::Resolution;
use crate::transport::{Clock, Transport};

/// Everything the caller needs once a wallpaper has landed on disk.
#[derive(Debug, Clone)]
pub struct WallpaperResult {
    pub title: String,
    pub copyright: String,
    pub url: String,
    pub local_path: PathBuf,
    pub resolution: Resolution,
}

/// One full fetch: metadata lookup, target derivation, retried download.
/// Applying and notifying stay with the caller, so everything up to the
/// finished file runs the same under test fakes.
///
/// The metadata call is never retried: a failure there aborts the run. Only
/// the image transfer itself goes through the downloader's retry budget.
pub fn fetch_wallpaper<T: Transport, C: Clock>(
    archive: &ArchiveConfig,
    policy: RetryPolicy,
    transport: T,
    clock: C,
    resolution: Resolution,
    today: NaiveDate,
    dir: &Path,
) -> Result<WallpaperResult, WallpaperError> {
    let descriptor = MetadataClient::new(archive.clone()).fetch(&transport)?;
    locator::ensure_dir(dir)?;
    let target = locator::locate(&archive.host, &descriptor, resolution, today, dir);

    println!("Downloading wallpaper...");
    let downloader = Downloader::new(transport, clock, policy);
    let bytes = downloader.download(&target)?;
    println!("Downloaded {} bytes", bytes);

    Ok(WallpaperResult {
        title: descriptor.title,
        copyright: descriptor.copyright,
        url: target.url,
        local_path: target.local_path,
        resolution,
    })
}

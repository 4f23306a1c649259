use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use directories::UserDirs;

use crate::error::WallpaperError;
use crate::metadata::ImageDescriptor;
use crate::resolution::Resolution;

/// Where one day's image lives remotely and on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub local_path: PathBuf,
    pub resolution: Resolution,
}

pub const WALLPAPER_DIR_NAME: &str = "BingWallpapers";

/// Per-user directory the daily images land in: `~/BingWallpapers`.
pub fn wallpaper_dir() -> Option<PathBuf> {
    UserDirs::new().map(|dirs| dirs.home_dir().join(WALLPAPER_DIR_NAME))
}

/// Pure derivation: same inputs, same target. The filename buckets by
/// calendar day, so rerunning on the same date overwrites the same file
/// instead of piling up copies.
pub fn locate(
    host: &str,
    descriptor: &ImageDescriptor,
    resolution: Resolution,
    today: NaiveDate,
    dir: &Path,
) -> DownloadTarget {
    let url = format!("{}{}_{}.jpg", host, descriptor.urlbase, resolution.token());
    let filename = format!(
        "bing_wallpaper_{}_{}.jpg",
        today.format("%Y%m%d"),
        resolution.token()
    );
    DownloadTarget {
        url,
        local_path: dir.join(filename),
        resolution,
    }
}

/// Create-if-absent; an existing directory is not an error.
pub fn ensure_dir(dir: &Path) -> Result<(), WallpaperError> {
    fs::create_dir_all(dir).map_err(|source| WallpaperError::Storage {
        path: dir.to_path_buf(),
        source,
    })
}

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between parsing the resolution flag and
/// handing a finished wallpaper to the helper.
#[derive(Debug, Error)]
pub enum WallpaperError {
    /// The requested token is not one of the sizes the archive serves.
    #[error("unsupported resolution: {0}")]
    InvalidResolution(String),

    /// Transport-level failure (connect, TLS, timeout, read).
    #[error("network error: {0}")]
    Network(String),

    /// The archive answered, but not with the shape we expect.
    #[error("malformed archive response: {0}")]
    Schema(String),

    /// The server answered with a non-success status code.
    #[error("request failed with HTTP status {0}")]
    HttpStatus(u16),

    #[error("failed to write {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The download state machine ran out of attempts. Carries the reason of
    /// the last attempt only; earlier failures are discarded.
    #[error("download failed after {attempts} attempts: {last}")]
    RetryExhausted {
        attempts: u32,
        last: Box<WallpaperError>,
    },

    #[error("wallpaper helper not found: {}", .0.display())]
    HelperMissing(PathBuf),

    #[error("wallpaper helper failed: {0}")]
    HelperFailed(String),
}

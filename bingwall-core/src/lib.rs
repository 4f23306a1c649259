pub mod apply;
pub mod download;
pub mod error;
pub mod locator;
pub mod metadata;
pub mod notify;
pub mod pipeline;
pub mod resolution;
pub mod screen;
pub mod transport;

pub use apply::{VirtualDesktopApplier, WallpaperApplier};
pub use download::{Downloader, RetryPolicy};
pub use error::WallpaperError;
pub use locator::DownloadTarget;
pub use metadata::{ArchiveConfig, ImageDescriptor, MetadataClient};
pub use notify::{DesktopNotifier, Notification, Notifier};
pub use pipeline::{fetch_wallpaper, WallpaperResult};
pub use resolution::{Resolution, ScreenMetrics};
pub use transport::{Clock, HttpTransport, SystemClock, Transport};

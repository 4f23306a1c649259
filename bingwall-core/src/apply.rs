use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::WallpaperError;

/// Anything that can put a downloaded image on the desktop. The pipeline only
/// ever hands this a path to a fully written file.
pub trait WallpaperApplier {
    fn apply(&self, image: &Path) -> Result<(), WallpaperError>;
}

pub const HELPER_BINARY: &str = "VirtualDesktop11.exe";

/// Shells out to the VirtualDesktop helper, which sets the image on every
/// virtual desktop. The helper is synchronous and single-shot; its exit code
/// is the only success signal it gives us.
pub struct VirtualDesktopApplier {
    helper: PathBuf,
}

impl VirtualDesktopApplier {
    pub fn new(helper: PathBuf) -> Self {
        VirtualDesktopApplier { helper }
    }

    /// The helper ships alongside the tool, so look next to the running
    /// executable by default.
    pub fn beside_executable() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        VirtualDesktopApplier::new(exe_dir.join(HELPER_BINARY))
    }

    pub fn helper_path(&self) -> &Path {
        &self.helper
    }
}

impl WallpaperApplier for VirtualDesktopApplier {
    fn apply(&self, image: &Path) -> Result<(), WallpaperError> {
        if !self.helper.exists() {
            return Err(WallpaperError::HelperMissing(self.helper.clone()));
        }
        let output = Command::new(&self.helper)
            .arg(format!("/AllWallpapers:{}", image.display()))
            .output()
            .map_err(|err| WallpaperError::HelperFailed(err.to_string()))?;
        if !output.status.success() {
            return Err(WallpaperError::HelperFailed(format!(
                "helper exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

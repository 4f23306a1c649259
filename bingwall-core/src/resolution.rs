use std::fmt;
use std::str::FromStr;

use crate::error::WallpaperError;

/// Image sizes the archive serves, largest first. The order is load-bearing:
/// screen matching walks it top-down and takes the first tier that fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Uhd,
    R1920x1080,
    R1366x768,
    R1280x768,
    R1024x768,
    R800x600,
    R800x480,
    R640x480,
}

/// Actual size of the display we are picking an image for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMetrics {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const ALL: [Resolution; 8] = [
        Resolution::Uhd,
        Resolution::R1920x1080,
        Resolution::R1366x768,
        Resolution::R1280x768,
        Resolution::R1024x768,
        Resolution::R800x600,
        Resolution::R800x480,
        Resolution::R640x480,
    ];

    /// Canonical token, exactly as it appears in the image URL.
    pub fn token(self) -> &'static str {
        match self {
            Resolution::Uhd => "UHD",
            Resolution::R1920x1080 => "1920x1080",
            Resolution::R1366x768 => "1366x768",
            Resolution::R1280x768 => "1280x768",
            Resolution::R1024x768 => "1024x768",
            Resolution::R800x600 => "800x600",
            Resolution::R800x480 => "800x480",
            Resolution::R640x480 => "640x480",
        }
    }

    /// Minimum (width, height) a screen must reach for this tier. UHD stands
    /// for 3840x2160.
    fn threshold(self) -> (u32, u32) {
        match self {
            Resolution::Uhd => (3840, 2160),
            Resolution::R1920x1080 => (1920, 1080),
            Resolution::R1366x768 => (1366, 768),
            Resolution::R1280x768 => (1280, 768),
            Resolution::R1024x768 => (1024, 768),
            Resolution::R800x600 => (800, 600),
            Resolution::R800x480 => (800, 480),
            Resolution::R640x480 => (640, 480),
        }
    }

    /// Maps a screen to the largest tier where at least one dimension clears
    /// the bar (inclusive-or: a wide but short display still maps to a high
    /// tier). A screen smaller than every tier falls back to UHD.
    pub fn from_screen(metrics: ScreenMetrics) -> Resolution {
        for resolution in Resolution::ALL {
            let (width, height) = resolution.threshold();
            if metrics.width >= width || metrics.height >= height {
                return resolution;
            }
        }
        Resolution::Uhd
    }
}

impl FromStr for Resolution {
    type Err = WallpaperError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Resolution::ALL
            .iter()
            .find(|resolution| resolution.token() == token)
            .copied()
            .ok_or_else(|| WallpaperError::InvalidResolution(token.to_string()))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

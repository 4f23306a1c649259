use std::path::PathBuf;

use anyhow::{Context, Result};
use bingwall_core::{
    fetch_wallpaper, locator, screen, ArchiveConfig, DesktopNotifier, HttpTransport, Notification,
    Notifier, Resolution, RetryPolicy, SystemClock, VirtualDesktopApplier, WallpaperApplier,
};
use chrono::Local;
use clap::Parser;

#[derive(Parser)]
#[command(name = "bingwall")]
#[command(about = "Download the Bing image of the day and set it as wallpaper")]
#[command(version)]
struct Cli {
    /// Wallpaper resolution: UHD | 1920x1080 | 1366x768 | 1280x768 |
    /// 1024x768 | 800x600 | 800x480 | 640x480. Defaults to the closest
    /// match for the current screen.
    #[arg(short, long, value_name = "PHOTO_SIZE")]
    photosize: Option<Resolution>,

    /// Market code for the archive query.
    #[arg(short, long, default_value = "zh-CN")]
    market: String,

    /// Path to the VirtualDesktop helper executable. Defaults to
    /// VirtualDesktop11.exe next to this binary.
    #[arg(long, value_name = "PATH")]
    helper: Option<PathBuf>,
}

fn pick_resolution(requested: Option<Resolution>) -> Resolution {
    if let Some(resolution) = requested {
        println!("Using requested resolution: {}", resolution);
        return resolution;
    }
    match screen::detect() {
        Some(metrics) => {
            let matched = Resolution::from_screen(metrics);
            println!("Screen resolution: {}x{}", metrics.width, metrics.height);
            println!("Matched image resolution: {}", matched);
            matched
        }
        None => {
            eprintln!(
                "Could not detect screen size, falling back to {}",
                Resolution::Uhd
            );
            Resolution::Uhd
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let resolution = pick_resolution(cli.photosize);
    let archive = ArchiveConfig {
        market: cli.market,
        ..ArchiveConfig::default()
    };
    let dir = locator::wallpaper_dir().context("failed to resolve the home directory")?;

    let result = fetch_wallpaper(
        &archive,
        RetryPolicy::default(),
        HttpTransport,
        SystemClock,
        resolution,
        Local::now().date_naive(),
        &dir,
    )?;

    println!("Title: {}", result.title);
    println!("Copyright: {}", result.copyright);
    println!("Url: {}", result.url);
    println!("Saved to: {}", result.local_path.display());
    println!("Resolution: {}", result.resolution);

    let applier = match cli.helper {
        Some(path) => VirtualDesktopApplier::new(path),
        None => VirtualDesktopApplier::beside_executable(),
    };
    applier.apply(&result.local_path)?;
    println!("Wallpaper applied.");

    // Best effort only; a lost toast must not fail the run.
    let note = Notification {
        title: &result.title,
        icon: &result.local_path,
        message: &result.copyright,
        url: &result.url,
    };
    if let Err(err) = DesktopNotifier.notify(&note) {
        eprintln!("Notification failed: {}", err);
    }

    Ok(())
}

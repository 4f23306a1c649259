use crate::resolution::ScreenMetrics;

/// Asks the OS for the primary display size. `None` when it cannot be
/// determined (headless session, missing tools); callers fall back to the
/// largest resolution tier.
pub fn detect() -> Option<ScreenMetrics> {
    probe()
}

#[cfg(target_os = "windows")]
fn probe() -> Option<ScreenMetrics> {
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        GetSystemMetrics, SetProcessDPIAware, SM_CXSCREEN, SM_CYSCREEN,
    };

    // Without DPI awareness a scaled desktop reports the virtualized size and
    // a 4K screen can come back as 1920x1080.
    let (width, height) = unsafe {
        SetProcessDPIAware();
        (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN))
    };
    if width <= 0 || height <= 0 {
        return None;
    }
    Some(ScreenMetrics {
        width: width as u32,
        height: height as u32,
    })
}

#[cfg(not(target_os = "windows"))]
fn probe() -> Option<ScreenMetrics> {
    let output = std::process::Command::new("xrandr")
        .arg("--current")
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    parse_xrandr(&String::from_utf8_lossy(&output.stdout))
}

/// Pulls the active screen size out of `xrandr --current` output, e.g.
/// `Screen 0: minimum 320 x 200, current 2560 x 1440, maximum 16384 x 16384`.
#[cfg_attr(target_os = "windows", allow(dead_code))]
fn parse_xrandr(output: &str) -> Option<ScreenMetrics> {
    let re = regex::Regex::new(r"current (\d+) x (\d+)").unwrap();
    let captures = re.captures(output)?;
    Some(ScreenMetrics {
        width: captures[1].parse().ok()?,
        height: captures[2].parse().ok()?,
    })
}

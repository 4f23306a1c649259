use std::time::Duration;

use crate::error::WallpaperError;

/// Fetches one URL's bytes. The only seam the network crosses; tests swap in
/// scripted stubs.
pub trait Transport {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, WallpaperError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, WallpaperError> {
        (**self).fetch(url, timeout)
    }
}

/// Real transport on top of attohttpc. A non-success status is surfaced as
/// `HttpStatus` rather than read through, so callers never mistake an error
/// page for image bytes.
pub struct HttpTransport;

impl Transport for HttpTransport {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, WallpaperError> {
        let response = attohttpc::get(url)
            .timeout(timeout)
            .send()
            .map_err(|err| WallpaperError::Network(err.to_string()))?;
        if !response.is_success() {
            return Err(WallpaperError::HttpStatus(response.status().as_u16()));
        }
        response
            .bytes()
            .map_err(|err| WallpaperError::Network(err.to_string()))
    }
}

/// Seam for the backoff sleeps, so tests can record delays instead of
/// actually waiting.
pub trait Clock {
    fn sleep(&self, duration: Duration);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

use std::fs;
use std::time::Duration;

use crate::error::WallpaperError;
use crate::locator::DownloadTarget;
use crate::transport::{Clock, Transport};

/// Fixed retry policy for the image transfer. Injected rather than read from
/// module constants so tests can instantiate their own.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Backoff before attempt n+1 is `backoff_step * n`.
    pub backoff_step: Duration,
    /// Bounds each attempt independently of the overall retry budget.
    pub request_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            backoff_step: Duration::from_secs(2),
            request_timeout: Duration::from_secs(20),
        }
    }
}

/// Where the download stands between transitions.
///
/// `Idle -> Attempting -> { Succeeded | WaitingToRetry -> Attempting | Exhausted }`
///
/// `attempt` is 1-based. `WaitingToRetry` keeps only the most recent failure;
/// on exhaustion that last reason is the one surfaced.
#[derive(Debug)]
enum State {
    Idle,
    Attempting { attempt: u32 },
    WaitingToRetry { attempt: u32, reason: WallpaperError },
    Succeeded { bytes: u64 },
    Exhausted { attempts: u32, reason: WallpaperError },
}

pub struct Downloader<T, C> {
    transport: T,
    clock: C,
    policy: RetryPolicy,
}

impl<T: Transport, C: Clock> Downloader<T, C> {
    pub fn new(transport: T, clock: C, policy: RetryPolicy) -> Self {
        Downloader {
            transport,
            clock,
            policy,
        }
    }

    /// Drives the state machine until the image lands on disk or the attempt
    /// budget is spent. Every attempt re-fetches from byte zero; a successful
    /// attempt is exactly one full overwrite of the target path.
    pub fn download(&self, target: &DownloadTarget) -> Result<u64, WallpaperError> {
        let mut state = State::Idle;
        loop {
            state = match state {
                State::Idle => State::Attempting { attempt: 1 },
                State::Attempting { attempt } => match self.attempt(target) {
                    Ok(bytes) => State::Succeeded { bytes },
                    Err(reason) if attempt >= self.policy.max_attempts => State::Exhausted {
                        attempts: attempt,
                        reason,
                    },
                    Err(reason) => State::WaitingToRetry { attempt, reason },
                },
                State::WaitingToRetry { attempt, reason } => {
                    let delay = self.policy.backoff_step * attempt;
                    eprintln!(
                        "Download attempt {} failed ({}), retrying in {}s...",
                        attempt,
                        reason,
                        delay.as_secs()
                    );
                    self.clock.sleep(delay);
                    State::Attempting {
                        attempt: attempt + 1,
                    }
                }
                State::Succeeded { bytes } => return Ok(bytes),
                State::Exhausted { attempts, reason } => {
                    return Err(WallpaperError::RetryExhausted {
                        attempts,
                        last: Box::new(reason),
                    })
                }
            };
        }
    }

    fn attempt(&self, target: &DownloadTarget) -> Result<u64, WallpaperError> {
        let bytes = self
            .transport
            .fetch(&target.url, self.policy.request_timeout)?;
        fs::write(&target.local_path, &bytes).map_err(|source| WallpaperError::Storage {
            path: target.local_path.clone(),
            source,
        })?;
        Ok(bytes.len() as u64)
    }
}

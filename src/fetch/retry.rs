// src/fetch/retry.rs

use anyhow::Result;
use std::{thread, time::Duration};
use tracing::{error, warn};

use crate::error::ExportError;

/// Fixed-delay retry: run an operation up to `max_attempts` times, sleeping
/// `delay` between failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Run `op` until it succeeds or the attempts are used up. The last
    /// error is returned with an `ExportError::Network` context naming `url`.
    pub fn run<T, F>(&self, url: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Result<T>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op() {
                Ok(v) => return Ok(v),
                Err(e) if attempt < max_attempts => {
                    warn!(%url, attempt, delay_ms = self.delay.as_millis() as u64, error = %e, "retrying");
                    thread::sleep(self.delay);
                }
                Err(e) => {
                    error!(%url, attempts = attempt, error = %e, "exhausted retries");
                    return Err(e.context(ExportError::Network {
                        url: url.to_string(),
                        attempts: attempt,
                    }));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn instant(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO)
    }

    #[test]
    fn succeeds_after_transient_failures() {
        let mut calls = 0;
        let out = instant(3).run("http://test", || {
            calls += 1;
            if calls < 3 {
                Err(anyhow!("connection reset"))
            } else {
                Ok(calls)
            }
        });
        assert_eq!(out.unwrap(), 3);
        assert_eq!(calls, 3);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let mut calls = 0;
        let err = instant(3)
            .run("http://test", || -> Result<()> {
                calls += 1;
                Err(anyhow!("timed out"))
            })
            .unwrap_err();
        assert_eq!(calls, 3);
        match err.downcast_ref::<ExportError>() {
            Some(ExportError::Network { url, attempts }) => {
                assert_eq!(url, "http://test");
                assert_eq!(*attempts, 3);
            }
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[test]
    fn first_success_is_not_retried() {
        let mut calls = 0;
        instant(5)
            .run("http://test", || {
                calls += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(calls, 1);
    }

    #[test]
    fn zero_attempts_still_runs_once() {
        let mut calls = 0;
        let _ = instant(0).run("http://test", || -> Result<()> {
            calls += 1;
            Err(anyhow!("boom"))
        });
        assert_eq!(calls, 1);
    }
}

//! Supervision for the MJPEG preview stream.
//!
//! The `<img>` element either renders the stream or fires an error event;
//! it cannot be asked to retry in place. The supervisor decides whether a
//! failed load should be retried and hands out a fresh URL each attempt so
//! the browser cache cannot satisfy the reload with the dead response.

use crate::constants::{endpoints, stream};

/// How failed stream loads are retried. The default retries forever at a
/// fixed delay; a bounded variant exists for tests and for embedding the
/// viewer where giving up is preferable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay_ms: u32,
    pub max_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay_ms: stream::RETRY_DELAY_MS,
            max_retries: None,
        }
    }
}

impl RetryPolicy {
    pub fn bounded(delay_ms: u32, max_retries: u32) -> Self {
        Self {
            delay_ms,
            max_retries: Some(max_retries),
        }
    }
}

/// What to do about a failed load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Retry { delay_ms: u32 },
    GiveUp,
}

#[derive(Clone, Debug)]
pub struct StreamSupervisor {
    policy: RetryPolicy,
    seq: u64,
    failures: u32,
}

impl Default for StreamSupervisor {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl StreamSupervisor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            seq: 0,
            failures: 0,
        }
    }

    /// URL for the current attempt. The sequence number defeats caching;
    /// it only ever moves forward.
    pub fn url(&self) -> String {
        format!("{}?seq={}", endpoints::STREAM_URL, self.seq)
    }

    /// Consecutive failures since the stream last rendered.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// The stream rendered a frame; the failure streak is over.
    pub fn on_loaded(&mut self) {
        self.failures = 0;
    }

    /// The current attempt failed. Advances to the next URL and reports
    /// whether to schedule another attempt.
    pub fn on_error(&mut self) -> Verdict {
        self.failures += 1;
        self.seq += 1;
        match self.policy.max_retries {
            Some(max) if self.failures > max => Verdict::GiveUp,
            _ => Verdict::Retry {
                delay_ms: self.policy.delay_ms,
            },
        }
    }

    /// Begin a fresh viewing session, e.g. after the preview was stopped
    /// and started again. Forces a new URL so a cached dead response is
    /// not replayed.
    pub fn restart(&mut self) {
        self.failures = 0;
        self.seq += 1;
    }
}

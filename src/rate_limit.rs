use std::net::IpAddr;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::feedback::SubmissionForm;

/// Per-IP submission limiter using a fixed window.
pub struct SubmissionRateLimiter {
    /// ip -> (count, window_start)
    entries: DashMap<IpAddr, (u32, Instant)>,
    limit: u32,
    window: Duration,
}

impl SubmissionRateLimiter {
    pub fn new(limit: u32, window_secs: u64) -> Self {
        Self {
            entries: DashMap::new(),
            limit,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Record an attempt. Returns Err with retry-after seconds when over the limit.
    pub fn check(&self, ip: IpAddr) -> Result<(), u64> {
        self.check_at(ip, Instant::now())
    }

    /// Like `check`, but a form that fails validation never reaches the store
    /// and doesn't count against the quota.
    pub fn check_submission(&self, ip: IpAddr, form: &SubmissionForm) -> Result<(), u64> {
        if form.validate().is_err() {
            return Ok(());
        }
        self.check(ip)
    }

    pub fn check_at(&self, ip: IpAddr, now: Instant) -> Result<(), u64> {
        if self.limit == 0 {
            return Ok(());
        }

        let mut entry = self.entries.entry(ip).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.saturating_duration_since(*start) >= self.window {
            *count = 1;
            *start = now;
            return Ok(());
        }

        if *count >= self.limit {
            let elapsed = now.saturating_duration_since(*start).as_secs();
            return Err(self.window.as_secs().saturating_sub(elapsed).max(1));
        }

        *count += 1;
        Ok(())
    }

    /// Remove entries whose window has closed.
    pub fn cleanup(&self) {
        let now = Instant::now();
        let window = self.window;
        self.entries
            .retain(|_, (_, start)| now.saturating_duration_since(*start) < window);
    }
}

//! Pacing between link checks
//!
//! The audit loop calls [`RateLimiter::pace`] after every link check. The
//! limiter decides how long to hold the loop; swapping the implementation
//! changes the throttling strategy without touching the loop.

use crate::config::CrawlPolicy;
use async_trait::async_trait;
use std::time::Duration;

/// Self-imposed throttle applied between link checks
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Waits as long as the strategy requires before the next request
    async fn pace(&self);
}

/// Sleeps a fixed amount after every check
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn pace(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl RateLimiter for NoDelay {
    async fn pace(&self) {}
}

/// Builds the limiter described by a crawl policy
pub fn limiter_for(policy: &CrawlPolicy) -> Box<dyn RateLimiter> {
    if policy.delay_enabled && !policy.delay.is_zero() {
        Box::new(FixedDelay::new(policy.delay))
    } else {
        Box::new(NoDelay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_fixed_delay_waits() {
        let limiter = FixedDelay::new(Duration::from_millis(50));
        let start = Instant::now();
        limiter.pace().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_no_delay_returns_immediately() {
        let start = Instant::now();
        NoDelay.pace().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_limiter_for_slow_mode() {
        let limiter = limiter_for(&CrawlPolicy::default());
        let start = Instant::now();
        limiter.pace().await;
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_limiter_for_disabled_policy() {
        let limiter = limiter_for(&CrawlPolicy::no_delay());
        let start = Instant::now();
        limiter.pace().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_zero_delay_treated_as_disabled() {
        let policy = CrawlPolicy {
            delay_enabled: true,
            delay: Duration::ZERO,
        };
        let start = Instant::now();
        limiter_for(&policy).pace().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}

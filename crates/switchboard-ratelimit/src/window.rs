use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::error::RateLimitError;

/// Sliding-window admission counter
///
/// Keeps the timestamps of admitted requests, oldest first. Each check
/// evicts entries older than the window, then admits only if fewer than
/// `max_requests` remain. Eviction, the count, and the append happen under
/// one lock, so two racing callers cannot both take the last slot.
#[derive(Debug)]
pub struct SlidingWindow {
    max_requests: usize,
    window: Duration,
    admitted: Mutex<VecDeque<Instant>>,
}

impl SlidingWindow {
    /// Create a window admitting `max_requests` per `window`
    pub fn new(max_requests: u32, window: Duration) -> Result<Self, RateLimitError> {
        if max_requests == 0 {
            return Err(RateLimitError::Config("max_requests must be > 0".to_owned()));
        }
        if window.is_zero() {
            return Err(RateLimitError::Config("rate limit window must be > 0".to_owned()));
        }

        let max_requests = max_requests as usize;

        Ok(Self {
            max_requests,
            window,
            admitted: Mutex::new(VecDeque::with_capacity(max_requests)),
        })
    }

    /// Admit one request or report how long until a slot frees up
    pub fn check(&self) -> Result<(), RateLimitError> {
        let now = Instant::now();
        let mut admitted = self.admitted.lock().unwrap_or_else(PoisonError::into_inner);

        self.evict(&mut admitted, now);

        if admitted.len() >= self.max_requests {
            let wait = admitted
                .front()
                .map_or(self.window, |oldest| (*oldest + self.window).saturating_duration_since(now));
            return Err(RateLimitError::Exceeded {
                retry_after: whole_seconds(wait),
            });
        }

        admitted.push_back(now);
        Ok(())
    }

    /// Requests currently counted against the window
    pub fn admitted(&self) -> usize {
        let now = Instant::now();
        let mut admitted = self.admitted.lock().unwrap_or_else(PoisonError::into_inner);
        self.evict(&mut admitted, now);
        admitted.len()
    }

    pub const fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Drop entries strictly older than the window
    fn evict(&self, admitted: &mut VecDeque<Instant>, now: Instant) {
        while admitted
            .front()
            .is_some_and(|oldest| now.saturating_duration_since(*oldest) > self.window)
        {
            admitted.pop_front();
        }
    }
}

/// Round up to whole seconds, never below one
fn whole_seconds(duration: Duration) -> u64 {
    let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    secs.max(1)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn admits_up_to_threshold_then_rejects() {
        let window = SlidingWindow::new(10, Duration::from_secs(60)).unwrap();

        for i in 0..10 {
            assert!(window.check().is_ok(), "request {i} should be admitted");
            tokio::time::advance(Duration::from_secs(1)).await;
        }

        assert!(matches!(window.check(), Err(RateLimitError::Exceeded { .. })));
        assert_eq!(window.admitted(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn readmits_after_window_passes_first_entry() {
        let window = SlidingWindow::new(10, Duration::from_secs(60)).unwrap();

        for _ in 0..10 {
            window.check().unwrap();
        }
        assert!(window.check().is_err());

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(window.check().is_ok());
        assert_eq!(window.admitted(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn entry_exactly_window_old_still_counts() {
        let window = SlidingWindow::new(1, Duration::from_secs(60)).unwrap();
        window.check().unwrap();

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(window.check().is_err());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(window.check().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn rejection_does_not_consume_a_slot() {
        let window = SlidingWindow::new(2, Duration::from_secs(10)).unwrap();
        window.check().unwrap();
        window.check().unwrap();

        for _ in 0..5 {
            assert!(window.check().is_err());
        }
        assert_eq!(window.admitted(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_after_counts_down_to_oldest_expiry() {
        let window = SlidingWindow::new(2, Duration::from_secs(60)).unwrap();
        window.check().unwrap();
        tokio::time::advance(Duration::from_secs(20)).await;
        window.check().unwrap();
        tokio::time::advance(Duration::from_millis(15_500)).await;

        // Oldest entry is 35.5s old and leaves the window in 24.5s
        assert_eq!(window.check(), Err(RateLimitError::Exceeded { retry_after: 25 }));
    }

    #[tokio::test(start_paused = true)]
    async fn partial_expiry_frees_only_expired_slots() {
        let window = SlidingWindow::new(3, Duration::from_secs(30)).unwrap();
        window.check().unwrap();
        tokio::time::advance(Duration::from_secs(20)).await;
        window.check().unwrap();
        window.check().unwrap();

        tokio::time::advance(Duration::from_secs(11)).await;
        assert!(window.check().is_ok());
        assert!(window.check().is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_checks_never_overshoot() {
        let window = Arc::new(SlidingWindow::new(10, Duration::from_secs(3600)).unwrap());

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let window = Arc::clone(&window);
                tokio::spawn(async move { window.check().is_ok() })
            })
            .collect();

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 10);
        assert_eq!(window.admitted(), 10);
    }

    #[test]
    fn rejects_degenerate_configuration() {
        assert!(matches!(
            SlidingWindow::new(0, Duration::from_secs(1)),
            Err(RateLimitError::Config(_))
        ));
        assert!(matches!(
            SlidingWindow::new(1, Duration::ZERO),
            Err(RateLimitError::Config(_))
        ));
    }
}

use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;
use tracing::trace;

/// Blocking client-side throttle so a single process stays under the key quota.
pub struct Throttle {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
}

impl Throttle {
    pub fn per_second(requests: NonZeroU32) -> Self {
        Throttle {
            limiter: RateLimiter::direct(Quota::per_second(requests)),
            clock: DefaultClock::default(),
        }
    }

    /// Blocks the calling thread until the next request may go out.
    pub fn wait(&self) {
        while let Err(not_until) = self.limiter.check() {
            let pause = not_until.wait_time_from(self.clock.now());
            trace!(?pause, "throttled");
            thread::sleep(pause);
        }
    }
}

/// What to do with a "too many requests" answer: sleep once, retry once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retry_after: Duration,
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub const TOO_MANY_REQUESTS: u16 = 429;

    pub fn fixed(retry_after: Duration) -> Self {
        RetryPolicy {
            retry_after,
            max_attempts: 2,
        }
    }

    pub fn should_retry(&self, status: u16, attempt: u32) -> bool {
        status == Self::TOO_MANY_REQUESTS && attempt < self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn retries_only_the_first_429() {
        let policy = RetryPolicy::fixed(Duration::ZERO);

        assert!(policy.should_retry(429, 1));
        assert!(!policy.should_retry(429, 2));
        assert!(!policy.should_retry(500, 1));
        assert!(!policy.should_retry(200, 1));
    }

    #[test]
    fn throttle_lets_a_burst_through() {
        let throttle = Throttle::per_second(NonZeroU32::new(50).unwrap());
        let started = Instant::now();

        for _ in 0..10 {
            throttle.wait();
        }

        assert!(started.elapsed() < Duration::from_secs(1));
    }
}

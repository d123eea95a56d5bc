use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Millisecond clock behind the session runner and the response race.
///
/// Injected so races and inter-trial sleeps are testable without real
/// timers.
pub trait Clock: Clone + Send + Sync {
    /// Monotonic milliseconds since some fixed origin.
    fn now_ms(&self) -> u64;
    /// Wall-clock epoch milliseconds, used to timestamp records.
    fn epoch_ms(&self) -> i64;
    fn sleep(&self, d: Duration);

    fn elapsed_ms(&self, since_ms: u64) -> u64 {
        self.now_ms().saturating_sub(since_ms)
    }
}

/// Wall-clock implementation over `Instant`.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn epoch_ms(&self) -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }

    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Manually advanced clock for tests and headless simulation.
///
/// `sleep` advances virtual time instead of blocking, so a scripted
/// session runs instantly while reaction times stay exact. Clones share
/// the same timeline.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Arc<AtomicU64>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for VirtualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }

    // Virtual time doubles as the epoch, keeping record timestamps
    // deterministic in tests.
    fn epoch_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst) as i64
    }

    fn sleep(&self, d: Duration) {
        self.advance(d.as_millis() as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_clock_clones_share_time() {
        let clock = VirtualClock::new();
        let other = clock.clone();
        clock.advance(120);
        assert_eq!(other.now_ms(), 120);
        other.sleep(Duration::from_millis(30));
        assert_eq!(clock.now_ms(), 150);
        assert_eq!(clock.elapsed_ms(100), 50);
    }

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}

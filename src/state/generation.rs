use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_generation_is_current() {
        let tracker = RequestTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();

        assert!(second > first);
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(!tracker.is_current(0));
    }
}

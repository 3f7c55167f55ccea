//! Single-slot debounce timer
//!
//! Time is passed in explicitly; the host decides how to wait for
//! [`Debouncer::deadline`] (e.g. `tokio::time::sleep_until`).

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending {
    text: String,
    deadline: Instant,
}

/// Holds at most one pending value, rescheduled on every input
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Pending>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending value and schedule `text` for `now + delay`
    pub fn schedule(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            text: text.into(),
            deadline: now + self.delay,
        });
    }

    /// When the pending value becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if it is due at `now`
    pub fn fire(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.text),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn test_fires_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.schedule("Posadas", start);

        assert_eq!(debouncer.fire(start + Duration::from_millis(499)), None);
        assert_eq!(
            debouncer.fire(start + DELAY).as_deref(),
            Some("Posadas")
        );
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.fire(start + DELAY * 2), None);
    }

    #[test]
    fn test_reschedule_replaces_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.schedule("Pos", start);
        debouncer.schedule("Posa", start + Duration::from_millis(300));

        // The first deadline has passed but was superseded
        assert_eq!(debouncer.fire(start + Duration::from_millis(600)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(800))
        );
        assert_eq!(
            debouncer.fire(start + Duration::from_millis(800)).as_deref(),
            Some("Posa")
        );
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.schedule("Posadas", start);

        debouncer.cancel();

        assert!(debouncer.deadline().is_none());
        assert_eq!(debouncer.fire(start + DELAY), None);
    }
}

use std::time::{Duration, Instant};

/// Collapses a burst of submissions into one delivery, `delay` after the last submission.
///
/// Time is passed in by the caller so the owner decides which thread and which clock drive it.
#[derive(Debug)]
pub(crate) struct Debounce<T> {
    delay: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T> Debounce<T> {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            deadline: None,
        }
    }

    /// Replaces any pending value and pushes the deadline out.
    pub(crate) fn submit(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.deadline = Some(now + self.delay);
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub(crate) fn take_due(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }
}

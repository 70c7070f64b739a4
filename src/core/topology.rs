use std::time::{Duration, Instant};

use super::debounce::Debounce;

/// A display reconfiguration notification, as delivered by the window server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayChange {
    pub display: u32,
    /// Set on the notification sent before a reconfiguration starts. The topology is in flux
    /// at that point and not worth looking at.
    pub begin: bool,
}

/// Turns bursts of display notifications into single re-evaluations of the bar position.
#[derive(Debug)]
pub struct TopologyWatcher {
    debounce: Debounce<DisplayChange>,
}

impl TopologyWatcher {
    pub fn new(delay: Duration) -> Self {
        Self {
            debounce: Debounce::new(delay),
        }
    }

    /// Returns whether the change (re)armed the re-evaluation.
    pub fn notify(&mut self, change: DisplayChange, now: Instant) -> bool {
        if change.begin {
            tracing::trace!(display = change.display, "Ignoring begin of display change");
            return false;
        }
        tracing::debug!(display = change.display, "Display configuration changed");
        self.debounce.submit(change, now);
        true
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// The last change of a settled burst, once the debounce delay has passed.
    pub fn take_settled(&mut self, now: Instant) -> Option<DisplayChange> {
        self.debounce.take_due(now)
    }
}

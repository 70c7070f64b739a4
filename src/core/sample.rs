use regex::Regex;

use super::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    BuiltIn,
    External,
}

/// Everything the edge machine looks at in one tick, in the Quartz (top-left origin) frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub pointer: Point,
    /// Y coordinate of the top edge of the usable area of the main screen.
    pub top_edge: f64,
    pub override_held: bool,
    pub overlay_open: bool,
    /// The pointer sits on the main display and `top_edge` came from it. The bouncer only warps
    /// a pointer it can place in the same frame.
    pub on_main_display: bool,
}

impl Sample {
    /// Used when the screen can't be resolved. Pins the distance to zero so the tick still runs,
    /// but the pointer's frame is unknown so it is never bounced.
    pub fn fallback(pointer: Point) -> Self {
        Self {
            pointer,
            top_edge: pointer.y,
            override_held: false,
            overlay_open: false,
            on_main_display: false,
        }
    }

    /// The pointer is on another display. Above the main display's top edge the distance clamps
    /// to zero, anywhere else it is as far from the bar's edge as it gets. Never bounced.
    pub fn elsewhere(
        pointer: Point,
        main_top: f64,
        override_held: bool,
        overlay_open: bool,
    ) -> Self {
        let top_edge = if pointer.y < main_top {
            main_top
        } else {
            f64::NEG_INFINITY
        };
        Self {
            pointer,
            top_edge,
            override_held,
            overlay_open,
            on_main_display: false,
        }
    }

    pub fn distance_from_top(&self) -> f64 {
        (self.pointer.y - self.top_edge).max(0.0)
    }
}

/// An on-screen window as reported by the window server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub owner: String,
    pub layer: i64,
}

/// Best effort detection of open menus and popovers from the window stacking levels.
#[derive(Debug, Clone)]
pub struct OverlayFilter {
    popup_level: i64,
    exclusions: Vec<Regex>,
}

impl OverlayFilter {
    pub fn new(popup_level: i64, exclusions: Vec<Regex>) -> Self {
        Self {
            popup_level,
            exclusions,
        }
    }

    pub fn is_excluded(&self, owner: &str) -> bool {
        self.exclusions.iter().any(|re| re.is_match(owner))
    }

    pub fn is_overlay_open<'a>(&self, windows: impl IntoIterator<Item = &'a WindowInfo>) -> bool {
        windows
            .into_iter()
            .find(|w| w.layer >= self.popup_level && !self.is_excluded(&w.owner))
            .inspect(|w| tracing::trace!(owner = %w.owner, layer = w.layer, "Overlay open"))
            .is_some()
    }
}

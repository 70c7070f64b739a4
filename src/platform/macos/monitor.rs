use objc2_core_foundation::{CGPoint, CGRect};
use objc2_core_graphics::{CGDirectDisplayID, CGDisplayBounds, CGDisplayIsBuiltin, CGMainDisplayID};

use crate::core::{DisplayKind, Point};

// kCGNullDirectDisplay
const NULL_DISPLAY: CGDirectDisplayID = 0;

/// The display carrying the menu bar. Its top-left corner is the origin of the Quartz frame and
/// its height is the pivot for Cocoa coordinates.
#[derive(Clone, Copy)]
pub(super) struct MainDisplay {
    pub(super) display_id: CGDirectDisplayID,
    pub(super) bounds: CGRect,
}

impl std::fmt::Display for MainDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "display {} ({}x{} at {},{})",
            self.display_id,
            self.bounds.size.width,
            self.bounds.size.height,
            self.bounds.origin.x,
            self.bounds.origin.y
        )
    }
}

impl MainDisplay {
    pub(super) fn current() -> Option<Self> {
        let display_id = CGMainDisplayID();
        if display_id == NULL_DISPLAY {
            return None;
        }
        let bounds = CGDisplayBounds(display_id);
        if bounds.size.height <= 0.0 {
            return None;
        }
        Some(Self { display_id, bounds })
    }

    pub(super) fn kind(&self) -> DisplayKind {
        if CGDisplayIsBuiltin(self.display_id) {
            DisplayKind::BuiltIn
        } else {
            DisplayKind::External
        }
    }

    pub(super) fn height(&self) -> f64 {
        self.bounds.size.height
    }

    pub(super) fn top(&self) -> f64 {
        self.bounds.origin.y
    }

    pub(super) fn contains(&self, point: Point) -> bool {
        let CGRect { origin, size } = self.bounds;
        point.x >= origin.x
            && point.x < origin.x + size.width
            && point.y >= origin.y
            && point.y < origin.y + size.height
    }
}

pub(super) fn to_cg_point(point: Point) -> CGPoint {
    CGPoint::new(point.x, point.y)
}

use objc2_app_kit::NSEvent;
use objc2_core_graphics::{
    CGAssociateMouseAndMouseCursorPosition, CGError, CGWarpMouseCursorPosition,
};

use super::monitor::{MainDisplay, to_cg_point};
use super::objc2_wrapper::{held_modifiers, on_screen_windows};
use crate::config::Modifiers;
use crate::core::{
    DisplayKind, OverlayFilter, Point, PointerWarp, Sample, Sampler, cocoa_to_quartz,
};

/// Samples through CoreGraphics and `NSEvent`, both of which are usable off the main thread.
pub(super) struct MacSampler {
    overlay_filter: OverlayFilter,
    override_modifier: Modifiers,
}

impl MacSampler {
    pub(super) fn new(overlay_filter: OverlayFilter, override_modifier: Modifiers) -> Self {
        Self {
            overlay_filter,
            override_modifier,
        }
    }
}

impl Sampler for MacSampler {
    fn sample(&mut self) -> Sample {
        let cocoa = NSEvent::mouseLocation();
        let Some(main) = MainDisplay::current() else {
            tracing::trace!("No main display, using fallback sample");
            return Sample::fallback(Point::new(cocoa.x, cocoa.y));
        };
        let pointer = cocoa_to_quartz(Point::new(cocoa.x, cocoa.y), main.height());
        let override_held = held_modifiers().intersects(self.override_modifier);
        let overlay_open = self.overlay_filter.is_overlay_open(&on_screen_windows());

        if !main.contains(pointer) {
            return Sample::elsewhere(pointer, main.top(), override_held, overlay_open);
        }
        Sample {
            pointer,
            top_edge: main.top(),
            override_held,
            overlay_open,
            on_main_display: true,
        }
    }

    fn primary_display(&mut self) -> DisplayKind {
        match MainDisplay::current() {
            Some(main) => {
                let kind = main.kind();
                tracing::debug!(%main, ?kind, "Primary display");
                kind
            }
            None => DisplayKind::BuiltIn,
        }
    }
}

pub(super) struct MacWarp;

impl PointerWarp for MacWarp {
    fn warp(&mut self, target: Point) {
        let err = CGWarpMouseCursorPosition(to_cg_point(target));
        if err != CGError::Success {
            tracing::debug!(%target, code = err.0, "Pointer warp failed");
            return;
        }
        // Without re-associating, mouse movement is swallowed for a short while after a warp.
        let _ = CGAssociateMouseAndMouseCursorPosition(true);
    }
}

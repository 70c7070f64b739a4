use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Result, anyhow, bail};

use super::geometry::Point;
use super::sample::{DisplayKind, Sample};

/// Pixel distances from the top edge driving the edge machine.
///
/// `hide < show` leaves a dead zone in between where neither transition fires, which is what
/// keeps pointer jitter from flickering the bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    hide: f64,
    show: f64,
    bouncer: f64,
    bounce_target: f64,
}

impl Thresholds {
    pub fn new(hide: f64, show: f64, bouncer: f64, bounce_target: f64) -> Result<Self> {
        for (name, value) in [
            ("hide_threshold", hide),
            ("show_threshold", show),
            ("bouncer_threshold", bouncer),
            ("bounce_target_offset", bounce_target),
        ] {
            if !value.is_finite() || value < 0.0 {
                bail!("{name} must be a non-negative number, got {value}");
            }
        }
        if hide >= show {
            bail!("hide_threshold ({hide}) must be strictly less than show_threshold ({show})");
        }
        // A pointer dropped at or inside the bouncer zone would be bounced again on the next
        // tick, forever.
        if bounce_target <= bouncer {
            bail!(
                "bounce_target_offset ({bounce_target}) must be greater than bouncer_threshold ({bouncer})"
            );
        }
        if bouncer > hide {
            tracing::debug!(
                bouncer,
                hide,
                "Bouncer zone covers the hide zone, hiding requires the override modifier"
            );
        }
        Ok(Self {
            hide,
            show,
            bouncer,
            bounce_target,
        })
    }

    pub fn hide(&self) -> f64 {
        self.hide
    }

    pub fn show(&self) -> f64 {
        self.show
    }

    pub fn bouncer(&self) -> f64 {
        self.bouncer
    }

    pub fn bounce_target(&self) -> f64 {
        self.bounce_target
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarPosition {
    Top,
    Bottom,
}

impl BarPosition {
    pub fn for_primary(display: DisplayKind) -> Self {
        match display {
            DisplayKind::BuiltIn => BarPosition::Top,
            DisplayKind::External => BarPosition::Bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarState {
    pub hidden: bool,
    pub position: BarPosition,
}

impl Default for BarState {
    fn default() -> Self {
        Self {
            hidden: false,
            position: BarPosition::Top,
        }
    }
}

/// Named events understood by the bar process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarEvent {
    CursorAtTop,
    CursorAwayFromTop,
    DisplayExternalPrimary,
    DisplayBuiltinPrimary,
}

impl BarEvent {
    pub const ALL: [BarEvent; 4] = [
        BarEvent::CursorAtTop,
        BarEvent::CursorAwayFromTop,
        BarEvent::DisplayExternalPrimary,
        BarEvent::DisplayBuiltinPrimary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BarEvent::CursorAtTop => "cursor_at_top",
            BarEvent::CursorAwayFromTop => "cursor_away_from_top",
            BarEvent::DisplayExternalPrimary => "display_external_primary",
            BarEvent::DisplayBuiltinPrimary => "display_builtin_primary",
        }
    }
}

impl Display for BarEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BarEvent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        BarEvent::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| anyhow!("Unknown bar event: {s}"))
    }
}

/// What a single tick decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The bar sits at the bottom, the top edge is left alone.
    Parked,
    /// The pointer must be moved to this point (Quartz frame). Hide/show was skipped.
    Bounce(Point),
    Transition(BarEvent),
    Steady,
}

/// One evaluation of the edge rules, in priority order: position gate, bouncer, hide, show.
pub fn step(
    state: BarState,
    sample: &Sample,
    thresholds: &Thresholds,
    bouncer_enabled: bool,
) -> (BarState, Outcome) {
    if state.position == BarPosition::Bottom {
        return (state, Outcome::Parked);
    }

    let distance = sample.distance_from_top();

    if bouncer_enabled
        && sample.on_main_display
        && distance <= thresholds.bouncer
        && !sample.override_held
    {
        let target = Point::new(sample.pointer.x, sample.top_edge + thresholds.bounce_target);
        return (state, Outcome::Bounce(target));
    }

    if !state.hidden {
        if distance <= thresholds.hide {
            let next = BarState {
                hidden: true,
                ..state
            };
            return (next, Outcome::Transition(BarEvent::CursorAtTop));
        }
    } else if distance > thresholds.show && !sample.overlay_open {
        let next = BarState {
            hidden: false,
            ..state
        };
        return (next, Outcome::Transition(BarEvent::CursorAwayFromTop));
    }

    (state, Outcome::Steady)
}

/// Owns the bar state and applies [`step`] and topology changes to it.
#[derive(Debug)]
pub struct EdgeMachine {
    thresholds: Thresholds,
    bouncer_enabled: bool,
    state: BarState,
}

impl EdgeMachine {
    pub fn new(thresholds: Thresholds, bouncer_enabled: bool) -> Self {
        Self {
            thresholds,
            bouncer_enabled,
            state: BarState::default(),
        }
    }

    pub fn state(&self) -> BarState {
        self.state
    }

    pub fn bouncer_enabled(&self) -> bool {
        self.bouncer_enabled
    }

    pub fn step(&mut self, sample: &Sample) -> Outcome {
        let (next, outcome) = step(self.state, sample, &self.thresholds, self.bouncer_enabled);
        self.state = next;
        outcome
    }

    /// Moves the bar to the edge matching the primary display. The bar process shows the bar
    /// again whenever it moves, so visibility restarts from visible.
    pub fn relocate(&mut self, primary: DisplayKind) -> Option<BarEvent> {
        let target = BarPosition::for_primary(primary);
        if target == self.state.position {
            return None;
        }
        self.state = BarState {
            hidden: false,
            position: target,
        };
        Some(match target {
            BarPosition::Top => BarEvent::DisplayBuiltinPrimary,
            BarPosition::Bottom => BarEvent::DisplayExternalPrimary,
        })
    }
}

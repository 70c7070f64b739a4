mod scenario;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::core::{
    BarEvent, DisplayKind, EdgeMachine, EventEmitter, Hub, Point, PointerWarp, Sample, Sampler,
    Thresholds, TopologyWatcher,
};

pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(100);
pub(super) const DEBOUNCE: Duration = Duration::from_millis(500);

struct DeskState {
    sample: Sample,
    display: DisplayKind,
    display_queries: usize,
    trace: Vec<String>,
}

/// A fake desktop: one screen whose top edge sits at y=0, a pointer that the warp actually
/// moves, and a log of everything the hub did to the outside world.
#[derive(Clone)]
pub(super) struct Desk(Arc<Mutex<DeskState>>);

pub(super) type DeskHub = Hub<DeskSampler, DeskWarp, DeskEmitter>;

impl Desk {
    pub(super) fn new() -> Self {
        Self(Arc::new(Mutex::new(DeskState {
            sample: Sample {
                pointer: Point::new(100.0, 300.0),
                top_edge: 0.0,
                override_held: false,
                overlay_open: false,
                on_main_display: true,
            },
            display: DisplayKind::BuiltIn,
            display_queries: 0,
            trace: Vec::new(),
        })))
    }

    fn state(&self) -> MutexGuard<'_, DeskState> {
        self.0.lock().unwrap()
    }

    pub(super) fn hub(&self, thresholds: Thresholds, bouncer: bool) -> DeskHub {
        self.hub_with(thresholds, bouncer, POLL_INTERVAL, DEBOUNCE)
    }

    pub(super) fn hub_with(
        &self,
        thresholds: Thresholds,
        bouncer: bool,
        poll_interval: Duration,
        debounce: Duration,
    ) -> DeskHub {
        Hub::new(
            EdgeMachine::new(thresholds, bouncer),
            TopologyWatcher::new(debounce),
            poll_interval,
            DeskSampler(self.clone()),
            DeskWarp(self.clone()),
            DeskEmitter(self.clone()),
        )
    }

    /// Puts the pointer `distance` pixels below the top edge.
    pub(super) fn move_to(&self, distance: f64) {
        let mut state = self.state();
        state.sample.pointer.y = state.sample.top_edge + distance;
    }

    pub(super) fn distance(&self) -> f64 {
        self.state().sample.distance_from_top()
    }

    pub(super) fn set_overlay(&self, open: bool) {
        self.state().sample.overlay_open = open;
    }

    pub(super) fn set_override(&self, held: bool) {
        self.state().sample.override_held = held;
    }

    pub(super) fn set_display(&self, display: DisplayKind) {
        self.state().display = display;
    }

    pub(super) fn display_queries(&self) -> usize {
        self.state().display_queries
    }

    /// Drains the log, one action per line.
    pub(super) fn trace(&self) -> String {
        std::mem::take(&mut self.state().trace).join("\n")
    }
}

pub(super) struct DeskSampler(Desk);

impl Sampler for DeskSampler {
    fn sample(&mut self) -> Sample {
        self.0.state().sample
    }

    fn primary_display(&mut self) -> DisplayKind {
        let mut state = self.0.state();
        state.display_queries += 1;
        state.display
    }
}

pub(super) struct DeskWarp(Desk);

impl PointerWarp for DeskWarp {
    fn warp(&mut self, target: Point) {
        let mut state = self.0.state();
        state.trace.push(format!("warp {target}"));
        state.sample.pointer = target;
    }
}

pub(super) struct DeskEmitter(Desk);

impl EventEmitter for DeskEmitter {
    fn emit(&mut self, event: BarEvent) {
        self.0.state().trace.push(format!("emit {event}"));
    }
}

/// hide=3, show=44, bouncer=5, bounce target=6.
pub(super) fn thresholds() -> Thresholds {
    Thresholds::new(3.0, 44.0, 5.0, 6.0).unwrap()
}

pub(super) fn setup_logger() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
    std::panic::set_hook(Box::new(|panic_info| {
        let backtrace = backtrace::Backtrace::new();
        tracing::error!("Application panicked: {panic_info}. Backtrace: {backtrace:?}");
    }));
}

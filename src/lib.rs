mod config;
mod core;
#[cfg(target_os = "macos")]
mod platform;
mod trigger;

pub use crate::config::{Config, Modifiers};
pub use crate::core::{
    BarEvent, BarPosition, BarState, DisplayChange, DisplayKind, EdgeMachine, EventEmitter, Hub,
    HubEvent, HubThread, Outcome, OverlayFilter, Point, PointerWarp, Sample, Sampler, Thresholds,
    TopologyWatcher, WindowInfo, cocoa_to_quartz, quartz_to_cocoa, step,
};
pub use crate::trigger::BarTrigger;

#[cfg(target_os = "macos")]
pub use crate::platform::macos::run_app;

#[cfg(not(target_os = "macos"))]
pub fn run_app(_config: Config) -> anyhow::Result<()> {
    anyhow::bail!("edgebar drives the macOS pointer and display APIs and only runs on macOS")
}

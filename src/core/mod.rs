mod debounce;
mod edge;
mod geometry;
mod hub;
mod sample;
#[cfg(test)]
mod tests;
mod topology;

pub use edge::{BarEvent, BarPosition, BarState, EdgeMachine, Outcome, Thresholds, step};
pub use geometry::{Point, cocoa_to_quartz, quartz_to_cocoa};
pub use hub::{EventEmitter, Hub, HubEvent, HubThread, PointerWarp, Sampler};
pub use sample::{DisplayKind, OverlayFilter, Sample, WindowInfo};
pub use topology::{DisplayChange, TopologyWatcher};

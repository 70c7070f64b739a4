use std::sync::mpsc;

use anyhow::anyhow;
use objc2::MainThreadMarker;
use objc2_app_kit::{NSApplication, NSApplicationActivationPolicy};
use objc2_application_services::AXIsProcessTrusted;

use super::listeners::DisplayListener;
use super::sampler::{MacSampler, MacWarp};
use crate::config::Config;
use crate::core::{EdgeMachine, Hub, HubEvent, HubThread, TopologyWatcher};
use crate::trigger::BarTrigger;

/// Moving the pointer for another app's benefit needs the accessibility grant. Checked once; the
/// rest of the controller works without it.
fn has_input_control_permission() -> bool {
    unsafe { AXIsProcessTrusted() }
}

pub fn run_app(config: Config) -> anyhow::Result<()> {
    let thresholds = config.thresholds()?;
    let overlay_filter = config.overlay_filter()?;

    let bouncer_enabled = has_input_control_permission();
    if !bouncer_enabled {
        tracing::warn!("Accessibility permission not granted, pointer bouncer disabled");
    }

    let mtm =
        MainThreadMarker::new().ok_or_else(|| anyhow!("edgebar must run on the main thread"))?;
    let app = NSApplication::sharedApplication(mtm);
    app.setActivationPolicy(NSApplicationActivationPolicy::Accessory);

    let (event_tx, event_rx) = mpsc::channel();
    let display_listener = DisplayListener::new(event_tx.clone())?;

    let hub = Hub::new(
        EdgeMachine::new(thresholds, bouncer_enabled),
        TopologyWatcher::new(config.debounce()),
        config.poll_interval(),
        MacSampler::new(overlay_filter, config.override_modifier),
        MacWarp,
        BarTrigger::new(&config.bar_executable),
    );
    let hub_thread = HubThread::spawn(hub, event_rx)?;

    // Display reconfiguration callbacks are delivered through the main run loop.
    app.run();

    drop(display_listener);
    event_tx.send(HubEvent::Shutdown).ok();
    hub_thread.join();
    Ok(())
}

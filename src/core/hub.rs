use std::ops::ControlFlow;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::Context;

use super::edge::{EdgeMachine, Outcome};
use super::geometry::Point;
use super::sample::{DisplayKind, Sample};
use super::topology::{DisplayChange, TopologyWatcher};
use super::BarEvent;

/// Reads the pointer and screen state. Implementations must not block for long and must fall
/// back to [`Sample::fallback`] rather than fail.
pub trait Sampler {
    fn sample(&mut self) -> Sample;
    fn primary_display(&mut self) -> DisplayKind;
}

/// Moves the pointer, in the Quartz frame. Fire and forget.
pub trait PointerWarp {
    fn warp(&mut self, target: Point);
}

/// Notifies the bar process. Failures are the emitter's problem and never reach the hub.
pub trait EventEmitter {
    fn emit(&mut self, event: BarEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubEvent {
    DisplayChanged(DisplayChange),
    Shutdown,
}

/// The poll loop. Owns the bar state; everything that touches it runs on the hub's thread.
pub struct Hub<S, W, E> {
    machine: EdgeMachine,
    topology: TopologyWatcher,
    poll_interval: Duration,
    sampler: S,
    warp: W,
    emitter: E,
}

impl<S, W, E> Hub<S, W, E>
where
    S: Sampler,
    W: PointerWarp,
    E: EventEmitter,
{
    pub fn new(
        machine: EdgeMachine,
        topology: TopologyWatcher,
        poll_interval: Duration,
        sampler: S,
        warp: W,
        emitter: E,
    ) -> Self {
        Self {
            machine,
            topology,
            poll_interval,
            sampler,
            warp,
            emitter,
        }
    }

    pub fn machine(&self) -> &EdgeMachine {
        &self.machine
    }

    pub fn topology(&self) -> &TopologyWatcher {
        &self.topology
    }

    /// Establishes the initial bar position without waiting for a display notification.
    pub fn start(&mut self) {
        tracing::info!(
            bouncer = self.machine.bouncer_enabled(),
            "Starting edge handling"
        );
        self.evaluate_topology();
    }

    pub fn evaluate_topology(&mut self) {
        let primary = self.sampler.primary_display();
        tracing::debug!(?primary, "Evaluating display topology");
        if let Some(event) = self.machine.relocate(primary) {
            tracing::info!(%event, position = ?self.machine.state().position, "Bar relocated");
            self.emitter.emit(event);
        }
    }

    pub fn settle_topology(&mut self, now: Instant) {
        if let Some(change) = self.topology.take_settled(now) {
            tracing::debug!(display = change.display, "Display changes settled");
            self.evaluate_topology();
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.settle_topology(now);

        let sample = self.sampler.sample();
        match self.machine.step(&sample) {
            Outcome::Bounce(target) => {
                tracing::debug!(%target, from = %sample.pointer, "Bouncing pointer off the top edge");
                self.warp.warp(target);
            }
            Outcome::Transition(event) => {
                tracing::info!(%event, distance = sample.distance_from_top(), "Bar visibility changed");
                self.emitter.emit(event);
            }
            Outcome::Parked | Outcome::Steady => {}
        }
    }

    pub fn handle(&mut self, event: HubEvent, now: Instant) -> ControlFlow<()> {
        match event {
            HubEvent::DisplayChanged(change) => {
                self.topology.notify(change, now);
                ControlFlow::Continue(())
            }
            HubEvent::Shutdown => {
                tracing::info!("Hub shutting down");
                ControlFlow::Break(())
            }
        }
    }

    /// Ticks every `poll_interval` until [`HubEvent::Shutdown`]. Between ticks it waits on the
    /// channel, waking early only to settle a pending topology change.
    pub fn run(mut self, rx: Receiver<HubEvent>) {
        self.start();

        let mut next_tick = Instant::now();
        let mut connected = true;
        loop {
            let now = Instant::now();
            if now >= next_tick {
                self.tick(now);
                next_tick = Instant::now() + self.poll_interval;
                continue;
            }
            self.settle_topology(now);

            let wake = self
                .topology
                .deadline()
                .map_or(next_tick, |deadline| deadline.min(next_tick));
            let timeout = wake.saturating_duration_since(now);

            if !connected {
                thread::sleep(timeout);
                continue;
            }
            match rx.recv_timeout(timeout) {
                Ok(event) => {
                    if self.handle(event, Instant::now()).is_break() {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::warn!("Hub channel closed, display changes will go unnoticed");
                    connected = false;
                }
            }
        }
    }
}

pub struct HubThread {
    handle: JoinHandle<()>,
}

impl HubThread {
    pub fn spawn<S, W, E>(hub: Hub<S, W, E>, rx: Receiver<HubEvent>) -> anyhow::Result<Self>
    where
        S: Sampler + Send + 'static,
        W: PointerWarp + Send + 'static,
        E: EventEmitter + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name("edgebar-hub".into())
            .spawn(move || {
                if std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| hub.run(rx))).is_err()
                {
                    // Nothing polls the pointer anymore, staying alive would leave the bar stuck.
                    tracing::error!("Hub thread died, exiting");
                    std::process::exit(1);
                }
            })
            .context("spawn hub thread")?;
        Ok(Self { handle })
    }

    pub fn join(self) {
        self.handle.join().ok();
    }
}

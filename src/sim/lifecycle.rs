// lifecycle.rs - Running/Stopped state and the explicit frame loop
//
// Each scheduled frame carries a ticket. stop() bumps the generation, so a
// frame scheduled before stop() finds its ticket stale and does nothing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use super::World;
use crate::render::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Permission to run one frame, valid until the next stop().
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
}

#[derive(Debug, Default)]
struct Shared {
    running: AtomicBool,
    generation: AtomicU64,
}

/// Cloneable handle; every clone controls the same loop.
#[derive(Clone, Debug, Default)]
pub struct Lifecycle {
    shared: Arc<Shared>,
}

impl Lifecycle {
    /// Starts out Stopped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this call moved the loop from Stopped to Running.
    pub fn start(&self) -> bool {
        let started = !self.shared.running.swap(true, Ordering::SeqCst);
        if started {
            log::info!("simulation loop started");
        }
        started
    }

    /// Stop and cancel any frame that is already scheduled.
    pub fn stop(&self) {
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        if self.shared.running.swap(false, Ordering::SeqCst) {
            log::info!("simulation loop stopped");
        }
    }

    pub fn state(&self) -> LoopState {
        if self.is_running() { LoopState::Running } else { LoopState::Stopped }
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Schedule the next frame. None while Stopped.
    pub fn schedule(&self) -> Option<FrameTicket> {
        if !self.is_running() { return None; }
        Some(FrameTicket {
            generation: self.shared.generation.load(Ordering::SeqCst),
        })
    }

    /// Whether a previously scheduled frame may still run.
    pub fn admits(&self, ticket: FrameTicket) -> bool {
        self.is_running() && ticket.generation == self.shared.generation.load(Ordering::SeqCst)
    }
}

/// Blocks until the host is ready for the next frame and supplies its
/// timestamp in milliseconds.
pub trait VSync<S: Surface> {
    fn wait(&mut self, surface: &S) -> f64;
}

/// Run frames until the lifecycle is stopped. Starts the lifecycle if needed.
/// Returns the number of frames drawn.
pub fn run<S, V>(world: &mut World<S>, lifecycle: &Lifecycle, vsync: &mut V) -> u64
where
    S: Surface,
    V: VSync<S>,
{
    lifecycle.start();
    let mut frames = 0;
    let mut time_ms = 0.0;

    while let Some(ticket) = lifecycle.schedule() {
        if !lifecycle.admits(ticket) { break; }
        world.step_frame(time_ms);
        frames += 1;
        time_ms = vsync.wait(world.surface());
    }

    log::debug!("run loop exited after {} frames", frames);
    frames
}

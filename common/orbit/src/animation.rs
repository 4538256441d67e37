//! The per-frame driver.
//!
//! A render loop usually reschedules itself from inside its own callback. Here that's an explicit state machine
//! that gets told what time it is, so a test can step it with a [`ManualClock`] instead of waiting on a display.

use crate::system::SolarSystem;
use bevy::prelude::Resource;
use std::ops::ControlFlow;

/// A monotonic time source, in seconds from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> f64;
}
impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        C::now(self)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ManualClock(pub f64);
impl ManualClock {
    pub const fn new(now: f64) -> Self {
        Self(now)
    }
    pub const fn set(&mut self, now: f64) {
        self.0 = now;
    }
    pub const fn advance(&mut self, secs: f64) {
        self.0 += secs;
    }
}
impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum LoopState {
    /// Not started yet
    #[default]
    Idle,
    /// Producing frames. `origin` is the clock reading at start.
    Running { origin: f64, frames: u64 },
}

/// What a single frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Zero-based frame number
    pub index: u64,
    /// Seconds since the loop started
    pub t: f64,
}

/// Drives a [`SolarSystem`] one frame at a time.
///
/// The loop starts once and never stops on its own. Frames requested before [`AnimationLoop::start`] produce nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Resource)]
pub struct AnimationLoop {
    state: LoopState,
}
impl AnimationLoop {
    pub const fn new() -> Self {
        Self {
            state: LoopState::Idle,
        }
    }
    #[inline(always)]
    pub const fn state(&self) -> LoopState {
        self.state
    }
    #[inline(always)]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// Transition from idle to running, taking the current time as the origin.
    ///
    /// Starting an already running loop does nothing; the origin is never reset.
    pub fn start(&mut self, clock: impl Clock) {
        if let LoopState::Idle = self.state {
            self.state = LoopState::Running {
                origin: clock.now(),
                frames: 0,
            };
        }
    }

    /// Run one frame, if the loop is running.
    pub fn frame(&mut self, clock: impl Clock, system: &mut SolarSystem) -> Option<Frame> {
        let LoopState::Running { origin, frames } = &mut self.state else {
            return None;
        };
        Some(step(*origin, frames, &clock, system))
    }

    /// Keep producing frames until `next` breaks.
    ///
    /// `next` runs after every frame and may change the system or the clock in between. The loop is started first if
    /// it's still idle. Returns the value passed to [`ControlFlow::Break`].
    pub fn run_until<C: Clock, B>(
        &mut self,
        clock: &mut C,
        system: &mut SolarSystem,
        mut next: impl FnMut(Frame, &mut C, &mut SolarSystem) -> ControlFlow<B>,
    ) -> B {
        let (origin, mut frames) = match self.state {
            LoopState::Running { origin, frames } => (origin, frames),
            LoopState::Idle => (clock.now(), 0),
        };
        loop {
            let frame = step(origin, &mut frames, &*clock, system);
            self.state = LoopState::Running { origin, frames };
            if let ControlFlow::Break(b) = next(frame, clock, system) {
                return b;
            }
        }
    }
}

fn step(origin: f64, frames: &mut u64, clock: impl Clock, system: &mut SolarSystem) -> Frame {
    let t = (clock.now() - origin).max(0.0);
    system.advance(t);
    let frame = Frame { index: *frames, t };
    *frames += 1;
    frame
}

//! Engine-agnostic core of the orrery.
//!
//! Everything in here is plain math over the [`orrery_catalog`] data, so it can be driven frame by frame from a
//! test with a fake clock as easily as from the render loop.

pub mod animation;
pub mod error;
pub mod geometry;
pub mod system;
pub mod viewport;

pub use error::{OrreryError, Result};

pub mod prelude {
    pub use crate::animation::{AnimationLoop, Clock, Frame, LoopState, ManualClock};
    pub use crate::error::OrreryError;
    pub use crate::geometry::{orbit_guide, starfield};
    pub use crate::system::{PlanetState, SolarSystem};
    pub use crate::viewport::Viewport;
}

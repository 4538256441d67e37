//! The per-frame half of the app: feed the clock into the loop and copy the result onto transforms.

use crate::scene::{PlanetVisual, Sun};
use bevy_gui::ecs as bevy_ecs;
use bevy_gui::prelude::*;
use orrery_orbit::animation::{AnimationLoop, Clock, ManualClock};
use orrery_orbit::system::SolarSystem;

/// Where the animation loop gets its time from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Resource)]
pub enum OrbitClock {
    /// Real elapsed time since the app started
    #[default]
    Real,
    /// A fixed reading, moved by hand
    Manual(ManualClock),
}
impl OrbitClock {
    /// Current reading, in seconds.
    pub fn now(&self, real: &Time<Real>) -> f64 {
        match self {
            Self::Real => real.elapsed_secs_f64(),
            Self::Manual(clock) => clock.now(),
        }
    }
}

pub fn start_animation(
    real: Res<Time<Real>>,
    clock: Res<OrbitClock>,
    mut anim: ResMut<AnimationLoop>,
) {
    anim.start(ManualClock::new(clock.now(&real)));
    info!("animation started");
}

pub fn advance_orbits(
    real: Res<Time<Real>>,
    clock: Res<OrbitClock>,
    mut anim: ResMut<AnimationLoop>,
    mut system: ResMut<SolarSystem>,
) {
    if let Some(frame) = anim.frame(ManualClock::new(clock.now(&real)), &mut system) {
        trace!("frame {} at t = {:.3}", frame.index, frame.t);
    }
}

pub fn sync_planet_transforms(
    system: Res<SolarSystem>,
    mut planets: Query<(&PlanetVisual, &mut Transform), Without<Sun>>,
    mut sun: Query<&mut Transform, (With<Sun>, Without<PlanetVisual>)>,
) {
    for (visual, mut transform) in planets.iter_mut() {
        let Some(state) = system.planets().get(visual.index) else {
            continue;
        };
        transform.translation = state.position().as_vec3();
        transform.rotation = Quat::from_rotation_y(state.rotation() as f32);
    }
    for mut transform in sun.iter_mut() {
        transform.rotation = Quat::from_rotation_y(system.sun_rotation() as f32);
    }
}

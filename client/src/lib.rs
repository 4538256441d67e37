//! Bevy front end for the orrery.
//!
//! [`SimulationPlugin`] holds everything that runs without a renderer: the simulation state, the animation loop,
//! speed changes, and viewport tracking. [`OrreryPlugin`] adds scene assembly and the egui panel on top, and expects
//! `DefaultPlugins`, the egui plugin, and the orbit camera plugin to be present.

pub mod animate;
pub mod config;
pub mod controls;
pub mod labels;
pub mod scene;
pub mod viewport;

use bevy_gui::ecs as bevy_ecs;
use bevy_gui::prelude::*;
use bevy_gui::ui::UiSystem;
use bevy_gui::window::WindowResized;
use bevy_panorbit_camera::PanOrbitCameraSystemSet;
use config::OrreryConfig;
use controls::{SpeedChanged, SpeedControls};
use orrery_orbit::animation::AnimationLoop;
use orrery_orbit::system::SolarSystem;
use orrery_orbit::viewport::Viewport;

pub mod prelude {
    pub use crate::animate::OrbitClock;
    pub use crate::config::OrreryConfig;
    pub use crate::controls::{SpeedChanged, SpeedControls};
    pub use crate::scene::{OrreryCamera, PlanetLabel, PlanetVisual, Ring, Sun};
    pub use crate::{OrreryPlugin, SimulationPlugin};
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum OrrerySet {
    /// Scene construction, once at startup
    Assemble,
    /// Slider changes, the animation step, and transform updates
    Animate,
}

pub struct SimulationPlugin;
impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrreryConfig>();
        let label_offset = app.world().resource::<OrreryConfig>().label_offset;
        if !app.world().contains_resource::<SolarSystem>() {
            app.insert_resource(SolarSystem::from_catalog().with_label_offset(label_offset));
        }
        app.init_resource::<SpeedControls>()
            .init_resource::<AnimationLoop>()
            .init_resource::<animate::OrbitClock>()
            .init_resource::<Viewport>()
            .add_event::<SpeedChanged>()
            .add_event::<WindowResized>()
            .add_systems(
                Startup,
                (
                    controls::verify_speed_controls,
                    viewport::init_viewport,
                    animate::start_animation,
                )
                    .chain()
                    .before(OrrerySet::Assemble),
            )
            .add_systems(
                Update,
                (
                    controls::apply_speed_changes,
                    animate::advance_orbits,
                    animate::sync_planet_transforms,
                )
                    .chain()
                    .in_set(OrrerySet::Animate),
            )
            .add_systems(Update, viewport::track_resize)
            .add_systems(
                PostUpdate,
                labels::sync_labels
                    .after(PanOrbitCameraSystemSet)
                    .before(UiSystem::Layout),
            );
    }
}

pub struct OrreryPlugin;
impl Plugin for OrreryPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SimulationPlugin)
            .insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, scene::assemble.in_set(OrrerySet::Assemble))
            .add_systems(bevy_egui::EguiPrimaryContextPass, controls::speed_panel);
        let config = app.world().resource::<OrreryConfig>().clone();
        app.insert_resource(AmbientLight {
            color: config.ambient_color,
            brightness: config.ambient_brightness,
            ..default()
        });
    }
}

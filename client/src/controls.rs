//! Per-planet speed sliders.

use crate::config::OrreryConfig;
use bevy_egui::egui;
use bevy_gui::ecs as bevy_ecs;
use bevy_gui::prelude::*;
use orrery_catalog::BodyDescriptor;
use orrery_orbit::system::{SolarSystem, format_readout};

/// One slider and its readout.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedControl {
    pub planet: &'static BodyDescriptor,
    pub multiplier: f64,
    pub readout: String,
}
impl SpeedControl {
    pub fn new(planet: &'static BodyDescriptor) -> Self {
        Self {
            planet,
            multiplier: 1.0,
            readout: format_readout(1.0),
        }
    }
}

/// The slider state for every planet, keyed by planet name.
#[derive(Debug, Clone, PartialEq, Resource)]
pub struct SpeedControls(pub Vec<SpeedControl>);
impl Default for SpeedControls {
    fn default() -> Self {
        Self::from_catalog()
    }
}
impl SpeedControls {
    pub fn from_catalog() -> Self {
        Self(orrery_catalog::planets().map(SpeedControl::new).collect())
    }
    pub fn get(&self, name: &str) -> Option<&SpeedControl> {
        self.0.iter().find(|c| c.planet.name == name)
    }
    pub fn get_mut(&mut self, name: &str) -> Option<&mut SpeedControl> {
        self.0.iter_mut().find(|c| c.planet.name == name)
    }
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|c| c.planet.name)
    }
}

/// Sent when a slider moves.
#[derive(Debug, Clone, Copy, PartialEq, Event)]
pub struct SpeedChanged {
    pub planet: &'static str,
    pub multiplier: f64,
}

/// Fail startup if any planet has no slider.
pub fn verify_speed_controls(system: Res<SolarSystem>, controls: Res<SpeedControls>) -> Result {
    system.verify_controls(controls.names())?;
    Ok(())
}

/// Apply slider moves to the effective speeds and refresh the readouts.
pub fn apply_speed_changes(
    mut events: EventReader<SpeedChanged>,
    mut system: ResMut<SolarSystem>,
    mut controls: ResMut<SpeedControls>,
) -> Result {
    for ev in events.read() {
        let readout = system.set_multiplier(ev.planet, ev.multiplier)?;
        if let Some(control) = controls.get_mut(ev.planet) {
            control.multiplier = ev.multiplier;
            control.readout = readout;
        }
    }
    Ok(())
}

pub fn speed_panel(
    mut contexts: bevy_egui::EguiContexts,
    config: Res<OrreryConfig>,
    mut controls: ResMut<SpeedControls>,
    mut changes: EventWriter<SpeedChanged>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    egui::Window::new("Planet Speeds")
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("speeds").num_columns(3).show(ui, |ui| {
                for control in &mut controls.bypass_change_detection().0 {
                    let mut value = control.multiplier;
                    ui.label(control.planet.display_name());
                    let slider = egui::Slider::new(&mut value, 0.0..=config.max_multiplier)
                        .step_by(config.multiplier_step)
                        .show_value(false);
                    let resp = ui.push_id(control.planet.name, |ui| ui.add(slider)).inner;
                    ui.label(&control.readout);
                    ui.end_row();
                    if resp.changed() {
                        changes.write(SpeedChanged {
                            planet: control.planet.name,
                            multiplier: value,
                        });
                    }
                }
            });
        });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_gui::ecs::system::RunSystemOnce;
    use orrery_orbit::OrreryError;

    fn world() -> World {
        let mut world = World::new();
        world.init_resource::<Events<SpeedChanged>>();
        world.insert_resource(SolarSystem::from_catalog());
        world.insert_resource(SpeedControls::from_catalog());
        world
    }

    #[test]
    fn one_control_per_planet() {
        let controls = SpeedControls::from_catalog();
        assert_eq!(
            controls.names().collect::<Vec<_>>(),
            orrery_catalog::planets().map(|p| p.name).collect::<Vec<_>>()
        );
        assert!(controls.0.iter().all(|c| c.readout == "1x"));
    }

    #[test]
    fn readout_follows_slider() {
        let mut world = world();
        world.send_event(SpeedChanged {
            planet: "mars",
            multiplier: 2.5,
        });
        world.run_system_once(apply_speed_changes).unwrap().unwrap();
        let controls = world.resource::<SpeedControls>();
        assert_eq!(controls.get("mars").unwrap().readout, "2.5x");
        assert_eq!(controls.get("venus").unwrap().readout, "1x");
        let system = world.resource::<SolarSystem>();
        assert_eq!(system.planet("mars").unwrap().effective_speed(), 0.008 * 2.5);
        assert_eq!(system.planet("venus").unwrap().effective_speed(), 0.015);
    }

    #[test]
    fn unknown_planet_is_an_error() {
        let mut world = world();
        world.send_event(SpeedChanged {
            planet: "vulcan",
            multiplier: 1.0,
        });
        let err = world
            .run_system_once(apply_speed_changes)
            .unwrap()
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<OrreryError>(),
            Some(&OrreryError::UnknownBody("vulcan".into()))
        );
    }

    #[test]
    fn missing_control_fails_setup() {
        let mut world = world();
        world.resource_mut::<SpeedControls>().0.retain(|c| c.planet.name != "neptune");
        let err = world
            .run_system_once(verify_speed_controls)
            .unwrap()
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<OrreryError>(),
            Some(&OrreryError::MissingControl("neptune".into()))
        );

        let mut world = self::world();
        assert!(world.run_system_once(verify_speed_controls).unwrap().is_ok());
    }
}

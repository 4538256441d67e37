//! Mutable state of the solar system: effective speeds, positions, and rotations.

use crate::error::{OrreryError, Result};
use bevy::log::debug;
use bevy::math::DVec3;
use bevy::prelude::Resource;
use orrery_catalog::{BodyDescriptor, SUN};
use std::f64::consts::TAU;

/// Height of a planet's label above its center.
pub const DEFAULT_LABEL_OFFSET: f64 = 2.0;

/// Runtime state of one planet.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetState {
    descriptor: &'static BodyDescriptor,
    multiplier: f64,
    effective_speed: f64,
    position: DVec3,
    rotation: f64,
}
impl PlanetState {
    pub fn new(descriptor: &'static BodyDescriptor) -> Self {
        Self {
            descriptor,
            multiplier: 1.0,
            effective_speed: descriptor.speed,
            position: DVec3::new(descriptor.distance, 0.0, 0.0),
            rotation: 0.0,
        }
    }
    #[inline(always)]
    pub const fn descriptor(&self) -> &'static BodyDescriptor {
        self.descriptor
    }
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.descriptor.name
    }
    #[inline(always)]
    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }
    /// Angular speed after the multiplier, in radians per second.
    #[inline(always)]
    pub const fn effective_speed(&self) -> f64 {
        self.effective_speed
    }
    #[inline(always)]
    pub const fn position(&self) -> DVec3 {
        self.position
    }
    /// Self-rotation around the Y axis, in `[0, 2π)`.
    #[inline(always)]
    pub const fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Position on the orbit after `t` seconds at the current effective speed.
    pub fn orbital_position(&self, t: f64) -> DVec3 {
        let (s, c) = (t * self.effective_speed).sin_cos();
        DVec3::new(c * self.descriptor.distance, 0.0, s * self.descriptor.distance)
    }

    fn advance(&mut self, t: f64) {
        self.position = self.orbital_position(t);
        self.rotation = (self.rotation + self.descriptor.rotation_speed).rem_euclid(TAU);
    }
}

/// Format a multiplier the way the speed readout shows it, e.g. `"2x"` or `"0.5x"`.
pub fn format_readout(multiplier: f64) -> String {
    let rounded = (multiplier * 100.0).round() / 100.0;
    format!("{rounded}x")
}

/// All mutable per-frame state, shared between the speed controls and the animation loop.
///
/// The speed controls are the only writer of effective speeds, and [`SolarSystem::advance`] is the only writer of
/// positions and rotations.
#[derive(Debug, Clone, PartialEq, Resource)]
pub struct SolarSystem {
    planets: Vec<PlanetState>,
    sun_rotation: f64,
    sun_rotation_speed: f64,
    label_offset: f64,
}
impl Default for SolarSystem {
    fn default() -> Self {
        Self::from_catalog()
    }
}
impl SolarSystem {
    pub fn new(planets: impl IntoIterator<Item = &'static BodyDescriptor>) -> Self {
        Self {
            planets: planets.into_iter().map(PlanetState::new).collect(),
            sun_rotation: 0.0,
            sun_rotation_speed: SUN.rotation_speed,
            label_offset: DEFAULT_LABEL_OFFSET,
        }
    }
    /// Create the system with every planet from the catalog.
    pub fn from_catalog() -> Self {
        Self::new(orrery_catalog::planets())
    }
    pub fn with_label_offset(mut self, offset: f64) -> Self {
        self.label_offset = offset;
        self
    }

    #[inline(always)]
    pub fn planets(&self) -> &[PlanetState] {
        &self.planets
    }
    #[inline(always)]
    pub fn planet(&self, name: &str) -> Option<&PlanetState> {
        self.planets.iter().find(|p| p.name() == name)
    }
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.planets
            .iter()
            .position(|p| p.name() == name)
            .ok_or_else(|| OrreryError::UnknownBody(name.to_string()))
    }
    #[inline(always)]
    pub const fn sun_rotation(&self) -> f64 {
        self.sun_rotation
    }
    #[inline(always)]
    pub const fn label_offset(&self) -> f64 {
        self.label_offset
    }
    /// World position of the label for the planet at `index`.
    pub fn label_anchor(&self, index: usize) -> Option<DVec3> {
        self.planets
            .get(index)
            .map(|p| p.position + DVec3::Y * self.label_offset)
    }

    /// Set the speed multiplier of one planet and return the text for its readout.
    ///
    /// No other planet is affected. A multiplier of zero stops the orbit but not the self-rotation.
    pub fn set_multiplier(&mut self, name: &str, multiplier: f64) -> Result<String> {
        let idx = self.index_of(name)?;
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(OrreryError::InvalidMultiplier {
                name: name.to_string(),
                value: multiplier,
            });
        }
        let planet = &mut self.planets[idx];
        planet.multiplier = multiplier;
        planet.effective_speed = planet.descriptor.speed * multiplier;
        debug!(
            "{name} speed set to {multiplier}x ({} rad/s)",
            planet.effective_speed
        );
        Ok(format_readout(multiplier))
    }

    /// Check that every planet has a control, given the names of the available controls.
    pub fn verify_controls<'a>(&self, controls: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let controls = controls.into_iter().collect::<Vec<_>>();
        match self.planets.iter().find(|p| !controls.contains(&p.name())) {
            Some(p) => Err(OrreryError::MissingControl(p.name().to_string())),
            None => Ok(()),
        }
    }

    /// Run one frame of the update at `t` seconds since the animation started.
    ///
    /// Orbital positions depend only on `t`, but rotations accumulate a fixed step per call.
    pub fn advance(&mut self, t: f64) {
        for planet in &mut self.planets {
            planet.advance(t);
        }
        self.sun_rotation = (self.sun_rotation + self.sun_rotation_speed).rem_euclid(TAU);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use orrery_catalog::PLANETS;
    use rand::Rng;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn starts_on_positive_x() {
        let system = SolarSystem::from_catalog();
        assert_eq!(system.planets().len(), PLANETS.len());
        for p in system.planets() {
            assert_eq!(p.position(), DVec3::new(p.descriptor().distance, 0.0, 0.0));
            assert_eq!(p.effective_speed(), p.descriptor().speed);
            assert_eq!(p.multiplier(), 1.0);
        }
    }

    #[test]
    fn orbits_stay_circular_and_flat() {
        let rng = &mut rand::thread_rng();
        let mut system = SolarSystem::from_catalog();
        for _ in 0..1000 {
            let name = PLANETS[rng.gen_range(0..PLANETS.len())].name;
            system
                .set_multiplier(name, rng.gen_range(0.0..5.0))
                .unwrap();
            let t = rng.gen_range(0.0..1.0e5);
            system.advance(t);
            for p in system.planets() {
                let pos = p.position();
                assert_eq!(pos.y, 0.0, "{} left the plane at t = {t}", p.name());
                assert_abs_diff_eq!(
                    pos.x.hypot(pos.z),
                    p.descriptor().distance,
                    epsilon = EPSILON
                );
            }
        }
    }

    #[test]
    fn zero_multiplier_freezes_orbit_but_not_spin() {
        let mut system = SolarSystem::from_catalog();
        system.advance(42.0);
        system.set_multiplier("mars", 0.0).unwrap();
        system.advance(42.0);
        let before = system.planet("mars").unwrap().clone();
        for _ in 0..10 {
            system.advance(42.0);
        }
        let after = system.planet("mars").unwrap();
        assert_eq!(before.position(), after.position());
        assert_eq!(after.position(), DVec3::new(13.0, 0.0, 0.0));
        assert_abs_diff_eq!(
            after.rotation(),
            before.rotation() + 10.0 * 0.018,
            epsilon = EPSILON
        );
    }

    #[test]
    fn orbits_are_periodic() {
        let rng = &mut rand::thread_rng();
        let mut system = SolarSystem::from_catalog();
        system.set_multiplier("venus", 3.0).unwrap();
        for p in system.planets() {
            let period = TAU / p.effective_speed();
            for _ in 0..100 {
                let t = rng.gen_range(0.0..1000.0);
                let a = p.orbital_position(t);
                let b = p.orbital_position(t + period);
                assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-6);
                assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn multipliers_are_independent() {
        let mut system = SolarSystem::from_catalog();
        let before = system
            .planets()
            .iter()
            .map(|p| p.effective_speed())
            .collect::<Vec<_>>();
        system.set_multiplier("jupiter", 4.5).unwrap();
        for (p, old) in system.planets().iter().zip(before) {
            if p.name() == "jupiter" {
                assert_abs_diff_eq!(p.effective_speed(), 0.002 * 4.5, epsilon = EPSILON);
            } else {
                assert_eq!(p.effective_speed(), old, "{} changed", p.name());
            }
        }
    }

    #[test]
    fn earth_half_orbit_at_double_speed() {
        let mut system = SolarSystem::from_catalog();
        system.advance(0.0);
        assert_eq!(
            system.planet("earth").unwrap().position(),
            DVec3::new(10.0, 0.0, 0.0)
        );
        assert_eq!(system.set_multiplier("earth", 2.0).unwrap(), "2x");
        let earth = system.planet("earth").unwrap();
        assert_abs_diff_eq!(earth.effective_speed(), 0.02, epsilon = EPSILON);
        system.advance(PI / 0.02);
        let pos = system.planet("earth").unwrap().position();
        assert_abs_diff_eq!(pos.x, -10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pos.z, 0.0, epsilon = 1e-9);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn rotation_wraps() {
        let mut system = SolarSystem::new([&BodyDescriptor::JUPITER]);
        for _ in 0..10_000 {
            system.advance(0.0);
            let rot = system.planets()[0].rotation();
            assert!((0.0..TAU).contains(&rot));
            assert!((0.0..TAU).contains(&system.sun_rotation()));
        }
    }

    #[test]
    fn labels_follow_planets() {
        let mut system = SolarSystem::from_catalog().with_label_offset(3.0);
        system.advance(17.0);
        for (i, p) in system.planets().iter().enumerate() {
            assert_eq!(
                system.label_anchor(i),
                Some(p.position() + DVec3::new(0.0, 3.0, 0.0))
            );
        }
        assert_eq!(system.label_anchor(PLANETS.len()), None);
    }

    #[test]
    fn bad_multipliers() {
        let mut system = SolarSystem::from_catalog();
        assert_eq!(
            system.set_multiplier("pluto", 1.0),
            Err(OrreryError::UnknownBody("pluto".into()))
        );
        assert!(matches!(
            system.set_multiplier("earth", -1.0),
            Err(OrreryError::InvalidMultiplier { .. })
        ));
        assert!(system.set_multiplier("earth", f64::NAN).is_err());
        assert_eq!(system.planet("earth").unwrap().multiplier(), 1.0);
    }

    #[test]
    fn readouts() {
        assert_eq!(format_readout(1.0), "1x");
        assert_eq!(format_readout(0.5), "0.5x");
        assert_eq!(format_readout(0.1 + 0.2), "0.3x");
        assert_eq!(format_readout(0.0), "0x");
    }

    #[test]
    fn controls_must_cover_every_planet() {
        let system = SolarSystem::from_catalog();
        assert_eq!(system.verify_controls(PLANETS.iter().map(|p| p.name)), Ok(()));
        assert_eq!(
            system.verify_controls(PLANETS.iter().map(|p| p.name).filter(|&n| n != "uranus")),
            Err(OrreryError::MissingControl("uranus".into()))
        );
    }
}

use bevy_gui::ecs as bevy_ecs;
use bevy_gui::prelude::*;
use orrery_orbit::system::DEFAULT_LABEL_OFFSET;
use std::num::NonZero;

/// Tunables for the scene, camera, and controls.
///
/// [`crate::OrreryPlugin`] inserts the default unless the app already has one.
#[derive(Debug, Clone, PartialEq, Resource)]
pub struct OrreryConfig {
    /// Number of background stars
    pub star_count: usize,
    /// Stars are scattered in `[-star_spread, star_spread)` on every axis
    pub star_spread: f32,
    pub orbit_segments: NonZero<usize>,
    pub orbit_opacity: f32,
    /// Sectors and stacks of every sphere
    pub sphere_resolution: u32,
    pub ring_resolution: u32,
    pub ring_opacity: f32,

    /// Height of a label above its planet
    pub label_offset: f64,
    pub label_font_size: f32,
    /// Labels are centered in a box this wide, in logical pixels
    pub label_width: f32,

    pub camera_position: Vec3,
    /// Vertical field of view, in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Closest the camera may zoom to the origin
    pub min_distance: f32,
    /// Farthest the camera may zoom from the origin
    pub max_distance: f32,
    /// Fraction of the remaining camera motion applied each step
    pub damping_factor: f32,

    /// Upper bound of every speed slider
    pub max_multiplier: f64,
    pub multiplier_step: f64,

    pub sun_light_intensity: f32,
    pub sun_light_range: f32,
    pub ambient_color: Color,
    pub ambient_brightness: f32,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            star_count: 10_000,
            star_spread: 1000.0,
            orbit_segments: const { NonZero::new(128).unwrap() },
            orbit_opacity: 0.3,
            sphere_resolution: 64,
            ring_resolution: 64,
            ring_opacity: 0.8,
            label_offset: DEFAULT_LABEL_OFFSET,
            label_font_size: 20.0,
            label_width: 120.0,
            camera_position: Vec3::new(0.0, 30.0, 50.0),
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            min_distance: 20.0,
            max_distance: 100.0,
            damping_factor: 0.05,
            max_multiplier: 5.0,
            multiplier_step: 0.1,
            sun_light_intensity: 20_000_000.0,
            sun_light_range: 300.0,
            ambient_color: orrery_catalog::hex_color(0x333333),
            ambient_brightness: 400.0,
        }
    }
}

impl OrreryConfig {
    /// Camera smoothing as the orbit controller expects it: 0 stops instantly, values near 1 drift for a long time.
    pub fn smoothness(&self) -> f32 {
        (1.0 - self.damping_factor).clamp(0.0, 1.0)
    }
}

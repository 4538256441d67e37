//! Static descriptions of the bodies in the scene.
//!
//! Values are picked for a readable picture, not for accuracy. Distances and radii are in scene units, orbital
//! speeds are in radians per second, and self-rotation speeds are in radians per *frame*.

use bevy_color::{Color, LinearRgba};

/// Shininess shared by every planet's surface.
pub const PLANET_SHININESS: f32 = 5.0;

/// Fraction of a planet's base color that it emits on its own.
pub const EMISSIVE_SCALE: f32 = 0.1;

/// Ring radii relative to the planet radius.
pub const RING_INNER_SCALE: f32 = 1.5;
pub const RING_OUTER_SCALE: f32 = 2.5;

/// Convert a packed `0xRRGGBB` value into an sRGB color.
pub fn hex_color(hex: u32) -> Color {
    Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Inner and outer radius of a flat ring around a planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingDimensions {
    pub inner: f32,
    pub outer: f32,
}

/// The central star. It doesn't orbit anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunDescriptor {
    pub radius: f32,
    pub color: u32,
    /// Self-rotation per frame, in radians
    pub rotation_speed: f64,
}

pub const SUN: SunDescriptor = SunDescriptor {
    radius: 3.0,
    color: 0xFFFF00,
    rotation_speed: 0.004,
};

impl SunDescriptor {
    pub fn color(&self) -> Color {
        hex_color(self.color)
    }
}

/// Everything needed to build and animate one planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDescriptor {
    /// Lowercase identifier, also used to address the planet's speed control
    pub name: &'static str,
    pub radius: f32,
    /// Radius of the circular orbit
    pub distance: f64,
    /// Base angular speed, in radians per second
    pub speed: f64,
    pub color: u32,
    pub specular: u32,
    /// Self-rotation per frame, in radians
    pub rotation_speed: f64,
    pub has_ring: bool,
}

impl BodyDescriptor {
    pub const MERCURY: Self = Self::new("mercury", 0.4, 5.0, 0.04, 0x8C8C8C, 0x111111, 0.004);
    pub const VENUS: Self = Self::new("venus", 0.9, 7.0, 0.015, 0xE39E1C, 0x222222, 0.002);
    pub const EARTH: Self = Self::new("earth", 1.0, 10.0, 0.01, 0x2B83FF, 0x333333, 0.02);
    pub const MARS: Self = Self::new("mars", 0.5, 13.0, 0.008, 0xC1440E, 0x222222, 0.018);
    pub const JUPITER: Self = Self::new("jupiter", 2.5, 18.0, 0.002, 0xD8CA9D, 0x333333, 0.04);
    pub const SATURN: Self =
        Self::new("saturn", 2.2, 23.0, 0.0009, 0xE3BB76, 0x333333, 0.038).with_ring();
    pub const URANUS: Self = Self::new("uranus", 1.8, 28.0, 0.0004, 0x5580AA, 0x222222, 0.03);
    pub const NEPTUNE: Self = Self::new("neptune", 1.8, 32.0, 0.0001, 0x366896, 0x222222, 0.032);

    const fn new(
        name: &'static str,
        radius: f32,
        distance: f64,
        speed: f64,
        color: u32,
        specular: u32,
        rotation_speed: f64,
    ) -> Self {
        Self {
            name,
            radius,
            distance,
            speed,
            color,
            specular,
            rotation_speed,
            has_ring: false,
        }
    }
    const fn with_ring(mut self) -> Self {
        self.has_ring = true;
        self
    }

    /// The name with its first letter capitalized, as shown on labels.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn color(&self) -> Color {
        hex_color(self.color)
    }
    pub fn specular_color(&self) -> Color {
        hex_color(self.specular)
    }
    /// Self-illumination, a dim copy of the base color.
    pub fn emissive(&self) -> LinearRgba {
        let base = self.color().to_linear();
        LinearRgba::rgb(
            base.red * EMISSIVE_SCALE,
            base.green * EMISSIVE_SCALE,
            base.blue * EMISSIVE_SCALE,
        )
    }

    /// Ring radii, if this planet has one.
    pub fn ring(&self) -> Option<RingDimensions> {
        self.has_ring.then(|| RingDimensions {
            inner: self.radius * RING_INNER_SCALE,
            outer: self.radius * RING_OUTER_SCALE,
        })
    }
}

/// All planets, ordered outward from the sun.
pub static PLANETS: [BodyDescriptor; 8] = [
    BodyDescriptor::MERCURY,
    BodyDescriptor::VENUS,
    BodyDescriptor::EARTH,
    BodyDescriptor::MARS,
    BodyDescriptor::JUPITER,
    BodyDescriptor::SATURN,
    BodyDescriptor::URANUS,
    BodyDescriptor::NEPTUNE,
];

#[inline(always)]
pub fn planets() -> impl ExactSizeIterator<Item = &'static BodyDescriptor> {
    PLANETS.iter()
}

/// Look up a planet by its lowercase name.
pub fn planet(name: &str) -> Option<&'static BodyDescriptor> {
    PLANETS.iter().find(|p| p.name == name)
}

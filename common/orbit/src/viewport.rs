use bevy::prelude::Resource;

/// Size of the drawable area and the aspect ratio the camera should use for it.
#[derive(Debug, Clone, Copy, PartialEq, Resource)]
pub struct Viewport {
    width: f32,
    height: f32,
    aspect: f32,
}
impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        let mut this = Self {
            width: 0.0,
            height: 0.0,
            aspect: 1.0,
        };
        this.resize(width, height);
        this
    }
    #[inline(always)]
    pub const fn width(&self) -> f32 {
        self.width
    }
    #[inline(always)]
    pub const fn height(&self) -> f32 {
        self.height
    }
    #[inline(always)]
    pub const fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Record a new size. Returns whether anything changed.
    ///
    /// A zero-height area (a minimized window) keeps the last aspect ratio.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let old = *self;
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        if self.height > 0.0 && self.width > 0.0 {
            self.aspect = self.width / self.height;
        }
        *self != old
    }
}

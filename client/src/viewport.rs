use crate::scene::OrreryCamera;
use bevy_gui::prelude::*;
use bevy_gui::window::{PrimaryWindow, WindowResized};
use orrery_orbit::viewport::Viewport;

/// Seed the viewport from the primary window, if there is one.
pub fn init_viewport(
    window: Option<Single<&Window, With<PrimaryWindow>>>,
    mut viewport: ResMut<Viewport>,
) {
    if let Some(window) = window {
        viewport.resize(window.width(), window.height());
    }
}

/// Keep the camera aspect ratio in step with the primary window's size.
pub fn track_resize(
    mut events: EventReader<WindowResized>,
    primary: Query<(), With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
    mut cameras: Query<&mut Projection, With<OrreryCamera>>,
) {
    let Some(last) = events.read().filter(|ev| primary.contains(ev.window)).last() else {
        return;
    };
    if !viewport.resize(last.width, last.height) {
        return;
    }
    debug!(
        "viewport resized to {}x{} (aspect {})",
        viewport.width(),
        viewport.height(),
        viewport.aspect()
    );
    for mut projection in cameras.iter_mut() {
        if let Projection::Perspective(perspective) = &mut *projection {
            perspective.aspect_ratio = viewport.aspect();
        }
    }
}

//! Planet name tags.
//!
//! Labels are UI text placed over the projected anchor point, so they always face the camera. Each planet holds a
//! direct reference to its label in [`PlanetVisual::label`].

use crate::config::OrreryConfig;
use crate::scene::{OrreryCamera, PlanetLabel, PlanetVisual};
use bevy_gui::prelude::*;
use bevy_gui::render::camera::CameraProjection;
use orrery_orbit::system::SolarSystem;
use orrery_orbit::viewport::Viewport;

/// Project a world point to logical screen coordinates, origin at the top left.
///
/// Returns `None` for points behind the camera or outside its depth range.
pub fn project_to_screen(
    projection: &impl CameraProjection,
    camera: &Transform,
    screen: Vec2,
    point: Vec3,
) -> Option<Vec2> {
    let clip_from_world = projection.get_clip_from_view() * camera.compute_matrix().inverse();
    let ndc = clip_from_world.project_point3(point);
    if !ndc.is_finite() || ndc.z <= 0.0 || ndc.z > 1.0 {
        return None;
    }
    Some(Vec2::new(ndc.x + 1.0, 1.0 - ndc.y) * 0.5 * screen)
}

/// Move every label over its planet.
///
/// Runs after the orbit camera has moved for this frame, so the camera has no parent and its local transform is
/// already final.
pub fn sync_labels(
    system: Res<SolarSystem>,
    config: Res<OrreryConfig>,
    viewport: Res<Viewport>,
    camera: Query<(&Projection, &Transform), With<OrreryCamera>>,
    planets: Query<&PlanetVisual>,
    mut labels: Query<(&mut Node, &mut Visibility), With<PlanetLabel>>,
) {
    let Ok((projection, cam_transform)) = camera.single() else {
        return;
    };
    let screen = Vec2::new(viewport.width(), viewport.height());
    for visual in &planets {
        let Ok((mut node, mut visibility)) = labels.get_mut(visual.label) else {
            continue;
        };
        let pos = system
            .label_anchor(visual.index)
            .and_then(|anchor| project_to_screen(projection, cam_transform, screen, anchor.as_vec3()));
        match pos {
            Some(pos) => {
                node.left = Val::Px(pos.x - config.label_width * 0.5);
                node.top = Val::Px(pos.y - config.label_font_size);
                visibility.set_if_neq(Visibility::Inherited);
            }
            None => {
                visibility.set_if_neq(Visibility::Hidden);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Earth's label anchor before any frame has run.
    const EARTH_ANCHOR: Vec3 = Vec3::new(10.0, 2.0, 0.0);

    fn app_with_camera(camera: Transform) -> (App, Entity) {
        let mut app = App::new();
        app.insert_resource(SolarSystem::from_catalog())
            .init_resource::<OrreryConfig>()
            .insert_resource(Viewport::new(800.0, 600.0))
            .add_systems(Update, sync_labels);
        let label = app
            .world_mut()
            .spawn((Node::default(), Visibility::Hidden, PlanetLabel { planet: 2 }))
            .id();
        app.world_mut().spawn(PlanetVisual { index: 2, label });
        app.world_mut().spawn((
            Projection::Perspective(PerspectiveProjection {
                aspect_ratio: 800.0 / 600.0,
                ..default()
            }),
            camera,
            OrreryCamera,
        ));
        (app, label)
    }

    #[test]
    fn label_follows_planet() {
        let eye = EARTH_ANCHOR + Vec3::Z * 20.0;
        let (mut app, label) = app_with_camera(Transform::from_translation(eye).looking_at(EARTH_ANCHOR, Vec3::Y));
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Visibility>(label), Some(&Visibility::Inherited));
        let node = world.get::<Node>(label).unwrap();
        let (Val::Px(left), Val::Px(top)) = (node.left, node.top) else {
            panic!("label was not positioned: {node:?}");
        };
        // anchor sits in the middle of the screen
        assert_abs_diff_eq!(left, 400.0 - 60.0, epsilon = 1e-3);
        assert_abs_diff_eq!(top, 300.0 - 20.0, epsilon = 1e-3);

        // moving the planet moves the label
        app.world_mut().resource_mut::<SolarSystem>().advance(50.0);
        app.update();
        let node = app.world().get::<Node>(label).unwrap();
        assert_ne!(node.left, Val::Px(left));
    }

    #[test]
    fn hidden_behind_camera() {
        let eye = EARTH_ANCHOR - Vec3::Z * 20.0;
        let (mut app, label) =
            app_with_camera(Transform::from_translation(eye).looking_at(eye - Vec3::Z, Vec3::Y));
        app.update();
        assert_eq!(app.world().get::<Visibility>(label), Some(&Visibility::Hidden));
    }

    #[test]
    fn projection_corners() {
        let projection = PerspectiveProjection {
            aspect_ratio: 2.0,
            ..default()
        };
        let camera = Transform::from_xyz(0.0, 0.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y);
        let screen = Vec2::new(400.0, 200.0);
        let center = project_to_screen(&projection, &camera, screen, Vec3::ZERO).unwrap();
        assert_abs_diff_eq!(center.x, 200.0, epsilon = 1e-3);
        assert_abs_diff_eq!(center.y, 100.0, epsilon = 1e-3);
        // up in the world is up on screen, which is a smaller y
        let above = project_to_screen(&projection, &camera, screen, Vec3::Y).unwrap();
        assert!(above.y < center.y);
        let right = project_to_screen(&projection, &camera, screen, Vec3::X).unwrap();
        assert!(right.x > center.x);
        assert_eq!(project_to_screen(&projection, &camera, screen, Vec3::Z * 20.0), None);
    }
}

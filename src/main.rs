use bevy_gui::prelude::*;
use orrery_client::OrreryPlugin;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Solar System".into(),
                    canvas: Some("#solar-system".into()),
                    fit_canvas_to_parent: true,
                    ..default()
                }),
                ..default()
            }),
            bevy_panorbit_camera::PanOrbitCameraPlugin,
            bevy_egui::EguiPlugin::default(),
            OrreryPlugin,
        ))
        .run();
}

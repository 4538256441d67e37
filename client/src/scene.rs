//! One-time construction of everything that's drawn.

use crate::config::OrreryConfig;
use bevy_gui::asset::RenderAssetUsages;
use bevy_gui::ecs as bevy_ecs;
use bevy_gui::prelude::*;
use bevy_gui::render::mesh::PrimitiveTopology;
use bevy_panorbit_camera::PanOrbitCamera;
use orrery_catalog::{BodyDescriptor, PLANET_SHININESS, SUN};
use orrery_orbit::geometry;
use orrery_orbit::system::SolarSystem;
use orrery_orbit::viewport::Viewport;
use std::f32::consts::FRAC_PI_2;

#[derive(Debug, Component)]
pub struct Sun;

/// A planet's renderable. `index` is its position in [`SolarSystem::planets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct PlanetVisual {
    pub index: usize,
    /// The label that follows this planet
    pub label: Entity,
}

/// Flat ring attached to a planet as a child.
#[derive(Debug, Component)]
pub struct Ring;

/// Screen-space name tag of a planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct PlanetLabel {
    pub planet: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct OrbitGuide {
    pub distance: f64,
}

#[derive(Debug, Component)]
pub struct Starfield;

#[derive(Debug, Component)]
pub struct OrreryCamera;

/// Approximate a Phong shininess exponent as a PBR roughness.
pub fn phong_roughness(shininess: f32) -> f32 {
    (2.0 / (shininess + 2.0)).sqrt().clamp(0.089, 1.0)
}

/// Gray level of a specular color, used as reflectance.
fn specular_reflectance(descriptor: &BodyDescriptor) -> f32 {
    let c = descriptor.specular_color().to_srgba();
    (c.red + c.green + c.blue) / 3.0
}

/// Build the whole scene. Runs once, at startup.
pub fn assemble(
    mut commands: Commands,
    config: Res<OrreryConfig>,
    system: Res<SolarSystem>,
    viewport: Res<Viewport>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    build_sun(&mut commands, &config, &mut meshes, &mut materials);
    build_starfield(&mut commands, &config, &mut meshes, &mut materials);
    let guide_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, config.orbit_opacity),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    for (index, planet) in system.planets().iter().enumerate() {
        build_planet(
            &mut commands,
            &config,
            index,
            planet.descriptor(),
            &mut meshes,
            &mut materials,
        );
        build_orbit_guide(
            &mut commands,
            &config,
            planet.descriptor().distance,
            guide_material.clone(),
            &mut meshes,
        );
    }
    build_camera(&mut commands, &config, &viewport);
    info!(
        "assembled scene with {} planets and {} stars",
        system.planets().len(),
        config.star_count
    );
}

fn build_sun(
    commands: &mut Commands,
    config: &OrreryConfig,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        Mesh3d(
            meshes.add(
                Sphere::new(SUN.radius)
                    .mesh()
                    .uv(config.sphere_resolution, config.sphere_resolution),
            ),
        ),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: SUN.color(),
            emissive: SUN.color().to_linear(),
            unlit: true,
            ..default()
        })),
        Transform::IDENTITY,
        Sun,
        Name::new("sun"),
    ));
    commands.spawn((
        PointLight {
            color: Color::WHITE,
            intensity: config.sun_light_intensity,
            range: config.sun_light_range,
            shadows_enabled: false,
            ..default()
        },
        Transform::IDENTITY,
    ));
    debug!("built sun");
}

fn build_starfield(
    commands: &mut Commands,
    config: &OrreryConfig,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let stars = geometry::starfield(
        &mut rand::thread_rng(),
        config.star_count,
        config.star_spread,
    );
    commands.spawn((
        Mesh3d(
            meshes.add(
                Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD)
                    .with_inserted_attribute(
                        Mesh::ATTRIBUTE_POSITION,
                        stars.iter().map(|s| s.to_array()).collect::<Vec<_>>(),
                    ),
            ),
        ),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::IDENTITY,
        Starfield,
    ));
}

fn build_planet(
    commands: &mut Commands,
    config: &OrreryConfig,
    index: usize,
    descriptor: &BodyDescriptor,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let start = Vec3::new(descriptor.distance as f32, 0.0, 0.0);
    let label = commands
        .spawn((
            Text::new(descriptor.display_name()),
            TextFont {
                font_size: config.label_font_size,
                ..default()
            },
            TextColor(Color::WHITE),
            TextLayout::new_with_justify(JustifyText::Center),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(config.label_width),
                ..default()
            },
            Visibility::Hidden,
            PlanetLabel { planet: index },
        ))
        .id();

    let mut planet = commands.spawn((
        Mesh3d(
            meshes.add(
                Sphere::new(descriptor.radius)
                    .mesh()
                    .uv(config.sphere_resolution, config.sphere_resolution),
            ),
        ),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: descriptor.color(),
            emissive: descriptor.emissive(),
            perceptual_roughness: phong_roughness(PLANET_SHININESS),
            reflectance: specular_reflectance(descriptor),
            ..default()
        })),
        Transform::from_translation(start),
        PlanetVisual { index, label },
        Name::new(descriptor.name),
    ));
    if let Some(ring) = descriptor.ring() {
        planet.with_child((
            Mesh3d(
                meshes.add(
                    Annulus::new(ring.inner, ring.outer)
                        .mesh()
                        .resolution(config.ring_resolution),
                ),
            ),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::from(Srgba {
                    alpha: config.ring_opacity,
                    ..descriptor.color().to_srgba()
                }),
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                double_sided: true,
                cull_mode: None,
                ..default()
            })),
            Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
            Ring,
        ));
    }
    info!(
        "built {} (radius {}, orbit {}, ring: {})",
        descriptor.name,
        descriptor.radius,
        descriptor.distance,
        descriptor.has_ring
    );
}

fn build_orbit_guide(
    commands: &mut Commands,
    config: &OrreryConfig,
    distance: f64,
    material: Handle<StandardMaterial>,
    meshes: &mut Assets<Mesh>,
) {
    let points = geometry::orbit_guide(distance, config.orbit_segments)
        .into_iter()
        .map(|p| p.as_vec3().to_array())
        .collect::<Vec<_>>();
    commands.spawn((
        Mesh3d(
            meshes.add(
                Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::RENDER_WORLD)
                    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, points),
            ),
        ),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        OrbitGuide { distance },
    ));
}

fn build_camera(commands: &mut Commands, config: &OrreryConfig, viewport: &Viewport) {
    let smoothness = config.smoothness();
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.fov_degrees.to_radians(),
            aspect_ratio: viewport.aspect(),
            near: config.near,
            far: config.far,
            ..default()
        }),
        Transform::from_translation(config.camera_position).looking_at(Vec3::ZERO, Vec3::Y),
        PanOrbitCamera {
            focus: Vec3::ZERO,
            zoom_lower_limit: config.min_distance,
            zoom_upper_limit: Some(config.max_distance),
            orbit_smoothness: smoothness,
            pan_smoothness: smoothness,
            zoom_smoothness: smoothness,
            ..default()
        },
        OrreryCamera,
    ));
}

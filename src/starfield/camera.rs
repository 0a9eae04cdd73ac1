use bevy::color::Mix;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;

use super::CameraOrder;
use super::config::StarfieldConfig;
use super::visibility::VisibilityGate;

/// The camera the field is drawn through. It belongs to the mounted field: spawned with it and
/// despawned with it, so every mount starts from the same pose.
#[derive(Component, Debug)]
pub struct StarfieldCamera;

pub fn spawn_starfield_camera(mut commands: Commands, config: Res<StarfieldConfig>) {
    debug!(
        "spawning starfield camera at depth {}",
        config.camera_start_depth
    );
    commands.spawn((
        Name::new("StarfieldCamera"),
        StarfieldCamera,
        Camera3d::default(),
        Camera {
            order: CameraOrder::Starfield.order(),
            clear_color: ClearColorConfig::Custom(config.background),
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: config.camera_fov_degrees.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Tonemapping::AcesFitted,
        Transform::from_xyz(0.0, 0.0, config.camera_start_depth).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

pub fn despawn_starfield_camera(mut commands: Commands, cameras: Query<Entity, With<StarfieldCamera>>) {
    for entity in &cameras {
        commands.entity(entity).despawn();
    }
}

/// The starfield clears to its own background while shown and to the page background
/// (`ClearColor`) while hidden, blended by the gate's opacity through a fade
pub fn update_backdrop(
    config: Res<StarfieldConfig>,
    gate: Res<VisibilityGate>,
    page_background: Res<ClearColor>,
    mut cameras: Query<&mut Camera, With<StarfieldCamera>>,
) {
    let backdrop = page_background.0.mix(&config.background, gate.opacity());
    for mut camera in &mut cameras {
        camera.clear_color = ClearColorConfig::Custom(backdrop);
    }
}

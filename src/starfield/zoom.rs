use bevy::prelude::*;

use super::camera::StarfieldCamera;
use super::config::MotionConfig;
use super::constants::CAMERA_START_DEPTH;
use super::motion::depth_step;
use crate::scroll::SmoothedScroll;

/// Camera depth the scroll position asks for. Written when the smoothed scroll value changes,
/// read once per frame by the zoom.
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Resource)]
pub struct TargetDepth(pub f32);

impl Default for TargetDepth {
    fn default() -> Self { Self(CAMERA_START_DEPTH) }
}

/// Subscriber on the smoothed scroll signal; schedule with
/// `run_if(resource_changed::<SmoothedScroll>)`
pub fn track_scroll_depth(
    smoothed: Res<SmoothedScroll>,
    config: Res<MotionConfig>,
    mut target: ResMut<TargetDepth>,
) {
    target.set_if_neq(TargetDepth(config.target_depth(smoothed.value())));
}

/// Step 4: ease the camera's depth toward the scroll target, re-aiming at the origin
pub fn zoom_camera(
    time: Res<Time>,
    config: Res<MotionConfig>,
    target: Res<TargetDepth>,
    mut cameras: Query<&mut Transform, With<StarfieldCamera>>,
) {
    for mut transform in &mut cameras {
        transform.translation =
            depth_step(transform.translation, target.0, time.delta_secs(), &config);
        transform.look_at(Vec3::ZERO, Vec3::Y);
    }
}

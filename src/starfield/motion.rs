//! Per-frame motion of the starfield, kept free of ECS plumbing so every step can be driven by
//! explicit inputs: elapsed time, pointer position and target depth.

use bevy::prelude::*;

use super::config::MotionConfig;

/// Pointer in normalized device coordinates, or the centred rest position when there is none
/// (touch-only devices, cursor outside the window).
pub fn pointer_or_rest(pointer: Option<Vec2>) -> Vec2 { pointer.unwrap_or(Vec2::ZERO) }

/// Euler rotation (x, y) of the field and where the pointer wants it to be
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Default)]
#[reflect(Component)]
pub struct FieldOrientation {
    pub rotation: Vec2,
    pub target:   Vec2,
}

impl FieldOrientation {
    /// Pointer-move handler: last event wins, no smoothing here
    pub fn aim_at(&mut self, pointer: Vec2, config: &MotionConfig) {
        self.target = Vec2::new(
            pointer.y * config.pointer_rotation_gain.x,
            pointer.x * config.pointer_rotation_gain.y,
        );
    }

    /// Constant drift plus an exponential pull toward the target
    pub fn advance(&mut self, delta_secs: f32, config: &MotionConfig) {
        config.ease(&mut self.rotation, self.target, config.rotation_ease, delta_secs);
        self.rotation += config.rotation_drift * delta_secs;
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0)
    }
}

/// Where pointer parallax wants the camera in x/y
pub fn parallax_target(pointer: Vec2, config: &MotionConfig) -> Vec2 {
    pointer * config.parallax_gain
}

/// Eases the camera's x/y toward the parallax target, depth untouched
pub fn parallax_step(camera: Vec3, pointer: Vec2, delta_secs: f32, config: &MotionConfig) -> Vec3 {
    let mut planar = camera.truncate();
    config.ease(
        &mut planar,
        parallax_target(pointer, config),
        config.parallax_ease,
        delta_secs,
    );
    planar.extend(camera.z)
}

/// Eases the camera's depth toward the scroll-derived target, x/y untouched
pub fn depth_step(camera: Vec3, target_depth: f32, delta_secs: f32, config: &MotionConfig) -> Vec3 {
    let mut depth = camera.z;
    config.ease(&mut depth, target_depth, config.depth_ease, delta_secs);
    camera.with_z(depth)
}

/// Point size and opacity of the shared star material
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Resource)]
pub struct MaterialPulse {
    pub size:    f32,
    pub opacity: f32,
}

impl MaterialPulse {
    pub const fn at_rest(config: &MotionConfig) -> Self {
        Self {
            size:    config.rest_size,
            opacity: config.rest_opacity,
        }
    }

    /// (size, opacity) the pulse is pulled toward for this pointer
    pub fn targets(pointer: Vec2, config: &MotionConfig) -> (f32, f32) {
        let pulse = (pointer.x.abs() + pointer.y.abs()) * config.pulse_gain;
        (config.rest_size + pulse, config.rest_opacity)
    }

    pub fn advance(&mut self, pointer: Vec2, delta_secs: f32, config: &MotionConfig) {
        let (size, opacity) = Self::targets(pointer, config);
        config.ease(&mut self.size, size, config.pulse_ease, delta_secs);
        config.ease(&mut self.opacity, opacity, config.pulse_ease, delta_secs);
    }
}

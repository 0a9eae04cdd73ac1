use bevy::math::StableInterpolate;
use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

use super::constants::*;
use crate::input::Inspector;
use crate::input::toggle_active;

pub struct StarfieldConfigPlugin;

impl Plugin for StarfieldConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<StarfieldConfig>::default()
                .run_if(toggle_active(Inspector::Starfield)),
        )
        .init_resource::<StarfieldConfig>()
        .add_plugins(
            ResourceInspectorPlugin::<MotionConfig>::default()
                .run_if(toggle_active(Inspector::Motion)),
        )
        .init_resource::<MotionConfig>();
    }
}

/// What gets built when the starfield mounts. Edits take effect on the next remount.
#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone)]
#[reflect(Resource, InspectorOptions)]
pub struct StarfieldConfig {
    #[inspector(min = 0, max = 20_000)]
    pub star_count:         usize,
    #[inspector(min = 0.0, max = 500.0, display = NumberDisplay::Slider)]
    pub inner_radius:       f32,
    #[inspector(min = 0.0, max = 500.0, display = NumberDisplay::Slider)]
    pub outer_radius:       f32,
    /// Fixed seed for a reproducible field, `None` draws a fresh one per mount
    pub seed:               Option<u64>,
    #[inspector(min = 2, max = 512)]
    pub sprite_size:        u32,
    pub star_color:         Color,
    pub background:         Color,
    #[inspector(min = 10.0, max = 120.0, display = NumberDisplay::Slider)]
    pub camera_fov_degrees: f32,
    pub camera_start_depth: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_count:         STAR_COUNT,
            inner_radius:       SHELL_INNER_RADIUS,
            outer_radius:       SHELL_OUTER_RADIUS,
            seed:               None,
            sprite_size:        SPRITE_SIZE,
            star_color:         Color::from(STAR_COLOR),
            background:         Color::from(STARFIELD_BACKGROUND),
            camera_fov_degrees: CAMERA_FOV_DEGREES,
            camera_start_depth: CAMERA_START_DEPTH,
        }
    }
}

/// Per-frame tuning of the render loop.
///
/// Ease factors are fractions of the remaining distance covered per frame. With
/// `frame_rate_independent` off they are applied as-is every frame, so the motion runs faster
/// on high refresh displays; with it on they are rescaled by elapsed time against
/// `REFERENCE_FPS`. Rotation drift is always scaled by elapsed time.
#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct MotionConfig {
    /// Constant spin in radians per second around (x, y)
    pub rotation_drift:         Vec2,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub rotation_ease:          f32,
    /// Pointer NDC to target rotation, (pointer.y → x, pointer.x → y)
    pub pointer_rotation_gain:  Vec2,
    /// Pointer NDC to camera offset
    pub parallax_gain:          Vec2,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub parallax_ease:          f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub pulse_gain:             f32,
    pub rest_size:              f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub rest_opacity:           f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub pulse_ease:             f32,
    pub near_depth:             f32,
    pub depth_range:            f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub depth_ease:             f32,
    pub frame_rate_independent: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            rotation_drift:         Vec2::new(0.01, 0.02),
            rotation_ease:          0.08,
            pointer_rotation_gain:  Vec2::new(0.35, -0.55),
            parallax_gain:          Vec2::new(2.0, -1.5),
            parallax_ease:          0.05,
            pulse_gain:             0.1,
            rest_size:              REST_POINT_SIZE,
            rest_opacity:           REST_OPACITY,
            pulse_ease:             0.1,
            near_depth:             CAMERA_START_DEPTH,
            depth_range:            SCROLL_DEPTH_RANGE,
            depth_ease:             0.08,
            frame_rate_independent: false,
        }
    }
}

impl MotionConfig {
    /// Moves `value` `factor` of the way toward `target` for this frame. In frame-rate
    /// independent mode it nudges at the decay rate that covers `factor` per reference frame.
    pub fn ease<T: StableInterpolate + PartialEq>(
        &self,
        value: &mut T,
        target: T,
        factor: f32,
        delta_secs: f32,
    ) {
        if *value == target {
            return;
        }
        if self.frame_rate_independent {
            let decay_rate = -(1.0 - factor).max(f32::EPSILON).ln() * REFERENCE_FPS;
            value.smooth_nudge(&target, decay_rate, delta_secs);
        } else {
            *value = value.interpolate_stable(&target, factor);
        }
    }

    /// Camera depth for a smoothed scroll progress in [0, 1]
    pub fn target_depth(&self, smoothed_progress: f32) -> f32 {
        smoothed_progress.mul_add(self.depth_range, self.near_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_maps_scroll_progress_onto_the_zoom_range() {
        let config = MotionConfig::default();
        assert!((config.target_depth(0.0) - 120.0).abs() < f32::EPSILON);
        assert!((config.target_depth(1.0) - 180.0).abs() < f32::EPSILON);
        assert!((config.target_depth(0.25) - 135.0).abs() < 1e-4);
    }

    #[test]
    fn per_frame_ease_ignores_elapsed_time_by_default() {
        let config = MotionConfig::default();
        let (mut slow, mut fast) = (0.0_f32, 0.0_f32);
        config.ease(&mut slow, 10.0, 0.08, 1.0 / 30.0);
        config.ease(&mut fast, 10.0, 0.08, 1.0 / 144.0);
        assert_eq!(slow, fast);
        assert!((slow - 0.8).abs() < 1e-6);
    }

    #[test]
    fn frame_rate_independent_ease_matches_the_factor_at_the_reference_rate() {
        let config = MotionConfig {
            frame_rate_independent: true,
            ..default()
        };
        let mut one_frame = 0.0_f32;
        config.ease(&mut one_frame, 10.0, 0.08, 1.0 / REFERENCE_FPS);
        assert!((one_frame - 0.8).abs() < 1e-4);

        // two half-length frames land where one reference frame does
        let mut halves = Vec2::ZERO;
        config.ease(&mut halves, Vec2::splat(10.0), 0.08, 0.5 / REFERENCE_FPS);
        config.ease(&mut halves, Vec2::splat(10.0), 0.08, 0.5 / REFERENCE_FPS);
        assert!((halves.x - one_frame).abs() < 1e-4);
        assert!((halves.y - one_frame).abs() < 1e-4);
    }
}

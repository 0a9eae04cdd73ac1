use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::window::CursorEntered;
use bevy::window::CursorLeft;
use bevy::window::CursorMoved;
use bevy::window::PrimaryWindow;

use super::camera::StarfieldCamera;
use super::config::MotionConfig;
use super::config::StarfieldConfig;
use super::field::Star;
use super::field::StarField;
use super::field::StarfieldAssets;
use super::motion::FieldOrientation;
use super::motion::MaterialPulse;
use super::motion::parallax_step;
use super::motion::pointer_or_rest;
use super::visibility::VisibilityGate;

/// Last known pointer position in normalized device coordinates, `None` when there is no
/// pointer over the window
#[derive(Resource, Reflect, Debug, Default, Clone, Copy, PartialEq)]
#[reflect(Resource)]
pub struct PointerState {
    pub ndc: Option<Vec2>,
}

impl PointerState {
    pub fn or_rest(self) -> Vec2 { pointer_or_rest(self.ndc) }
}

/// Converts a window cursor position (origin top-left, y down) to NDC (origin centre, y up)
pub fn cursor_to_ndc(cursor: Vec2, window_size: Vec2) -> Option<Vec2> {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return None;
    }
    let normalized = cursor / window_size;
    Some(Vec2::new(
        normalized.x.mul_add(2.0, -1.0),
        normalized.y.mul_add(-2.0, 1.0),
    ))
}

/// Pointer-move handler. Only listens while the gate is interactive; a hidden field keeps its
/// last pointer and target rotation.
///
/// Leaving the window usually arrives together with a last move at the edge, so a leave makes
/// the pointer absent unless the cursor came back in during the same frame.
pub fn capture_pointer(
    mut cursor_moved: MessageReader<CursorMoved>,
    mut cursor_left: MessageReader<CursorLeft>,
    mut cursor_entered: MessageReader<CursorEntered>,
    windows: Query<&Window, With<PrimaryWindow>>,
    gate: Res<VisibilityGate>,
    config: Res<MotionConfig>,
    mut pointer: ResMut<PointerState>,
    mut fields: Query<&mut FieldOrientation, With<StarField>>,
) {
    let last_move = cursor_moved.read().last().map(|moved| moved.position);
    let left = cursor_left.read().count() > 0;
    let entered = cursor_entered.read().count() > 0;

    if !gate.interactive() {
        return;
    }

    if left && !entered {
        pointer.ndc = None;
        return;
    }

    let Some(position) = last_move else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(ndc) = cursor_to_ndc(position, window.size()) else {
        return;
    };

    pointer.ndc = Some(ndc);
    for mut orientation in &mut fields {
        orientation.aim_at(ndc, &config);
    }
}

/// Step 1: drift plus ease toward the pointer-set rotation
pub fn rotate_field(
    time: Res<Time>,
    config: Res<MotionConfig>,
    mut fields: Query<(&mut FieldOrientation, &mut Transform), With<StarField>>,
) {
    for (mut orientation, mut transform) in &mut fields {
        orientation.advance(time.delta_secs(), &config);
        transform.rotation = orientation.quat();
    }
}

/// Step 2: camera x/y follow the pointer, camera stays aimed at the origin
pub fn parallax_camera(
    time: Res<Time>,
    config: Res<MotionConfig>,
    pointer: Res<PointerState>,
    mut cameras: Query<&mut Transform, With<StarfieldCamera>>,
) {
    for mut transform in &mut cameras {
        transform.translation = parallax_step(
            transform.translation,
            pointer.or_rest(),
            time.delta_secs(),
            &config,
        );
        transform.look_at(Vec3::ZERO, Vec3::Y);
    }
}

/// Step 3: point size swells with pointer distance from centre, opacity settles
pub fn pulse_material(
    time: Res<Time>,
    config: Res<MotionConfig>,
    pointer: Res<PointerState>,
    pulse: Option<ResMut<MaterialPulse>>,
) {
    if let Some(mut pulse) = pulse {
        pulse.advance(pointer.or_rest(), time.delta_secs(), &config);
    }
}

/// Turns every star sprite to face the camera and sizes it by the material pulse.
///
/// The stars are children of the rotating field, so the local rotation that makes them
/// screen-aligned is the field rotation undone, then the camera's.
pub fn orient_stars(
    pulse: Option<Res<MaterialPulse>>,
    fields: Query<&FieldOrientation, With<StarField>>,
    cameras: Query<&Transform, (With<StarfieldCamera>, Without<Star>)>,
    mut stars: Query<&mut Transform, With<Star>>,
) {
    let (Some(pulse), Ok(orientation), Ok(camera)) = (pulse, fields.single(), cameras.single())
    else {
        return;
    };

    let rotation = orientation.quat().inverse() * camera.rotation;
    let scale = Vec3::splat(pulse.size);
    for mut transform in &mut stars {
        transform.rotation = rotation;
        transform.scale = scale;
    }
}

/// Pushes pulse opacity times gate opacity into the shared star material
pub fn apply_material_opacity(
    config: Res<StarfieldConfig>,
    gate: Res<VisibilityGate>,
    pulse: Option<Res<MaterialPulse>>,
    assets: Option<Res<StarfieldAssets>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let (Some(pulse), Some(assets)) = (pulse, assets) else {
        return;
    };
    let base_color = config
        .star_color
        .with_alpha(pulse.opacity * gate.opacity());
    // `get_mut` marks the material modified and re-uploads it, so only touch it on change
    match materials.get(&assets.material) {
        Some(material) if material.base_color == base_color => {},
        Some(_) => {
            if let Some(material) = materials.get_mut(&assets.material) {
                material.base_color = base_color;
            }
        },
        None => warn!("star material missing while the field is mounted"),
    }
}

/// Skips drawing the field once it has fully faded out. Only visibility changes here; the
/// loop keeps advancing the hidden field.
pub fn apply_gate_visibility(
    gate: Res<VisibilityGate>,
    mut fields: Query<&mut Visibility, With<StarField>>,
) {
    let visibility = if gate.opacity() > 0.0 {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut current in &mut fields {
        current.set_if_neq(visibility);
    }
}

pub fn tick_visibility_gate(time: Res<Time>, mut gate: ResMut<VisibilityGate>) {
    if gate.is_fading() {
        gate.tick(time.delta_secs());
    }
}

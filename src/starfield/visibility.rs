use bevy::math::cubic_splines::CubicSegment;
use bevy::prelude::*;

/// Length of a fade between shown and hidden, in seconds
pub const FADE_SECONDS: f32 = 0.5;

/// CSS `ease-out`, `cubic-bezier(0, 0, 0.58, 1)`
pub fn ease_out() -> CubicSegment<Vec2> {
    CubicSegment::new_bezier_easing(Vec2::ZERO, Vec2::new(0.58, 1.0))
}

/// Fades the whole starfield in and out and decides whether it reacts to the pointer.
///
/// The render loop never stops for the gate: hiding only drives opacity to zero, so the field's
/// rotation, camera and particles are exactly where they were when it is shown again.
#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
#[reflect(Resource)]
pub struct VisibilityGate {
    visible: bool,
    opacity: f32,
    fade:    Option<Fade>,
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
struct Fade {
    from:    f32,
    to:      f32,
    elapsed: f32,
}

impl Default for VisibilityGate {
    fn default() -> Self { Self::new(true) }
}

impl VisibilityGate {
    /// Starts settled, the first value is applied without animating
    pub const fn new(visible: bool) -> Self {
        Self {
            visible,
            opacity: if visible { 1.0 } else { 0.0 },
            fade: None,
        }
    }

    pub const fn visible(&self) -> bool { self.visible }

    pub const fn opacity(&self) -> f32 { self.opacity }

    /// Pointer input only reaches the field while it is meant to be shown, so a field that is
    /// fading out already lets the page content underneath have the pointer
    pub const fn interactive(&self) -> bool { self.visible }

    pub const fn is_fading(&self) -> bool { self.fade.is_some() }

    /// Retargets the fade. Flipping mid-fade starts over from the current opacity.
    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        self.fade = Some(Fade {
            from:    self.opacity,
            to:      if visible { 1.0 } else { 0.0 },
            elapsed: 0.0,
        });
    }

    pub fn tick(&mut self, delta_secs: f32) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };
        fade.elapsed += delta_secs;
        let progress = (fade.elapsed / FADE_SECONDS).clamp(0.0, 1.0);
        self.opacity = (fade.to - fade.from).mul_add(ease_out().ease(progress), fade.from);
        if progress >= 1.0 {
            self.opacity = fade.to;
            self.fade = None;
        }
    }
}

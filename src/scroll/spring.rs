use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;

/// Damped harmonic spring the raw scroll progress is filtered through.
///
/// The defaults (stiffness 120, damping 22, mass 1) give a damping ratio just above one, so a
/// step from rest settles without overshoot.
#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct SpringConfig {
    #[inspector(min = 1.0, max = 1000.0, display = NumberDisplay::Slider)]
    pub stiffness:  f32,
    #[inspector(min = 0.0, max = 100.0, display = NumberDisplay::Slider)]
    pub damping:    f32,
    #[inspector(min = 0.01, max = 10.0, display = NumberDisplay::Slider)]
    pub mass:       f32,
    /// Displacement below which the spring may snap onto its target
    pub rest_delta: f32,
    /// Speed below which the spring may snap onto its target
    pub rest_speed: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness:  120.0,
            damping:    22.0,
            mass:       1.0,
            rest_delta: 0.005,
            rest_speed: 0.01,
        }
    }
}

impl SpringConfig {
    /// `damping / (2 * sqrt(stiffness * mass))`; 1 is critical
    pub fn damping_ratio(&self) -> f32 { self.damping / (2.0 * (self.stiffness * self.mass).sqrt()) }

    fn sanitized(self) -> Self {
        if self.stiffness > 0.0 && self.mass > 0.0 && self.damping >= 0.0 {
            self
        } else {
            warn!(
                "invalid scroll spring (stiffness {}, damping {}, mass {}), using defaults",
                self.stiffness, self.damping, self.mass
            );
            Self::default()
        }
    }
}

/// Position and velocity of a spring
#[derive(Reflect, Debug, Default, Clone, Copy, PartialEq)]
pub struct SpringState {
    pub value:    f32,
    pub velocity: f32,
}

impl SpringState {
    pub const fn at(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
        }
    }

    pub fn is_at_rest(&self, target: f32, config: &SpringConfig) -> bool {
        (self.value - target).abs() < config.rest_delta && self.velocity.abs() < config.rest_speed
    }

    /// Advances `delta_secs` toward `target` using the closed-form solution of the spring, so
    /// the trajectory does not depend on how the time is sliced into frames.
    pub fn step(self, target: f32, delta_secs: f32, config: &SpringConfig) -> Self {
        if delta_secs <= 0.0 {
            return self;
        }
        let config = config.sanitized();
        let omega = (config.stiffness / config.mass).sqrt();
        let zeta = config.damping_ratio();
        let x0 = self.value - target;
        let v0 = self.velocity;
        let t = delta_secs;

        let (x, v) = if (zeta - 1.0).abs() < 1e-4 {
            // critically damped
            let b = omega.mul_add(x0, v0);
            let decay = (-omega * t).exp();
            (decay * b.mul_add(t, x0), decay * (-omega * b).mul_add(t, v0))
        } else if zeta < 1.0 {
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega * t).exp();
            let (sin, cos) = (damped * t).sin_cos();
            let b = (zeta * omega).mul_add(x0, v0) / damped;
            let x = decay * x0.mul_add(cos, b * sin);
            let v = decay
                * ((b * damped - zeta * omega * x0) * cos - (x0 * damped + zeta * omega * b) * sin);
            (x, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c2 = r1.mul_add(-x0, v0) / (r2 - r1);
            let c1 = x0 - c2;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (c1.mul_add(e1, c2 * e2), (r1 * c1).mul_add(e1, r2 * c2 * e2))
        };

        let next = Self {
            value:    target + x,
            velocity: v,
        };
        if next.is_at_rest(target, &config) {
            Self::at(target)
        } else {
            next
        }
    }
}

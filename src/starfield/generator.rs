use std::f32::consts::PI;
use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::Uniform;
use rand::rngs::StdRng;

use super::constants::SHELL_INNER_RADIUS;
use super::constants::SHELL_OUTER_RADIUS;

/// The star positions of one mount. Built once when the field mounts and never touched again
/// until it is dropped on unmount.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ParticleSet {
    positions: Vec<Vec3>,
    seed:      u64,
}

impl ParticleSet {
    pub fn positions(&self) -> &[Vec3] { &self.positions }

    pub fn len(&self) -> usize { self.positions.len() }

    pub fn is_empty(&self) -> bool { self.positions.is_empty() }

    pub const fn seed(&self) -> u64 { self.seed }
}

/// Spherical shell the particles are sampled in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shell {
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl Default for Shell {
    fn default() -> Self {
        Self {
            inner_radius: SHELL_INNER_RADIUS,
            outer_radius: SHELL_OUTER_RADIUS,
        }
    }
}

impl Shell {
    /// Falls back to the default shell when the radii can't describe an annulus
    pub fn or_default(self) -> Self {
        let valid = self.inner_radius.is_finite()
            && self.outer_radius.is_finite()
            && self.inner_radius >= 0.0
            && self.inner_radius <= self.outer_radius;
        if valid {
            self
        } else {
            warn!(
                "invalid star shell (inner {}, outer {}), using {}..{}",
                self.inner_radius, self.outer_radius, SHELL_INNER_RADIUS, SHELL_OUTER_RADIUS
            );
            Self::default()
        }
    }
}

/// Samples `count` points on random spherical shells.
///
/// Each point gets a radius uniform in `[inner, outer]`, an azimuth uniform in `[0, 2π)` and a
/// polar angle uniform in `[0, π]`. Sampling the polar angle directly (rather than its cosine)
/// crowds points toward the poles, which is what gives the field its look when it spins.
pub fn generate_particles(count: usize, shell: Shell, seed: Option<u64>) -> ParticleSet {
    let shell = shell.or_default();
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let (Ok(radius), Ok(azimuth), Ok(polar)) = (
        Uniform::new_inclusive(shell.inner_radius, shell.outer_radius),
        Uniform::new(0.0, TAU),
        Uniform::new_inclusive(0.0, PI),
    ) else {
        warn!("could not build star distributions, generating no stars");
        return ParticleSet {
            positions: Vec::new(),
            seed,
        };
    };

    let positions = (0..count)
        .map(|_| {
            let r: f32 = radius.sample(&mut rng);
            let theta: f32 = azimuth.sample(&mut rng);
            let phi: f32 = polar.sample(&mut rng);
            spherical_to_cartesian(r, theta, phi)
        })
        .collect();

    debug!("generated {count} stars with seed {seed}");
    ParticleSet { positions, seed }
}

fn spherical_to_cartesian(radius: f32, theta: f32, phi: f32) -> Vec3 {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(
        radius * sin_phi * cos_theta,
        radius * sin_phi * sin_theta,
        radius * cos_phi,
    )
}

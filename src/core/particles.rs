// Background particle field and sparkle layers.
//
// Every particle is an independent closed-form function of elapsed time; no
// state accumulates between frames, so the animation can be restarted or
// seeked by evaluating at any `t`.

use super::constants::*;
use super::palette::{linear_from_hex, BLUE, PURPLE};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Spawn volume for the particle field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldBounds {
    pub half_x: f32,
    pub half_y: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            half_x: PARTICLE_HALF_EXTENT[0],
            half_y: PARTICLE_HALF_EXTENT[1],
            z_min: PARTICLE_Z_RANGE[0],
            z_max: PARTICLE_Z_RANGE[1],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub base: Vec3,
    pub phase: f32,
    pub speed: f32,
    pub color: Vec3,
    pub size: f32,
}

impl Particle {
    #[inline]
    pub fn position_at(&self, t: f32) -> Vec3 {
        let u = t * self.speed + self.phase;
        self.base
            + Vec3::new(
                (u * PARTICLE_WANDER_X_FREQ).cos() * PARTICLE_WANDER_X,
                u.sin() * PARTICLE_WANDER_Y,
                0.0,
            )
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
}

impl ParticleField {
    pub fn generate<R: Rng>(count: usize, bounds: &FieldBounds, rng: &mut R) -> Self {
        let blue = linear_from_hex(BLUE);
        let purple = linear_from_hex(PURPLE);
        let particles = (0..count)
            .map(|_| Particle {
                base: Vec3::new(
                    rng.gen_range(-bounds.half_x..=bounds.half_x),
                    rng.gen_range(-bounds.half_y..=bounds.half_y),
                    rng.gen_range(bounds.z_min..=bounds.z_max),
                ),
                phase: rng.gen_range(0.0..TAU),
                speed: rng.gen_range(PARTICLE_SPEED_RANGE[0]..=PARTICLE_SPEED_RANGE[1]),
                color: if rng.gen_bool(0.5) { blue } else { purple },
                size: rng.gen_range(PARTICLE_SIZE_RANGE[0]..=PARTICLE_SIZE_RANGE[1]),
            })
            .collect();
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Write every particle's position at `t` into `out` (truncated to the
    /// shorter of the two).
    pub fn write_positions(&self, t: f32, out: &mut [Vec3]) {
        for (p, slot) in self.particles.iter().zip(out.iter_mut()) {
            *slot = p.position_at(t);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sparkle {
    pub base: Vec3,
    pub phase: Vec3,
    pub drift: Vec3,
    pub speed: f32,
    pub opacity: f32,
}

impl Sparkle {
    #[inline]
    pub fn position_at(&self, t: f32) -> Vec3 {
        let u = t * self.speed;
        self.base
            + Vec3::new(
                (u + self.phase.x).sin() * self.drift.x,
                (u * 0.8 + self.phase.y).sin() * self.drift.y,
                (u * 0.6 + self.phase.z).cos() * self.drift.z,
            )
    }

    /// Twinkle in [0, opacity].
    #[inline]
    pub fn opacity_at(&self, t: f32) -> f32 {
        let u = t * self.speed * 6.0 + self.phase.x;
        self.opacity * 0.5 * (1.0 + u.sin())
    }
}

/// A layer of small twinkling points spread through a box around the origin.
#[derive(Clone, Debug)]
pub struct SparkleCloud {
    pub sparkles: Vec<Sparkle>,
    pub color: Vec3,
    pub size: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct SparkleLayer {
    pub count: usize,
    pub scale: Vec3,
    pub color: u32,
    pub speed: f32,
    pub opacity: f32,
    pub size: f32,
}

pub const DEFAULT_SPARKLE_LAYERS: [SparkleLayer; 2] = [
    SparkleLayer {
        count: 60,
        scale: Vec3::new(20.0, 12.0, 6.0),
        color: BLUE,
        speed: 0.2,
        opacity: 0.4,
        size: 0.06,
    },
    SparkleLayer {
        count: 40,
        scale: Vec3::new(18.0, 10.0, 5.0),
        color: PURPLE,
        speed: 0.15,
        opacity: 0.3,
        size: 0.045,
    },
];

impl SparkleCloud {
    pub fn generate<R: Rng>(layer: &SparkleLayer, rng: &mut R) -> Self {
        let half = layer.scale * 0.5;
        let drift = layer.scale * SPARKLE_DRIFT;
        let sparkles = (0..layer.count)
            .map(|_| Sparkle {
                base: Vec3::new(
                    rng.gen_range(-half.x..=half.x),
                    rng.gen_range(-half.y..=half.y),
                    rng.gen_range(-half.z..=half.z),
                ),
                phase: Vec3::new(
                    rng.gen_range(0.0..TAU),
                    rng.gen_range(0.0..TAU),
                    rng.gen_range(0.0..TAU),
                ),
                drift,
                speed: layer.speed * rng.gen_range(0.5..=1.5),
                opacity: layer.opacity,
            })
            .collect();
        Self {
            sparkles,
            color: linear_from_hex(layer.color),
            size: layer.size,
        }
    }

    pub fn len(&self) -> usize {
        self.sparkles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparkles.is_empty()
    }
}

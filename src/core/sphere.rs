// The central memory sphere: a floating core body with two orbital rings.

use super::connector::{write_segment, SEGMENT_FLOATS};
use super::constants::*;
use super::palette::{linear_from_hex, rgba, BLUE, PURPLE};
use super::particles::SparkleLayer;
use super::sprite::{SpriteInstance, SpriteShading};
use glam::{EulerRot, Mat3, Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

const BODY_COLOR: u32 = 0x4a90d9;
const BODY_OPACITY: f32 = 0.85;
const HALO_SCALE: f32 = 1.4;
const HALO_OPACITY: f32 = 0.1;

/// Sparkles hugging the sphere; they float with it.
pub const CORE_SPARKLE_LAYER: SparkleLayer = SparkleLayer {
    count: 40,
    scale: Vec3::new(5.0, 5.0, 5.0),
    color: BLUE,
    speed: 0.3,
    opacity: 0.5,
    size: 0.05,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub radius: f32,
    pub color: Vec3,
    pub opacity: f32,
}

impl Ring {
    /// Ring orientation at `t` as XYZ Euler angles.
    pub fn euler_at(index: usize, t: f32) -> [f32; 3] {
        match index {
            0 => [FRAC_PI_2 + (t * 0.5).sin() * 0.15, 0.0, t * 0.3],
            _ => [FRAC_PI_3, t * 0.1, -t * 0.2],
        }
    }
}

#[derive(Clone, Debug)]
pub struct MemorySphere {
    pub radius: f32,
    pub rings: [Ring; 2],
}

impl Default for MemorySphere {
    fn default() -> Self {
        Self {
            radius: CORE_RADIUS,
            rings: [
                Ring {
                    radius: 2.2,
                    color: linear_from_hex(BLUE),
                    opacity: 0.5,
                },
                Ring {
                    radius: 2.5,
                    color: linear_from_hex(PURPLE),
                    opacity: 0.4,
                },
            ],
        }
    }
}

impl MemorySphere {
    /// Gentle bob and wobble applied to the sphere group.
    pub fn float_transform(&self, t: f32) -> Mat4 {
        let u = t / 4.0 * CORE_FLOAT_SPEED;
        let rot = Mat3::from_euler(
            EulerRot::XYZ,
            u.cos() / 8.0 * CORE_ROTATION_INTENSITY,
            u.sin() / 8.0 * CORE_ROTATION_INTENSITY,
            u.sin() / 20.0 * CORE_ROTATION_INTENSITY,
        );
        let y = u.sin() / 10.0 * CORE_FLOAT_INTENSITY;
        Mat4::from_translation(Vec3::new(0.0, y, 0.0)) * Mat4::from_mat3(rot)
    }

    pub fn center_at(&self, t: f32) -> Vec3 {
        self.float_transform(t).transform_point3(Vec3::ZERO)
    }

    /// Body impostor and its halo shell.
    pub fn core_sprites(&self, t: f32) -> [SpriteInstance; 2] {
        let c = self.center_at(t).to_array();
        [
            SpriteInstance::new(
                c,
                self.radius * HALO_SCALE,
                rgba(BLUE, HALO_OPACITY),
                SpriteShading::Halo,
            ),
            SpriteInstance::new(
                c,
                self.radius,
                rgba(BODY_COLOR, BODY_OPACITY),
                SpriteShading::Sphere,
            ),
        ]
    }

    pub fn ring_float_count(&self) -> usize {
        self.rings.len() * RING_SEGMENTS * SEGMENT_FLOATS
    }

    /// Replace `out` with both rings as line segments at time `t`.
    pub fn write_rings(&self, t: f32, out: &mut Vec<f32>) {
        out.clear();
        out.resize(self.ring_float_count(), 0.0);
        let float = self.float_transform(t);
        let mut k = 0;
        for (ri, ring) in self.rings.iter().enumerate() {
            let [ex, ey, ez] = Ring::euler_at(ri, t);
            let m = float * Mat4::from_mat3(Mat3::from_euler(EulerRot::XYZ, ex, ey, ez));
            let point = |s: usize| {
                let a = s as f32 / RING_SEGMENTS as f32 * TAU;
                m.transform_point3(Vec3::new(a.cos() * ring.radius, a.sin() * ring.radius, 0.0))
            };
            let mut prev = point(0);
            for s in 1..=RING_SEGMENTS {
                let next = point(s);
                write_segment(&mut out[k..], prev, next, ring.color, ring.opacity);
                k += SEGMENT_FLOATS;
                prev = next;
            }
        }
    }
}

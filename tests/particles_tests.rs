// Host-side tests for the particle field and sparkle layers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod palette {
    include!("../src/core/palette.rs");
}
mod particles {
    include!("../src/core/particles.rs");
}

use constants::*;
use glam::Vec3;
use particles::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn field(count: usize, seed: u64) -> ParticleField {
    let mut rng = StdRng::seed_from_u64(seed);
    ParticleField::generate(count, &FieldBounds::default(), &mut rng)
}

#[test]
fn generation_is_deterministic_per_seed() {
    assert_eq!(field(30, 7).particles, field(30, 7).particles);
    assert_ne!(field(30, 7).particles, field(30, 8).particles);
}

#[test]
fn bases_lie_inside_the_spawn_volume() {
    let b = FieldBounds::default();
    for p in &field(500, 1).particles {
        assert!(p.base.x.abs() <= b.half_x);
        assert!(p.base.y.abs() <= b.half_y);
        assert!(p.base.z >= b.z_min && p.base.z <= b.z_max);
        assert!(p.speed >= PARTICLE_SPEED_RANGE[0] && p.speed <= PARTICLE_SPEED_RANGE[1]);
        assert!(p.size >= PARTICLE_SIZE_RANGE[0] && p.size <= PARTICLE_SIZE_RANGE[1]);
    }
}

#[test]
fn particles_wander_within_bounds_and_keep_depth() {
    let f = field(50, 3);
    for step in 0..400 {
        let t = step as f32 * 0.37;
        for p in &f.particles {
            let d = p.position_at(t) - p.base;
            assert!(d.x.abs() <= PARTICLE_WANDER_X + 1e-5);
            assert!(d.y.abs() <= PARTICLE_WANDER_Y + 1e-5);
            assert_eq!(d.z, 0.0);
        }
    }
}

#[test]
fn particle_motion_follows_closed_form() {
    let p = Particle {
        base: Vec3::new(1.0, 2.0, -1.0),
        phase: 0.0,
        speed: 0.5,
        color: Vec3::ONE,
        size: 0.1,
    };
    let t: f32 = 2.0;
    let u: f32 = t * 0.5;
    let expected = Vec3::new(
        1.0 + (u * 0.7).cos() * 0.2,
        2.0 + u.sin() * 0.3,
        -1.0,
    );
    assert!(p.position_at(t).distance(expected) < 1e-6);
}

#[test]
fn write_positions_truncates_to_shorter_side() {
    let f = field(10, 4);
    let mut out = vec![Vec3::splat(99.0); 4];
    f.write_positions(1.5, &mut out);
    for (i, v) in out.iter().enumerate() {
        assert_eq!(*v, f.particles[i].position_at(1.5));
    }
}

#[test]
fn empty_field_is_fine() {
    let f = field(0, 1);
    assert!(f.is_empty());
    f.write_positions(1.0, &mut []);
}

#[test]
fn sparkles_twinkle_within_layer_opacity() {
    let mut rng = StdRng::seed_from_u64(11);
    for layer in DEFAULT_SPARKLE_LAYERS.iter() {
        let cloud = SparkleCloud::generate(layer, &mut rng);
        assert_eq!(cloud.len(), layer.count);
        for s in &cloud.sparkles {
            for step in 0..100 {
                let t = step as f32 * 0.21;
                let a = s.opacity_at(t);
                assert!(a >= 0.0 && a <= layer.opacity + 1e-6);
                let d = s.position_at(t) - s.base;
                let drift = layer.scale * SPARKLE_DRIFT;
                assert!(d.abs().cmple(drift + Vec3::splat(1e-5)).all());
            }
        }
    }
}

#[test]
fn sparkle_bases_fill_the_layer_box() {
    let mut rng = StdRng::seed_from_u64(5);
    let layer = DEFAULT_SPARKLE_LAYERS[0];
    let cloud = SparkleCloud::generate(&layer, &mut rng);
    let half = layer.scale * 0.5;
    for s in &cloud.sparkles {
        assert!(s.base.abs().cmple(half).all());
    }
}

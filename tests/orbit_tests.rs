// Host-side tests for the orbiting-node cluster.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod palette {
    include!("../src/core/palette.rs");
}
mod snapshot {
    include!("../src/core/snapshot.rs");
}
mod orbit {
    include!("../src/core/orbit.rs");
}

use constants::*;
use glam::Vec3;
use orbit::*;
use palette::Hue;
use rand::rngs::StdRng;
use rand::SeedableRng;
use snapshot::PositionTable;

fn cluster(count: usize, seed: u64) -> OrbitCluster {
    let mut rng = StdRng::seed_from_u64(seed);
    OrbitCluster::generate(count, CORE_RADIUS, &mut rng)
}

#[test]
fn proximity_is_one_at_the_core_and_zero_past_falloff() {
    assert_eq!(proximity(Vec3::ZERO, 1.5), 1.0);
    assert_eq!(proximity(Vec3::new(1.5, 0.0, 0.0), 1.5), 1.0);
    assert!((proximity(Vec3::new(0.0, 2.5, 0.0), 1.5) - 0.5).abs() < 1e-6);
    assert_eq!(proximity(Vec3::new(0.0, 0.0, 3.5), 1.5), 0.0);
    assert_eq!(proximity(Vec3::new(0.0, 0.0, 30.0), 1.5), 0.0);
}

#[test]
fn node_parameters_stay_in_range() {
    let c = cluster(200, 9);
    for (i, n) in c.nodes.iter().enumerate() {
        assert_eq!(n.index, i);
        assert!(n.orbit_radius >= ORBIT_RADIUS_RANGE[0] && n.orbit_radius <= ORBIT_RADIUS_RANGE[1]);
        assert!(n.angular_speed >= ORBIT_SPEED_RANGE[0] && n.angular_speed <= ORBIT_SPEED_RANGE[1]);
        assert!(n.tilt[0].abs() <= ORBIT_TILT_MAX && n.tilt[1].abs() <= ORBIT_TILT_MAX);
        assert_eq!(n.hue, Hue::from_index(i));
    }
}

#[test]
fn position_starts_on_the_x_axis_at_zero_phase() {
    let n = OrbitNode {
        index: 0,
        orbit_radius: 2.0,
        angular_speed: 0.5,
        hue: Hue::Cyan,
        phase: 0.0,
        tilt: [0.3, -0.2],
        pulse_phase: 0.0,
    };
    assert!(n.position_at(0.0).distance(Vec3::new(2.0, 0.0, 0.0)) < 1e-6);
}

#[test]
fn orbit_stays_on_its_tilted_circle_plus_bob() {
    let c = cluster(50, 2);
    for n in &c.nodes {
        for step in 0..200 {
            let t = step as f32 * 0.13;
            let p = n.position_at(t);
            let u = t * n.angular_speed + n.phase;
            let unbobbed = p - Vec3::new(0.0, (0.5 * u).sin() * ORBIT_BOB_AMPLITUDE, 0.0);
            assert!(unbobbed.length() <= n.orbit_radius + 1e-4);
        }
    }
}

#[test]
fn visuals_grow_toward_the_core() {
    let c = cluster(100, 4);
    for n in &c.nodes {
        let v = c.visual_at(n, 1.25);
        let lo = NODE_BASE_SIZE * (1.0 - NODE_PULSE_AMOUNT) - 1e-6;
        let hi = NODE_MAX_SIZE * (1.0 + NODE_PULSE_AMOUNT) + 1e-6;
        assert!(v.size >= lo && v.size <= hi);
        assert!((0.0..=1.0).contains(&v.proximity));
        assert_eq!(v.proximity, proximity(v.position, CORE_RADIUS));
        assert_eq!(v.color, n.hue.shade(v.proximity));
    }
}

#[test]
fn tick_publishes_every_node_at_its_index() {
    let c = cluster(24, 6);
    let mut table = PositionTable::new(24);
    let mut visuals = vec![NodeVisual::default(); 24];
    c.tick(3.0, &mut table, &mut visuals);
    for n in &c.nodes {
        assert_eq!(table.get(n.index), Some(n.position_at(3.0)));
        assert_eq!(visuals[n.index].position, n.position_at(3.0));
    }
}

#[test]
fn tick_with_short_table_ignores_extra_nodes() {
    let c = cluster(10, 6);
    let mut table = PositionTable::new(4);
    let mut visuals = vec![NodeVisual::default(); 4];
    c.tick(1.0, &mut table, &mut visuals);
    assert_eq!(table.len(), 4);
    assert_eq!(table.get(3), Some(c.nodes[3].position_at(1.0)));
    assert_eq!(table.get(4), None);
}

#[test]
fn empty_cluster_ticks_without_effect() {
    let c = cluster(0, 1);
    assert!(c.is_empty());
    let mut table = PositionTable::new(0);
    c.tick(1.0, &mut table, &mut []);
    assert!(table.is_empty());
}

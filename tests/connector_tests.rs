// Host-side tests for the proximity connector and its grid broad phase.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod palette {
    include!("../src/core/palette.rs");
}
mod params {
    include!("../src/core/params.rs");
}
mod spatial {
    include!("../src/core/spatial.rs");
}
mod connector {
    include!("../src/core/connector.rs");
}

use connector::*;
use glam::Vec3;
use params::OpacityMode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use spatial::SpatialGrid;

const FADING: OpacityMode = OpacityMode::Fading { base: 0.35 };

fn connector(nodes: usize) -> ProximityConnector {
    ProximityConnector::new(nodes, 2.5, FADING, Vec3::new(0.0, 0.2, 0.6))
}

/// Reference all-pairs result.
fn brute_pairs(positions: &[Vec3], threshold: f32) -> Vec<[u32; 2]> {
    let mut out = Vec::new();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            if positions[i].distance(positions[j]) < threshold {
                out.push([i as u32, j as u32]);
            }
        }
    }
    out
}

fn random_positions(n: usize, extent: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            )
        })
        .collect()
}

#[test]
fn pair_count_matches_formula() {
    assert_eq!(pair_count(0), 0);
    assert_eq!(pair_count(1), 0);
    assert_eq!(pair_count(2), 1);
    assert_eq!(pair_count(24), 276);
    assert_eq!(pair_count(40), 780);
}

#[test]
fn buffer_is_sized_for_every_pair() {
    let c = connector(24);
    assert_eq!(c.buffer().capacity(), 276);
    assert_eq!(c.buffer().raw().len(), 276 * SEGMENT_FLOATS);
    assert_eq!(c.segment_count(), 0);
}

#[test]
fn no_nodes_or_one_node_draw_nothing() {
    let mut c = connector(0);
    assert_eq!(c.rebuild(&[]), 0);
    let mut c = connector(1);
    assert_eq!(c.rebuild(&[Vec3::ZERO]), 0);
    assert!(c.buffer().vertex_floats().is_empty());
}

#[test]
fn threshold_is_strict() {
    let mut c = connector(2);
    assert_eq!(c.rebuild(&[Vec3::ZERO, Vec3::new(2.5, 0.0, 0.0)]), 0);
    assert_eq!(c.rebuild(&[Vec3::ZERO, Vec3::new(2.49, 0.0, 0.0)]), 1);
}

#[test]
fn segment_holds_both_endpoints_and_fading_alpha() {
    let mut c = connector(2);
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(1.0, 2.0, 3.5);
    assert_eq!(c.rebuild(&[a, b]), 1);
    let seg = c.buffer().segment(0).expect("one segment");
    let alpha = (0.35f32 * (1.0 - 0.5 / 2.5)).max(0.1);
    assert_eq!(&seg[0..3], &[1.0, 2.0, 3.0]);
    assert_eq!(&seg[7..10], &[1.0, 2.0, 3.5]);
    assert!((seg[6] - alpha).abs() < 1e-6);
    assert!((seg[13] - alpha).abs() < 1e-6);
    assert_eq!(&seg[3..6], &[0.0, 0.2, 0.6]);
    assert!(c.buffer().segment(1).is_none());
}

#[test]
fn fading_opacity_floors_at_minimum() {
    assert!((FADING.opacity(0.0, 2.5) - 0.35).abs() < 1e-6);
    assert_eq!(FADING.opacity(2.4, 2.5), 0.1);
    assert_eq!(OpacityMode::Constant(0.25).opacity(2.4, 2.5), 0.25);
}

#[test]
fn pairs_are_emitted_in_lexicographic_order() {
    let positions = vec![
        Vec3::ZERO,
        Vec3::new(0.5, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
    ];
    let mut c = connector(4);
    assert_eq!(c.rebuild(&positions), 3);
    assert_eq!(c.pairs(), &[[0, 1], [0, 2], [1, 2]]);
}

#[test]
fn all_pairs_path_matches_reference() {
    let positions = random_positions(40, 4.0, 21);
    let mut c = connector(40);
    let n = c.rebuild(&positions);
    let expected = brute_pairs(&positions, 2.5);
    assert_eq!(n, expected.len());
    assert_eq!(c.pairs(), expected.as_slice());
}

#[test]
fn grid_path_matches_all_pairs() {
    let positions = random_positions(320, 8.0, 77);
    let mut c = connector(320);
    let n = c.rebuild(&positions);
    let expected = brute_pairs(&positions, 2.5);
    assert!(n > 0);
    assert_eq!(n, expected.len());
    assert_eq!(c.pairs(), expected.as_slice());
}

#[test]
fn stale_tail_is_zeroed_when_fewer_pairs_qualify() {
    let mut c = connector(6);
    let clustered = vec![Vec3::ZERO; 6];
    assert_eq!(c.rebuild(&clustered), 15);
    let spread: Vec<Vec3> = (0..6).map(|i| Vec3::new(i as f32 * 10.0, 0.0, 0.0)).collect();
    assert_eq!(c.rebuild(&spread), 0);
    assert!(c.buffer().raw().iter().all(|v| *v == 0.0));
}

#[test]
fn extra_nodes_beyond_capacity_are_ignored() {
    let mut c = connector(3);
    let positions = vec![Vec3::ZERO; 5];
    assert_eq!(c.rebuild(&positions), 3);
    assert!(c.pairs().iter().all(|[i, j]| *i < 3 && *j < 3));
}

#[test]
fn rebuild_is_deterministic() {
    let positions = random_positions(40, 3.0, 5);
    let mut a = connector(40);
    let mut b = connector(40);
    a.rebuild(&positions);
    b.rebuild(&positions);
    assert_eq!(a.buffer().raw(), b.buffer().raw());
}

#[test]
fn grid_neighbors_cover_the_query_radius() {
    let positions = random_positions(200, 5.0, 13);
    let mut grid = SpatialGrid::new(2.5);
    grid.rebuild(&positions);
    for (i, p) in positions.iter().enumerate() {
        let mut found: SmallVec<[u32; 64]> = SmallVec::new();
        grid.neighbors(*p, &mut found);
        assert!(found.contains(&(i as u32)));
        for (j, q) in positions.iter().enumerate() {
            if p.distance(*q) < 2.5 {
                assert!(found.contains(&(j as u32)), "missing {} near {}", j, i);
            }
        }
    }
}

#[test]
fn grid_rebuild_forgets_old_points() {
    let mut grid = SpatialGrid::new(1.0);
    grid.rebuild(&[Vec3::new(5.0, 5.0, 5.0)]);
    grid.rebuild(&[Vec3::ZERO]);
    let mut found: SmallVec<[u32; 8]> = SmallVec::new();
    grid.neighbors(Vec3::new(5.0, 5.0, 5.0), &mut found);
    assert!(found.is_empty());
}

#[test]
fn far_outliers_on_the_grid_path_are_handled() {
    let mut positions = random_positions(248, 6.0, 31);
    positions.push(Vec3::new(1e30, 0.0, 0.0));
    positions.push(Vec3::new(-1e30, -1e30, 1e30));
    let mut c = connector(250);
    let n = c.rebuild(&positions);
    let expected = brute_pairs(&positions, 2.5);
    assert_eq!(n, expected.len());
    assert_eq!(c.pairs(), expected.as_slice());
    assert!(c.pairs().iter().all(|[_, j]| *j < 248));
}

#[test]
fn grid_neighbors_at_key_range_edges() {
    let mut grid = SpatialGrid::new(1.0);
    let far = [Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)];
    grid.rebuild(&far);
    let mut found: SmallVec<[u32; 8]> = SmallVec::new();
    grid.neighbors(far[0], &mut found);
    assert_eq!(found.as_slice(), &[0]);
    found.clear();
    grid.neighbors(far[1], &mut found);
    assert_eq!(found.as_slice(), &[1]);
}

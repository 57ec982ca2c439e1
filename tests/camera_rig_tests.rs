// Host-side tests for the scroll-bound camera rig.
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
mod camera_rig {
    include!("../src/core/camera_rig.rs");
}

use camera_rig::*;
use glam::Vec3;
use params::CameraRigParams;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn scroll_progress_maps_scroll_range_to_unit_interval() {
    assert_eq!(scroll_progress(0.0, 3000.0, 1000.0), 0.0);
    assert!(approx(scroll_progress(1000.0, 3000.0, 1000.0), 0.5));
    assert_eq!(scroll_progress(2000.0, 3000.0, 1000.0), 1.0);
}

#[test]
fn scroll_progress_clamps_overscroll() {
    assert_eq!(scroll_progress(2500.0, 3000.0, 1000.0), 1.0);
    assert_eq!(scroll_progress(-80.0, 3000.0, 1000.0), 0.0);
}

#[test]
fn scroll_progress_without_overflow_is_zero_not_nan() {
    let p = scroll_progress(0.0, 800.0, 800.0);
    assert_eq!(p, 0.0);
    // Content shorter than the viewport
    let p = scroll_progress(0.0, 500.0, 800.0);
    assert_eq!(p, 0.0);
    assert_eq!(scroll_progress(f32::NAN, 3000.0, 1000.0), 0.0);
    assert_eq!(scroll_progress(0.0, f32::INFINITY, 1000.0), 0.0);
}

#[test]
fn scroll_target_endpoints_match_params() {
    let params = CameraRigParams::default();
    let t0 = ScrollTarget::from_progress(0.0, &params);
    let t1 = ScrollTarget::from_progress(1.0, &params);
    assert_eq!(t0.y, 0.0);
    assert_eq!(t0.z, params.z_base);
    assert!(approx(t1.y, -params.ky));
    assert!(approx(t1.z, params.z_base + params.kz));
}

#[test]
fn scroll_target_is_monotonic() {
    let params = CameraRigParams::default();
    let mut prev = ScrollTarget::from_progress(0.0, &params);
    for i in 1..=100 {
        let t = ScrollTarget::from_progress(i as f32 / 100.0, &params);
        assert!(t.y <= prev.y);
        assert!(t.z >= prev.z);
        prev = t;
    }
}

#[test]
fn smoothing_factor_is_exponential() {
    assert!(approx(smoothing_factor(2.0, 0.5), 1.0 - (-1.0f32).exp()));
    assert_eq!(smoothing_factor(2.0, 0.0), 0.0);
    assert_eq!(smoothing_factor(2.0, -1.0), 0.0);
    assert_eq!(smoothing_factor(2.0, f32::NAN), 0.0);
    // Never overshoots, even for huge steps
    assert!(smoothing_factor(2.0, 1000.0) <= 1.0);
}

#[test]
fn smoothing_is_frame_rate_independent() {
    let one = smooth_toward(0.0, 10.0, 2.0, 0.1);
    let half = smooth_toward(0.0, 10.0, 2.0, 0.05);
    let two = smooth_toward(half, 10.0, 2.0, 0.05);
    assert!(approx(one, two));
}

#[test]
fn rig_rests_at_base_pose() {
    let rig = CameraRig::new(CameraRigParams::default());
    assert_eq!(rig.pose().position, Vec3::new(0.0, 0.0, 15.0));
    assert_eq!(rig.pose().look_at, Vec3::ZERO);
}

#[test]
fn rig_converges_to_scroll_target() {
    let params = CameraRigParams::default();
    let mut rig = CameraRig::new(params);
    rig.on_scroll(2000.0, 3000.0, 1000.0);
    for _ in 0..2000 {
        rig.step(1.0 / 60.0);
    }
    let pose = rig.pose();
    assert!(approx(pose.position.y, -params.ky));
    assert!(approx(pose.position.z, params.z_base + params.kz));
    assert_eq!(pose.look_at, Vec3::new(0.0, rig.target().y, 0.0));
}

#[test]
fn rig_moves_partway_each_frame() {
    let mut rig = CameraRig::new(CameraRigParams::default());
    rig.on_scroll(2000.0, 3000.0, 1000.0);
    rig.step(1.0 / 60.0);
    let z = rig.pose().position.z;
    assert!(z > 15.0 && z < 23.0);
}

#[test]
fn rig_approaches_target_monotonically_without_overshoot() {
    let params = CameraRigParams::default();
    for dt in [1.0 / 60.0, 0.1, 1.0] {
        let mut rig = CameraRig::new(params);
        rig.on_scroll(2000.0, 3000.0, 1000.0);
        let target = rig.target();
        let mut prev = rig.pose().position;
        for _ in 0..500 {
            rig.step(dt);
            let pos = rig.pose().position;
            // y descends toward the target, z climbs toward it
            assert!(pos.y <= prev.y && pos.y >= target.y, "dt {} y {}", dt, pos.y);
            assert!(pos.z >= prev.z && pos.z <= target.z, "dt {} z {}", dt, pos.z);
            prev = pos;
        }
        assert!(approx(prev.z, target.z));
    }
}

#[test]
fn smooth_toward_stays_between_current_and_target() {
    for &(from, to) in &[(0.0f32, 10.0f32), (10.0, -3.0), (15.0, 23.0)] {
        for dt in [1e-3, 0.1, 1.0, 100.0] {
            let next = smooth_toward(from, to, 2.0, dt);
            assert!(next >= from.min(to) && next <= from.max(to));
        }
    }
}

#[test]
fn pointer_parallax_offsets_camera_x() {
    let params = CameraRigParams::default();
    let mut rig = CameraRig::new(params);
    rig.on_pointer(1.0);
    for _ in 0..2000 {
        rig.step(1.0 / 60.0);
    }
    assert!(approx(rig.pose().position.x, params.parallax));

    rig.on_pointer(-7.0); // clamped to -1
    for _ in 0..2000 {
        rig.step(1.0 / 60.0);
    }
    assert!(approx(rig.pose().position.x, -params.parallax));
}

#[test]
fn zero_dt_step_changes_nothing() {
    let mut rig = CameraRig::new(CameraRigParams::default());
    rig.on_scroll(2000.0, 3000.0, 1000.0);
    let before = rig.pose().position;
    rig.step(0.0);
    assert_eq!(rig.pose().position, before);
}

#[test]
fn camera_matrices_are_finite() {
    let rig = CameraRig::new(CameraRigParams::default());
    let cam = Camera::from_pose(rig.pose());
    let vp = cam.view_projection(16.0 / 9.0);
    assert!(vp.to_cols_array().iter().all(|v| v.is_finite()));

    let (right, up) = cam.billboard_axes();
    assert!(approx(right.length(), 1.0));
    assert!(approx(up.length(), 1.0));
    assert!(approx(right.dot(up), 0.0));
}

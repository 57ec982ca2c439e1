// Scroll- and pointer-driven camera.
//
// Scroll events set a target pose; every frame the live pose decays toward
// that target with a frame-rate independent exponential law.

use super::constants::{CAMERA_FOV_DEG, CAMERA_ZFAR, CAMERA_ZNEAR};
use super::params::CameraRigParams;
use glam::{Mat4, Vec3};

/// Normalized scroll position in [0, 1].
///
/// The denominator is guarded with `max(1, ..)` so a page without scrollable
/// overflow resolves to 0 instead of NaN/inf.
pub fn scroll_progress(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let max_scroll = (document_height - viewport_height).max(1.0);
    let p = scroll_y / max_scroll;
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Blend weight for one smoothing step: `1 - e^(-rate * dt)`.
#[inline]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    if !(dt.is_finite() && rate.is_finite()) || dt <= 0.0 || rate <= 0.0 {
        return 0.0;
    }
    1.0 - (-rate * dt).exp()
}

/// One smoothing step. The result always lies between `current` and
/// `target`, so rounding cannot carry it past the target.
#[inline]
pub fn smooth_toward(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let next = current + (target - current) * smoothing_factor(rate, dt);
    if current <= target {
        next.max(current).min(target)
    } else {
        next.min(current).max(target)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTarget {
    pub y: f32,
    pub z: f32,
}

impl ScrollTarget {
    pub fn from_progress(progress: f32, params: &CameraRigParams) -> Self {
        Self {
            y: -progress * params.ky,
            z: params.z_base + progress * params.kz,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

#[derive(Clone, Debug)]
pub struct CameraRig {
    params: CameraRigParams,
    target: ScrollTarget,
    pointer_x: f32,
    pose: CameraPose,
}

impl CameraRig {
    pub fn new(params: CameraRigParams) -> Self {
        let target = ScrollTarget::from_progress(0.0, &params);
        Self {
            params,
            target,
            pointer_x: 0.0,
            pose: CameraPose {
                position: Vec3::new(0.0, 0.0, params.z_base),
                look_at: Vec3::ZERO,
            },
        }
    }

    pub fn params(&self) -> &CameraRigParams {
        &self.params
    }

    pub fn target(&self) -> ScrollTarget {
        self.target
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn on_scroll(&mut self, scroll_y: f32, document_height: f32, viewport_height: f32) {
        let p = scroll_progress(scroll_y, document_height, viewport_height);
        self.target = ScrollTarget::from_progress(p, &self.params);
    }

    /// Pointer x in normalized device coordinates (-1 left, +1 right).
    pub fn on_pointer(&mut self, ndc_x: f32) {
        self.pointer_x = if ndc_x.is_finite() {
            ndc_x.clamp(-1.0, 1.0)
        } else {
            0.0
        };
    }

    pub fn step(&mut self, dt: f32) {
        let rate = self.params.rate;
        let pos = &mut self.pose.position;
        pos.x = smooth_toward(pos.x, self.pointer_x * self.params.parallax, rate, dt);
        pos.y = smooth_toward(pos.y, self.target.y, rate, dt);
        pos.z = smooth_toward(pos.z, self.target.z, rate, dt);
        self.pose.look_at = Vec3::new(0.0, self.target.y, 0.0);
    }
}

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn from_pose(pose: CameraPose) -> Self {
        Self {
            eye: pose.position,
            target: pose.look_at,
            up: Vec3::Y,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect.max(1e-6), self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// World-space right and up vectors of the view, used to face billboards.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        (right, up)
    }
}

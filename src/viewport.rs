use super::constants::{DPR_MAX, DPR_MIN};

/// Page scroll state as read from the window on each scroll event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f32,
    pub document_height: f32,
    pub viewport_height: f32,
}

#[inline]
pub fn clamp_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() {
        dpr.clamp(DPR_MIN, DPR_MAX)
    } else {
        DPR_MIN
    }
}

/// Canvas backing store size for a CSS box at the given device pixel ratio.
/// Never zero in either dimension.
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = clamp_dpr(dpr);
    let px = |css: f64| {
        if css.is_finite() && css > 0.0 {
            ((css * dpr).round() as u32).max(1)
        } else {
            1
        }
    };
    (px(css_width), px(css_height))
}

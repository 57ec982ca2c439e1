/// Pointer x in normalized device coordinates: -1 at the left edge of the
/// viewport, +1 at the right. Degenerate viewports map to the centre.
#[inline]
pub fn pointer_ndc_x(client_x: f32, viewport_width: f32) -> f32 {
    if !(viewport_width > 0.0) || !client_x.is_finite() {
        return 0.0;
    }
    ((client_x / viewport_width) * 2.0 - 1.0).clamp(-1.0, 1.0)
}


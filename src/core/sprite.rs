/// Per-instance data for camera-facing sprites, laid out for direct upload
/// into a vertex buffer with instance step mode.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
    /// x: shading (see `SpriteShading`), y: edge softness, zw: unused.
    pub params: [f32; 4],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum SpriteShading {
    /// Round dot with a soft edge.
    Dot = 0,
    /// Shaded sphere impostor.
    Sphere = 1,
    /// Faint back-facing halo (bright rim, clear center).
    Halo = 2,
}

impl SpriteInstance {
    pub fn new(position: [f32; 3], size: f32, color: [f32; 4], shading: SpriteShading) -> Self {
        Self {
            position,
            size,
            color,
            params: [shading as u32 as f32, 0.35, 0.0, 0.0],
        }
    }
}

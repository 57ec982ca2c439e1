// Browser-side rendering and page constants.
//
// Animation tuning lives in `core::constants`; these only concern the
// canvas, the GPU targets and the DOM contract.
// Offscreen scene color format (resolved MSAA target and bloom buffers)
pub const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub const MSAA_SAMPLES: u32 = 4;

// Device pixel ratio clamp for the canvas backing store
pub const DPR_MIN: f64 = 1.0;
pub const DPR_MAX: f64 = 1.5;

// DOM contract
pub const CANVAS_ID: &str = "scene-canvas";
pub const REVEAL_SELECTOR: &str = "[data-reveal]";
pub const REVEAL_FALLBACK_SELECTOR: &str = "section[id]";
pub const REVEAL_HIDDEN_CLASS: &str = "reveal-hidden";
pub const REVEAL_VISIBLE_CLASS: &str = "reveal-visible";

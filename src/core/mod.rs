pub mod camera_rig;
pub mod connector;
pub mod constants;
pub mod orbit;
pub mod palette;
pub mod params;
pub mod particles;
pub mod reveal;
pub mod scene;
pub mod snapshot;
pub mod spatial;
pub mod sphere;
pub mod sprite;

pub use camera_rig::*;
pub use constants::*;
pub use params::*;
pub use scene::SceneController;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");

// Shared scene tuning constants used by the core and the web frontend.

// Camera rig
pub const CAMERA_Z_BASE: f32 = 15.0; // rest distance from the origin
pub const CAMERA_SMOOTHING_RATE: f32 = 2.0; // per-second exponential rate
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Particle field wander amplitudes and spawn bounds
pub const PARTICLE_WANDER_X: f32 = 0.2;
pub const PARTICLE_WANDER_Y: f32 = 0.3;
pub const PARTICLE_WANDER_X_FREQ: f32 = 0.7; // relative to the y oscillation
pub const PARTICLE_HALF_EXTENT: [f32; 2] = [8.0, 5.0]; // x, y
pub const PARTICLE_Z_RANGE: [f32; 2] = [-4.0, 0.0];
pub const PARTICLE_SPEED_RANGE: [f32; 2] = [0.2, 0.5];
pub const PARTICLE_SIZE_RANGE: [f32; 2] = [0.05, 0.11];
pub const PARTICLE_OPACITY: f32 = 0.6;

// Sparkle drift amplitude as a fraction of the layer extent
pub const SPARKLE_DRIFT: f32 = 0.04;

// Memory sphere
pub const CORE_RADIUS: f32 = 1.5;
pub const CORE_FLOAT_SPEED: f32 = 1.2;
pub const CORE_FLOAT_INTENSITY: f32 = 0.4;
pub const CORE_ROTATION_INTENSITY: f32 = 0.2;
pub const RING_SEGMENTS: usize = 100;

// Orbiting nodes
pub const ORBIT_RADIUS_RANGE: [f32; 2] = [1.8, 3.3];
pub const ORBIT_SPEED_RANGE: [f32; 2] = [0.3, 0.7];
pub const ORBIT_TILT_MAX: f32 = std::f32::consts::FRAC_PI_4;
pub const ORBIT_BOB_AMPLITUDE: f32 = 0.3;
pub const ORBIT_PROXIMITY_FALLOFF: f32 = 2.0; // distance over which the highlight fades
pub const NODE_BASE_SIZE: f32 = 0.08;
pub const NODE_MAX_SIZE: f32 = 0.16;
pub const NODE_PULSE_SPEED: f32 = 1.5;
pub const NODE_PULSE_AMOUNT: f32 = 0.1;

// Connector
pub const CONNECT_THRESHOLD: f32 = 2.5;
pub const CONNECT_MIN_OPACITY: f32 = 0.1;
// Above this node count the connector switches to the uniform grid broad phase.
pub const GRID_MIN_NODES: usize = 200;

// Upper bound on a single frame step (seconds)
pub const MAX_FRAME_DT: f32 = 0.1;

// Reveal
pub const REVEAL_OFFSET_PX: f32 = 60.0;
pub const REVEAL_DURATION_SEC: f32 = 0.8;
pub const REVEAL_DEFAULT_AMOUNT: f32 = 0.2;

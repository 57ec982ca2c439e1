// Scene controller: owns every animated component and runs them in a fixed
// order once per frame.
//
// Tick order matters for the position snapshot: the cluster publishes all of
// this frame's node positions before the connector reads them.

use super::camera_rig::{Camera, CameraRig};
use super::connector::ProximityConnector;
use super::constants::{CORE_RADIUS, MAX_FRAME_DT, PARTICLE_OPACITY};
use super::orbit::{NodeVisual, OrbitCluster};
use super::palette::linear_from_hex;
use super::params::SceneParams;
use super::particles::{FieldBounds, ParticleField, SparkleCloud, DEFAULT_SPARKLE_LAYERS};
use super::snapshot::PositionTable;
use super::sphere::{MemorySphere, CORE_SPARKLE_LAYER};
use super::sprite::{SpriteInstance, SpriteShading};
use rand::rngs::StdRng;
use rand::SeedableRng;

const NODE_OPACITY: f32 = 0.9;

pub struct SceneController {
    params: SceneParams,
    rig: CameraRig,
    field: ParticleField,
    sparkles: Vec<SparkleCloud>,
    core_sparkles: SparkleCloud,
    sphere: MemorySphere,
    cluster: OrbitCluster,
    table: PositionTable,
    visuals: Vec<NodeVisual>,
    connector: ProximityConnector,
    sprites: Vec<SpriteInstance>,
    background_sprites: usize,
    ring_vertices: Vec<f32>,
    elapsed: f32,
}

impl SceneController {
    pub fn new(params: SceneParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let field = ParticleField::generate(params.particle_count, &FieldBounds::default(), &mut rng);
        let sparkles = if params.sparkles {
            DEFAULT_SPARKLE_LAYERS
                .iter()
                .map(|layer| SparkleCloud::generate(layer, &mut rng))
                .collect()
        } else {
            Vec::new()
        };
        let core_sparkles = SparkleCloud::generate(&CORE_SPARKLE_LAYER, &mut rng);
        let cluster = OrbitCluster::generate(params.node_count, CORE_RADIUS, &mut rng);
        let connector = ProximityConnector::new(
            params.node_count,
            params.connect_threshold,
            params.connector_opacity,
            linear_from_hex(params.connector_color),
        );
        let sprite_capacity = field.len()
            + sparkles.iter().map(SparkleCloud::len).sum::<usize>()
            + core_sparkles.len()
            + cluster.len()
            + 2;
        let sphere = MemorySphere::default();
        let ring_vertices = Vec::with_capacity(sphere.ring_float_count());
        log::info!(
            "[scene] variant={} seed={} particles={} nodes={} segments_max={}",
            params.variant.name(),
            seed,
            field.len(),
            cluster.len(),
            connector.buffer().capacity()
        );
        let mut scene = Self {
            rig: CameraRig::new(params.camera),
            table: PositionTable::new(params.node_count),
            visuals: vec![NodeVisual::default(); params.node_count],
            params,
            field,
            sparkles,
            core_sparkles,
            sphere,
            cluster,
            connector,
            sprites: Vec::with_capacity(sprite_capacity),
            background_sprites: 0,
            ring_vertices,
            elapsed: 0.0,
        };
        scene.evaluate();
        scene
    }

    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    pub fn on_scroll(&mut self, scroll_y: f32, document_height: f32, viewport_height: f32) {
        self.rig.on_scroll(scroll_y, document_height, viewport_height);
    }

    pub fn on_pointer(&mut self, ndc_x: f32) {
        self.rig.on_pointer(ndc_x);
    }

    /// Advance by `dt` seconds (clamped to `[0, MAX_FRAME_DT]`).
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.elapsed += dt;
        self.rig.step(dt);
        self.evaluate();
    }

    /// Jump the animation clock to `t` without moving the camera.
    pub fn seek(&mut self, t: f32) {
        self.elapsed = if t.is_finite() { t.max(0.0) } else { 0.0 };
        self.evaluate();
    }

    fn evaluate(&mut self) {
        let t = self.elapsed;
        self.sprites.clear();

        for cloud in &self.sparkles {
            for s in &cloud.sparkles {
                self.sprites.push(SpriteInstance::new(
                    s.position_at(t).to_array(),
                    cloud.size,
                    [cloud.color.x, cloud.color.y, cloud.color.z, s.opacity_at(t)],
                    SpriteShading::Dot,
                ));
            }
        }
        for p in &self.field.particles {
            self.sprites.push(SpriteInstance::new(
                p.position_at(t).to_array(),
                p.size,
                [p.color.x, p.color.y, p.color.z, PARTICLE_OPACITY],
                SpriteShading::Dot,
            ));
        }
        self.background_sprites = self.sprites.len();

        let float = self.sphere.float_transform(t);
        let cloud = &self.core_sparkles;
        for s in &cloud.sparkles {
            self.sprites.push(SpriteInstance::new(
                float.transform_point3(s.position_at(t)).to_array(),
                cloud.size,
                [cloud.color.x, cloud.color.y, cloud.color.z, s.opacity_at(t)],
                SpriteShading::Dot,
            ));
        }

        self.cluster.tick(t, &mut self.table, &mut self.visuals);
        self.connector.rebuild(self.table.as_slice());

        // Nodes behind the core are drawn before it, the rest after.
        let center = self.sphere.center_at(t);
        let node_sprite = |v: &NodeVisual| {
            SpriteInstance::new(
                v.position.to_array(),
                v.size,
                [v.color.x, v.color.y, v.color.z, NODE_OPACITY],
                SpriteShading::Sphere,
            )
        };
        for v in self.visuals.iter().filter(|v| v.position.z < center.z) {
            self.sprites.push(node_sprite(v));
        }
        self.sprites.extend(self.sphere.core_sprites(t));
        for v in self.visuals.iter().filter(|v| v.position.z >= center.z) {
            self.sprites.push(node_sprite(v));
        }

        self.sphere.write_rings(t, &mut self.ring_vertices);
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn camera(&self) -> Camera {
        Camera::from_pose(self.rig.pose())
    }

    /// All sprites in draw order.
    pub fn sprites(&self) -> &[SpriteInstance] {
        &self.sprites
    }

    /// Number of leading sprites drawn before the line layer.
    pub fn background_sprite_count(&self) -> usize {
        self.background_sprites
    }

    pub fn node_visuals(&self) -> &[NodeVisual] {
        &self.visuals
    }

    pub fn positions(&self) -> &PositionTable {
        &self.table
    }

    pub fn connector(&self) -> &ProximityConnector {
        &self.connector
    }

    pub fn ring_vertices(&self) -> &[f32] {
        &self.ring_vertices
    }
}

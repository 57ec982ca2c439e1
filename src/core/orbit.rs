// Nodes orbiting the memory sphere on tilted, randomized ellipses.
//
// A node's parameters are fixed at construction; its position is a pure
// function of elapsed time. Nodes closer to the core are drawn larger and in
// the bold shade of their hue.

use super::constants::*;
use super::palette::Hue;
use super::snapshot::PositionTable;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitNode {
    pub index: usize,
    pub orbit_radius: f32,
    pub angular_speed: f32,
    pub hue: Hue,
    pub phase: f32,
    pub tilt: [f32; 2],
    pub pulse_phase: f32,
}

impl OrbitNode {
    pub fn position_at(&self, t: f32) -> Vec3 {
        let u = t * self.angular_speed + self.phase;
        let r = self.orbit_radius;
        let (s, c) = u.sin_cos();
        Vec3::new(
            c * r,
            s * r * self.tilt[0].cos() + (0.5 * u).sin() * ORBIT_BOB_AMPLITUDE,
            s * r * self.tilt[0].sin() * self.tilt[1].cos(),
        )
    }

    /// Size multiplier from the slow heartbeat pulse.
    #[inline]
    pub fn pulse_at(&self, t: f32) -> f32 {
        1.0 + (t * NODE_PULSE_SPEED + self.pulse_phase).sin() * NODE_PULSE_AMOUNT
    }
}

/// Closeness to the core surface in [0, 1]; 1 at or inside the core, 0 once
/// the node is `ORBIT_PROXIMITY_FALLOFF` beyond it.
#[inline]
pub fn proximity(position: Vec3, core_radius: f32) -> f32 {
    (1.0 - (position.length() - core_radius) / ORBIT_PROXIMITY_FALLOFF).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeVisual {
    pub position: Vec3,
    pub size: f32,
    pub color: Vec3,
    pub proximity: f32,
}

#[derive(Clone, Debug)]
pub struct OrbitCluster {
    pub nodes: Vec<OrbitNode>,
    pub core_radius: f32,
}

impl OrbitCluster {
    pub fn generate<R: Rng>(count: usize, core_radius: f32, rng: &mut R) -> Self {
        let nodes = (0..count)
            .map(|index| OrbitNode {
                index,
                orbit_radius: rng.gen_range(ORBIT_RADIUS_RANGE[0]..=ORBIT_RADIUS_RANGE[1]),
                angular_speed: rng.gen_range(ORBIT_SPEED_RANGE[0]..=ORBIT_SPEED_RANGE[1]),
                hue: Hue::from_index(index),
                phase: rng.gen_range(0.0..TAU),
                tilt: [
                    rng.gen_range(-ORBIT_TILT_MAX..=ORBIT_TILT_MAX),
                    rng.gen_range(-ORBIT_TILT_MAX..=ORBIT_TILT_MAX),
                ],
                pulse_phase: rng.gen_range(0.0..TAU),
            })
            .collect();
        Self { nodes, core_radius }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn visual_at(&self, node: &OrbitNode, t: f32) -> NodeVisual {
        let position = node.position_at(t);
        let k = proximity(position, self.core_radius);
        let size = (NODE_BASE_SIZE + (NODE_MAX_SIZE - NODE_BASE_SIZE) * k) * node.pulse_at(t);
        NodeVisual {
            position,
            size,
            color: node.hue.shade(k),
            proximity: k,
        }
    }

    /// Advance every node to `t`: publish its position into `table` at its
    /// own index and write its visual into `visuals[index]`.
    pub fn tick(&self, t: f32, table: &mut PositionTable, visuals: &mut [NodeVisual]) {
        for node in &self.nodes {
            let v = self.visual_at(node, t);
            table.publish(node.index, v.position);
            if let Some(slot) = visuals.get_mut(node.index) {
                *slot = v;
            }
        }
    }
}

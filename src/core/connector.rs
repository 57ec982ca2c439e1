// Proximity lines between orbiting nodes.
//
// Every frame the connector tests all unordered node pairs and rewrites a
// preallocated line-vertex buffer from scratch. The all-pairs pass is
// O(K^2); clusters above `GRID_MIN_NODES` go through a uniform grid broad
// phase that yields the same segments in the same order.

use super::constants::GRID_MIN_NODES;
use super::params::OpacityMode;
use super::spatial::SpatialGrid;
use glam::Vec3;
use smallvec::SmallVec;

/// Floats per line vertex: position xyz + linear rgba.
pub const LINE_VERTEX_FLOATS: usize = 7;
pub const SEGMENT_FLOATS: usize = 2 * LINE_VERTEX_FLOATS;

#[inline]
pub fn pair_count(nodes: usize) -> usize {
    nodes.saturating_mul(nodes.saturating_sub(1)) / 2
}

/// Write one line segment (two vertices) into `out`, which must hold at
/// least `SEGMENT_FLOATS` floats.
#[inline]
pub fn write_segment(out: &mut [f32], a: Vec3, b: Vec3, color: Vec3, alpha: f32) {
    out[..SEGMENT_FLOATS].copy_from_slice(&[
        a.x, a.y, a.z, color.x, color.y, color.z, alpha, //
        b.x, b.y, b.z, color.x, color.y, color.z, alpha,
    ]);
}

/// Flat line-vertex storage sized for the worst case, with a live count of
/// valid segments.
#[derive(Clone, Debug)]
pub struct SegmentBuffer {
    data: Vec<f32>,
    capacity: usize,
    used: usize,
}

impl SegmentBuffer {
    pub fn with_capacity(segments: usize) -> Self {
        Self {
            data: vec![0.0; segments * SEGMENT_FLOATS],
            capacity: segments,
            used: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of valid segments written by the last rebuild (draw range).
    pub fn used(&self) -> usize {
        self.used
    }

    /// Valid vertex data only.
    pub fn vertex_floats(&self) -> &[f32] {
        &self.data[..self.used * SEGMENT_FLOATS]
    }

    /// The whole backing store, including the zeroed tail.
    pub fn raw(&self) -> &[f32] {
        &self.data
    }

    pub fn segment(&self, i: usize) -> Option<&[f32]> {
        (i < self.used).then(|| &self.data[i * SEGMENT_FLOATS..(i + 1) * SEGMENT_FLOATS])
    }
}

#[derive(Clone, Debug)]
pub struct ProximityConnector {
    threshold: f32,
    mode: OpacityMode,
    color: Vec3,
    node_capacity: usize,
    buffer: SegmentBuffer,
    pairs: Vec<[u32; 2]>,
    grid: SpatialGrid,
    scratch: SmallVec<[u32; 64]>,
    warned_overflow: bool,
}

impl ProximityConnector {
    pub fn new(node_capacity: usize, threshold: f32, mode: OpacityMode, color: Vec3) -> Self {
        let segments = pair_count(node_capacity);
        Self {
            threshold,
            mode,
            color,
            node_capacity,
            buffer: SegmentBuffer::with_capacity(segments),
            pairs: Vec::with_capacity(segments),
            grid: SpatialGrid::new(threshold),
            scratch: SmallVec::new(),
            warned_overflow: false,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn buffer(&self) -> &SegmentBuffer {
        &self.buffer
    }

    pub fn segment_count(&self) -> usize {
        self.buffer.used
    }

    /// Node index pairs `(i, j)`, `i < j`, of the valid segments in emission order.
    pub fn pairs(&self) -> &[[u32; 2]] {
        &self.pairs
    }

    /// Rebuild the segment buffer from a position snapshot and return the
    /// number of valid segments.
    pub fn rebuild(&mut self, positions: &[Vec3]) -> usize {
        let n = positions.len().min(self.node_capacity);
        if n < positions.len() && !self.warned_overflow {
            log::warn!(
                "[connector] {} nodes exceed capacity {}; extra nodes are not connected",
                positions.len(),
                self.node_capacity
            );
            self.warned_overflow = true;
        }
        let positions = &positions[..n];
        let prev_used = self.buffer.used;
        self.buffer.used = 0;
        self.pairs.clear();

        if n > GRID_MIN_NODES {
            self.rebuild_grid(positions);
        } else {
            for i in 0..n {
                for j in (i + 1)..n {
                    self.consider(positions, i, j);
                }
            }
        }

        let used = self.buffer.used;
        if used < prev_used {
            self.buffer.data[used * SEGMENT_FLOATS..prev_used * SEGMENT_FLOATS].fill(0.0);
        }
        used
    }

    fn rebuild_grid(&mut self, positions: &[Vec3]) {
        self.grid.rebuild(positions);
        let mut scratch = std::mem::take(&mut self.scratch);
        for i in 0..positions.len() {
            scratch.clear();
            self.grid.neighbors(positions[i], &mut scratch);
            scratch.retain(|j| *j as usize > i);
            scratch.sort_unstable();
            for &j in scratch.iter() {
                self.consider(positions, i, j as usize);
            }
        }
        self.scratch = scratch;
    }

    #[inline]
    fn consider(&mut self, positions: &[Vec3], i: usize, j: usize) {
        let (a, b) = (positions[i], positions[j]);
        let d = a.distance(b);
        if d < self.threshold {
            let k = self.buffer.used;
            if k >= self.buffer.capacity {
                return;
            }
            let alpha = self.mode.opacity(d, self.threshold);
            write_segment(
                &mut self.buffer.data[k * SEGMENT_FLOATS..],
                a,
                b,
                self.color,
                alpha,
            );
            self.buffer.used = k + 1;
            self.pairs.push([i as u32, j as u32]);
        }
    }
}

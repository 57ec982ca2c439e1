// Uniform grid broad phase for neighbour queries.
//
// With the cell edge equal to the query radius, every point within the
// radius of `p` lies in `p`'s cell or one of its 26 neighbours.

use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;

pub type CellKey = (i32, i32, i32);
pub type Bucket = SmallVec<[u32; 8]>;

#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: FnvHashMap<CellKey, Bucket>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(f32::EPSILON),
            cells: FnvHashMap::default(),
        }
    }

    #[inline]
    pub fn key(&self, p: Vec3) -> CellKey {
        let s = p / self.cell_size;
        (s.x.floor() as i32, s.y.floor() as i32, s.z.floor() as i32)
    }

    /// Re-bucket all points. Buckets are cleared in place so their storage is
    /// reused across frames; the map is dropped wholesale if it has grown far
    /// beyond the point count.
    pub fn rebuild(&mut self, positions: &[Vec3]) {
        if self.cells.len() > positions.len().saturating_mul(4).max(64) {
            self.cells.clear();
        } else {
            for bucket in self.cells.values_mut() {
                bucket.clear();
            }
        }
        for (i, p) in positions.iter().enumerate() {
            let key = self.key(*p);
            self.cells.entry(key).or_default().push(i as u32);
        }
    }

    /// Append the indices stored in the 27 cells around `p` to `out`. Cells
    /// past the edge of the key range are skipped.
    pub fn neighbors<A: smallvec::Array<Item = u32>>(&self, p: Vec3, out: &mut SmallVec<A>) {
        let (cx, cy, cz) = self.key(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = match (cx.checked_add(dx), cy.checked_add(dy), cz.checked_add(dz)) {
                        (Some(x), Some(y), Some(z)) => (x, y, z),
                        _ => continue,
                    };
                    if let Some(bucket) = self.cells.get(&key) {
                        out.extend_from_slice(bucket);
                    }
                }
            }
        }
    }
}

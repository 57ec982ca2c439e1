use glam::Vec3;

/// Last-known position of every orbiting node, indexed by node index.
///
/// Allocated once at scene construction. Within a frame the cluster writes
/// every slot before the connector reads the table; both run in the same
/// tick, so ordering comes from call sequence rather than locking.
#[derive(Clone, Debug, Default)]
pub struct PositionTable {
    slots: Vec<Vec3>,
}

impl PositionTable {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![Vec3::ZERO; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Overwrite the slot for `index` in place. Out-of-range writes are ignored.
    #[inline]
    pub fn publish(&mut self, index: usize, position: Vec3) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = position;
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.slots.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Vec3] {
        &self.slots
    }
}

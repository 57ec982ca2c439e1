// Mount generations. Every mount and unmount starts a new generation; work
// begun under an older one must leave the page alone.
use std::cell::Cell;

#[derive(Debug, Default)]
pub struct Generation {
    current: Cell<u64>,
}

impl Generation {
    pub const fn new() -> Self {
        Self {
            current: Cell::new(0),
        }
    }

    pub fn current(&self) -> u64 {
        self.current.get()
    }

    /// Start a new generation and return its token.
    pub fn advance(&self) -> u64 {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        next
    }

    #[inline]
    pub fn is_current(&self, token: u64) -> bool {
        self.current.get() == token
    }
}

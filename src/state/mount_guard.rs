use std::cell::Cell;
use std::rc::Rc;

/// Shared "still mounted" flag. Async completions check it before touching
/// state; unmounting flips it for every clone at once.
#[derive(Clone, Debug)]
pub struct MountGuard {
    mounted: Rc<Cell<bool>>,
}

impl MountGuard {
    pub fn new() -> Self {
        Self {
            mounted: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    pub fn unmount(&self) {
        self.mounted.set(false);
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmount_is_seen_by_clones() {
        let guard = MountGuard::new();
        let in_flight = guard.clone();
        assert!(in_flight.is_mounted());
        guard.unmount();
        assert!(!in_flight.is_mounted());
    }
}

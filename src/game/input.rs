//! Per-tick input snapshot. Event listeners in the web glue write into this
//! between ticks; the simulation reads it exactly once per tick. Last write
//! wins, no locking (a one-frame-stale sample is cosmetic only).

/// Currently-held movement keys plus the live pointer/touch position, if any.
/// `pointer` is `None` while no pointer is active over the playfield.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub pointer: Option<(f64, f64)>,
}

impl InputSnapshot {
    /// True while any movement key is held; keyboard then overrides pointer.
    pub fn any_direction(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// Release all held keys (used when the window loses focus so keys do not
    /// stick down across a blur).
    pub fn release_keys(&mut self) {
        self.left = false;
        self.right = false;
        self.up = false;
        self.down = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_inert() {
        let snap = InputSnapshot::default();
        assert!(!snap.any_direction());
        assert_eq!(snap.pointer, None);
    }

    #[test]
    fn any_direction_sees_each_key() {
        for i in 0..4 {
            let mut snap = InputSnapshot::default();
            match i {
                0 => snap.left = true,
                1 => snap.right = true,
                2 => snap.up = true,
                _ => snap.down = true,
            }
            assert!(snap.any_direction());
            snap.release_keys();
            assert!(!snap.any_direction());
        }
    }
}

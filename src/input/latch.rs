use crate::game::Direction;

/// Holds the direction in effect and the one queued for the next tick
///
/// Requests are checked against the direction in effect, not against the
/// last request, so two quick presses (e.g. Up then Left while moving
/// Right) cannot sneak a reversal through within a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionLatch {
    current: Direction,
    requested: Direction,
}

impl DirectionLatch {
    pub fn new(direction: Direction) -> Self {
        Self {
            current: direction,
            requested: direction,
        }
    }

    pub fn current(&self) -> Direction {
        self.current
    }

    pub fn requested(&self) -> Direction {
        self.requested
    }

    /// Queue `direction` unless it reverses the current one
    ///
    /// Returns whether the request was accepted.
    pub fn request(&mut self, direction: Direction) -> bool {
        if self.current.is_opposite(direction) {
            return false;
        }
        self.requested = direction;
        true
    }

    /// Make the queued direction current; called once at the start of a tick
    pub fn apply(&mut self) -> Direction {
        self.current = self.requested;
        self.current
    }
}

use crate::game::Direction;

/// Resolves a drag into at most one direction per touch
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTracker {
    threshold: f32,
    origin: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            origin: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether a touch is in progress and has not produced a direction yet
    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.origin = Some((x, y));
    }

    /// Compare the displacement since the touch started against the threshold
    ///
    /// The dominant axis picks the candidate; it registers only when its
    /// displacement is strictly beyond the threshold. Once a direction is
    /// produced the touch is spent until the next `touch_start`.
    pub fn touch_move(&mut self, x: f32, y: f32) -> Option<Direction> {
        let (start_x, start_y) = self.origin?;
        let dx = x - start_x;
        let dy = y - start_y;

        let direction = if dx.abs() > dy.abs() {
            if dx > self.threshold {
                Some(Direction::Right)
            } else if dx < -self.threshold {
                Some(Direction::Left)
            } else {
                None
            }
        } else if dy > self.threshold {
            Some(Direction::Down)
        } else if dy < -self.threshold {
            Some(Direction::Up)
        } else {
            None
        };

        if direction.is_some() {
            self.origin = None;
        }
        direction
    }
}

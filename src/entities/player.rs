use super::rect::Rect;

/// The player ship. Moves horizontally only; the vertical position is fixed
/// for the whole session.
#[derive(Debug, Clone)]
pub struct Player {
    pub x: i32,
    pub y: i32,
}

impl Player {
    /// Side length of the ship square, in field pixels.
    pub const SIZE: i32 = 50;
    /// Horizontal movement per tick while a direction is held.
    pub const SPEED: i32 = 5;

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn move_left(&mut self, min_x: i32) {
        if self.x > min_x {
            self.x = (self.x - Self::SPEED).max(min_x);
        }
    }

    pub fn move_right(&mut self, max_x: i32) {
        if self.x < max_x {
            self.x = (self.x + Self::SPEED).min(max_x);
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, Self::SIZE)
    }
}

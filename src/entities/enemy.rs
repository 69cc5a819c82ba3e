use super::rect::Rect;

/// A descending enemy ship. Spawns at the top of the field and falls
/// straight down until it exits the bottom, is shot, or reaches the player.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
}

impl Enemy {
    pub const SIZE: i32 = 40;
    /// Vertical movement per tick, downward.
    pub const SPEED: i32 = 3;

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn update(&mut self) {
        self.y += Self::SPEED;
    }

    /// True once the enemy's top edge has passed the bottom of the field.
    pub fn is_past_bottom(&self, field_height: i32) -> bool {
        self.y > field_height
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, Self::SIZE)
    }
}

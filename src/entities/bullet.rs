use super::rect::Rect;

/// A player bullet. Travels straight up until it leaves the field or hits
/// an enemy.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
}

impl Bullet {
    pub const SIZE: i32 = 10;
    /// Vertical movement per tick, upward.
    pub const SPEED: i32 = 10;

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn update(&mut self) {
        self.y -= Self::SPEED;
    }

    /// True once the bullet's bottom edge has passed the top of the field.
    pub fn is_off_top(&self) -> bool {
        self.y + Self::SIZE < 0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, Self::SIZE)
    }
}

/// Axis-aligned square in logical field coordinates.
///
/// Every entity in the game is a square, so a single side length stands in
/// for width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub size: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, size: i32) -> Self {
        Self { x, y, size }
    }

    /// Strict AABB overlap. Squares that merely touch edges do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.size
            && self.x + self.size > other.x
            && self.y < other.y + other.size
            && self.y + self.size > other.y
    }
}

mod bullet;
mod enemy;
mod player;
mod rect;

// Re-export all public types
pub use bullet::Bullet;
pub use enemy::Enemy;
pub use player::Player;
pub use rect::Rect;

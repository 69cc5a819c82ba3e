// Library exports for testing
pub use entities::{Bullet, Enemy, Player, Rect};
pub use sim::{FIELD_HEIGHT, FIELD_WIDTH, Simulation};

pub mod app;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod sim;

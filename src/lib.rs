pub use utils::{Pos, Vec2};
mod utils;

pub use life::LifeGrid;
pub mod life;

pub use sim::{Sim, SimHandle, Snapshot};
pub mod sim;

pub use view::{View, Viewport, ZoomDirection};
pub mod view;

pub mod patterns;

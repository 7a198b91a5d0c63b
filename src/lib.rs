pub mod combat;
pub mod config;
pub mod dungeon;
pub mod game;

pub use combat::*;
pub use config::*;
pub use dungeon::*;
pub use game::*;

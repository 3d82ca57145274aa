//! Snake game logic on top of the [`core`](crate::core) primitives.
//!
//! - [`SnakeConfig`] - grid size and the episode cutoff
//! - [`SnakeEnv`] - a seeded, resettable episode implementing
//!   [`Environment`](crate::Environment)
//! - [`observation`] - the ray-cast observation fed to the network
//!
//! # Episode Flow
//!
//! 1. [`SnakeEnv::reset`](crate::Environment::reset) places a length-1 snake
//!    in the centre heading up and spawns food on a random free cell
//! 2. Every step turns the snake (reversals are ignored), moves it one cell
//!    and resolves collisions and food
//! 3. The episode ends on a wall or body collision, when the grid is full, or
//!    after `max_steps_without_food` steps without eating

pub use self::{config::*, snake_env::*};

mod config;
pub mod observation;
mod snake_env;

//! Grid-based snake environment used to score evolved agents.
//!
//! The crate is split the same way the game itself is layered:
//!
//! - [`core`] - plain grid data: positions, headings, the snake body
//! - [`engine`] - the playable [`SnakeEnv`] with food, rewards and observations
//! - [`environment`] - the [`Environment`] contract the training crate consumes
//!
//! # Example
//!
//! ```
//! use snakevo_engine::{Environment, SnakeConfig, SnakeEnv};
//!
//! let mut env = SnakeEnv::with_seed(SnakeConfig::default(), 7);
//! let mut transition = env.reset();
//! while !transition.done {
//!     // always turn right; the episode ends on a wall or the step cutoff
//!     transition = env.step(1).unwrap();
//! }
//! assert!(env.steps_taken() > 0);
//! ```

pub use self::{core::*, engine::*, environment::*};

pub mod core;
pub mod engine;
pub mod environment;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StepError {
    #[display("action {action} is out of range (expected < {action_count})")]
    InvalidAction { action: usize, action_count: usize },
    #[display("episode already finished; call reset() first")]
    EpisodeFinished,
}

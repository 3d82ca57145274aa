//! Fitness functions and parallel population evaluation.
//!
//! A fitness function maps a finished episode to a scalar, higher is better:
//!
//! | name                  | fitness                       |
//! |-----------------------|-------------------------------|
//! | `MAXIMISE_MOVES`      | steps survived                |
//! | `MAXIMISE_FOOD_EATEN` | items collected               |
//! | `MAXIMISE_REWARD`     | sum of rewards of the episode |
//!
//! The first two are never negative, so an agent that dies immediately still
//! scores `>= 0`. Accumulated reward can be negative; roulette selection
//! clamps such fitness to zero weight.
//!
//! # Parallelization
//!
//! [`evaluate_population`] splits the agents into at most `workers` chunks
//! and plays every chunk on its own scoped thread. Each thread holds the only
//! mutable borrow of its agents, and the scope joins every thread before
//! returning.

use std::{fmt, num::NonZeroUsize, str::FromStr, thread};

use serde::{Deserialize, Serialize};
use snakevo_engine::Environment;

use crate::{
    agent::{Agent, EpisodeResult},
    error::ConfigError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FitnessFunction {
    MaximiseMoves,
    MaximiseFoodEaten,
    MaximiseReward,
}

impl FitnessFunction {
    pub const ALL: [Self; 3] = [
        Self::MaximiseMoves,
        Self::MaximiseFoodEaten,
        Self::MaximiseReward,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MaximiseMoves => "MAXIMISE_MOVES",
            Self::MaximiseFoodEaten => "MAXIMISE_FOOD_EATEN",
            Self::MaximiseReward => "MAXIMISE_REWARD",
        }
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn evaluate(self, episode: &EpisodeResult) -> f32 {
        match self {
            Self::MaximiseMoves => episode.steps as f32,
            Self::MaximiseFoodEaten => episode.score as f32,
            Self::MaximiseReward => episode.total_reward,
        }
    }
}

impl fmt::Display for FitnessFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FitnessFunction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownFitnessFunction { name: s.to_owned() })
    }
}

/// Resolves a worker count of `0` to the available parallelism.
#[must_use]
pub fn resolve_workers(workers: usize) -> NonZeroUsize {
    NonZeroUsize::new(workers).unwrap_or_else(|| {
        thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
    })
}

/// Plays one episode per agent on a bounded pool of scoped threads and stores
/// each agent's fitness.
pub fn evaluate_population<E>(
    agents: &mut [Agent<E>],
    fitness_fn: FitnessFunction,
    workers: NonZeroUsize,
) where
    E: Environment + Send,
{
    if agents.is_empty() {
        return;
    }
    let chunk_size = agents.len().div_ceil(workers.get());
    thread::scope(|s| {
        for chunk in agents.chunks_mut(chunk_size) {
            s.spawn(move || {
                for agent in chunk {
                    agent.evaluate(fitness_fn);
                }
            });
        }
    });
}

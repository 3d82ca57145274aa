//! Neuro-evolution of agents for grid-game environments.
//!
//! Agents are fully connected networks whose weights are evolved by a
//! gradient-free genetic algorithm. Every generation each agent plays one
//! episode, is scored by a fitness function, and the next generation is bred
//! from the fittest agents.
//!
//! # How Training Works
//!
//! 1. **Population** - Create `pop_size` agents with random genomes, each
//!    owning its own environment
//! 2. **Evaluation** - Every agent plays one episode; a [`FitnessFunction`]
//!    turns the episode into a score
//! 3. **Elitism** - The top agents' genomes are copied unchanged
//! 4. **Selection** - Roulette, rank or tournament selection draws parents
//! 5. **Reproduction** - n-point crossover and replacement mutation build the
//!    rest of the next generation
//! 6. **Repeat** - [`Generational`] runs a fixed number of generations
//!
//! # Architecture
//!
//! ```text
//! Generational (driver)
//!     ↓ steps
//! Population (evaluate → select → crossover → mutate → replace → reset)
//!     ↓ owns
//! Agent = Genome + Environment (snakevo-engine)
//!     ↓ acts through
//! Architecture::forward (snakevo-network)
//! ```
//!
//! # Example
//!
//! ```
//! use snakevo_engine::{Direction, SnakeConfig, SnakeEnv, observation::OBSERVATION_LEN};
//! use snakevo_network::Architecture;
//! use snakevo_training::{
//!     FitnessFunction, Generational, ParentPool, Population, PopulationConfig, Selection,
//! };
//!
//! let config = PopulationConfig {
//!     pop_size: 6,
//!     mutation_rate: 0.05,
//!     crossover_rate: 0.8,
//!     n_crossover_points: 1,
//!     elitism: 0.2,
//!     fitness: FitnessFunction::MaximiseMoves,
//!     selection: Selection::Roulette,
//!     parent_pool: ParentPool::All,
//!     workers: 0,
//!     seed: Some(7),
//! };
//! let arch = Architecture::with_hidden(OBSERVATION_LEN, &[8], Direction::LEN).unwrap();
//! let population = Population::new(config, arch, |i| {
//!     SnakeEnv::with_seed(SnakeConfig::default(), i as u64)
//! })
//! .unwrap();
//!
//! let mut driver = Generational::new(population);
//! let history = driver.run(2).unwrap();
//! assert_eq!(history.len(), 2);
//! assert!(history[0] <= history[1]);
//! ```

pub use self::{
    agent::{Agent, EpisodeResult},
    config::{ParentPool, PopulationConfig},
    error::{ConfigError, EvolutionError, ShapeMismatchError},
    fitness::FitnessFunction,
    generational::Generational,
    genome::Genome,
    population::Population,
    selection::{RankParams, Selection, SelectionKind, SelectionParams, TournamentParams},
    statistics::{FitnessStats, GenerationRecord},
};

pub mod agent;
pub mod config;
pub mod error;
pub mod fitness;
pub mod generational;
pub mod genome;
pub mod population;
pub mod selection;
pub mod statistics;
pub mod weights;

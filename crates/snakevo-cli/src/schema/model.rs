use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snakevo_engine::SnakeConfig;
use snakevo_network::Architecture;
use snakevo_training::{EpisodeResult, FitnessFunction, Genome};

/// Best agent of a training run, as written to `model.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    pub trained_at: DateTime<Utc>,
    pub generations: usize,
    pub fitness_function: FitnessFunction,
    pub final_fitness: f32,
    pub episode: EpisodeResult,
    pub environment: SnakeConfig,
    pub architecture: Architecture,
    pub genome: Genome,
}

//! Population hyper-parameters.

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, fitness::FitnessFunction, selection::Selection};

/// Which agents parents are drawn from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParentPool {
    /// The whole population, elites included.
    #[default]
    All,
    /// Only agents outside the elite.
    NonElite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopulationConfig {
    pub pop_size: usize,
    pub mutation_rate: f32,
    pub crossover_rate: f32,
    /// Random cuts per layer, `0` swaps whole layers.
    pub n_crossover_points: usize,
    /// Fraction of the population copied unchanged into the next generation.
    pub elitism: f32,
    pub fitness: FitnessFunction,
    pub selection: Selection,
    pub parent_pool: ParentPool,
    /// Evaluation threads, `0` uses the available parallelism.
    pub workers: usize,
    /// Seed of the breeding RNG, `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl PopulationConfig {
    /// Number of agents copied unchanged into the next generation,
    /// `round(elitism × pop_size)`.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn elite_count(&self) -> usize {
        let count = (self.elitism * self.pop_size as f32).round() as usize;
        count.min(self.pop_size)
    }

    /// Number of parents drawn every generation.
    #[must_use]
    pub fn parent_count(&self) -> usize {
        self.pop_size - self.elite_count()
    }

    /// Checks every parameter, failing on the first one out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pop_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        for (name, value) in [
            ("mutation_rate", self.mutation_rate),
            ("crossover_rate", self.crossover_rate),
            ("elitism", self.elitism),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { name, value });
            }
        }
        self.selection.validate(self.parent_count())
    }
}

#[cfg(test)]
mod tests {
    use crate::selection::TournamentParams;

    use super::*;

    fn config() -> PopulationConfig {
        PopulationConfig {
            pop_size: 10,
            mutation_rate: 0.05,
            crossover_rate: 0.8,
            n_crossover_points: 2,
            elitism: 0.2,
            fitness: FitnessFunction::MaximiseReward,
            selection: Selection::Roulette,
            parent_pool: ParentPool::All,
            workers: 0,
            seed: Some(1),
        }
    }

    #[test]
    fn test_counts() {
        let mut config = config();
        assert_eq!(config.elite_count(), 2);
        assert_eq!(config.parent_count(), 8);

        config.elitism = 0.25;
        assert_eq!(config.elite_count(), 3);
        config.elitism = 1.0;
        assert_eq!(config.elite_count(), 10);
        assert_eq!(config.parent_count(), 0);
        config.elitism = 0.0;
        assert_eq!(config.elite_count(), 0);
    }

    #[test]
    fn test_validate() {
        assert_eq!(config().validate(), Ok(()));

        let mut c = config();
        c.pop_size = 0;
        assert_eq!(c.validate(), Err(ConfigError::EmptyPopulation));

        let mut c = config();
        c.mutation_rate = 1.5;
        assert_eq!(
            c.validate(),
            Err(ConfigError::RateOutOfRange {
                name: "mutation_rate",
                value: 1.5
            })
        );

        let mut c = config();
        c.elitism = -0.1;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::RateOutOfRange { name: "elitism", .. })
        ));

        let mut c = config();
        c.crossover_rate = f32::NAN;
        assert!(c.validate().is_err());

        let mut c = config();
        c.n_crossover_points = 0;
        assert_eq!(c.validate(), Ok(()));

        let mut c = config();
        c.selection = Selection::Tournament(TournamentParams { fraction: 0.1 });
        assert!(matches!(
            c.validate(),
            Err(ConfigError::EmptyTournament { n_parents: 8, .. })
        ));
    }

    #[test]
    fn test_parent_pool_names() {
        let pool: ParentPool = serde_json::from_str("\"NON_ELITE\"").unwrap();
        assert_eq!(pool, ParentPool::NonElite);
        assert_eq!(ParentPool::default(), ParentPool::All);
    }
}

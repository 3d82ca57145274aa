use serde::{Deserialize, Serialize};
use snakevo_engine::{Direction, SnakeConfig, observation::OBSERVATION_LEN};
use snakevo_network::{Architecture, ArchitectureError};
use snakevo_training::{
    ConfigError, FitnessFunction, ParentPool, PopulationConfig, Selection, SelectionKind,
    SelectionParams,
};

/// Hyper-parameter file of a training run.
///
/// Fitness function and selection names are kept as strings here and
/// resolved by [`HyperParams::population_config`], so that an unknown name is
/// reported as a configuration error rather than a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HyperParams {
    pub generations: usize,
    pub population_size: usize,
    pub mutation_rate: f32,
    pub crossover_rate: f32,
    pub crossover_points: usize,
    pub elitism: f32,
    pub fitness_function: String,
    pub selection_type: String,
    #[serde(default)]
    pub selection_params: SelectionParams,
    #[serde(rename = "type", default)]
    pub algorithm: AlgorithmType,
    #[serde(default = "default_hidden_layers")]
    pub hidden_layers: Vec<usize>,
    #[serde(default = "default_grid_size")]
    pub grid_width: u16,
    #[serde(default = "default_grid_size")]
    pub grid_height: u16,
    #[serde(default = "default_max_steps_without_food")]
    pub max_steps_without_food: usize,
    #[serde(default)]
    pub parent_pool: ParentPool,
    /// Evaluation threads, `0` uses the available parallelism.
    #[serde(default)]
    pub workers: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlgorithmType {
    #[default]
    Generational,
}

fn default_hidden_layers() -> Vec<usize> {
    vec![16]
}

fn default_grid_size() -> u16 {
    SnakeConfig::default().grid_width
}

fn default_max_steps_without_food() -> usize {
    SnakeConfig::default().max_steps_without_food
}

/// Smallest grid edge that leaves room to move around the start cell.
pub const MIN_GRID_SIZE: u16 = 3;

impl HyperParams {
    /// Resolves names and selection parameters into a validated population
    /// configuration.
    ///
    /// `seed` overrides the seed of the file.
    pub fn population_config(&self, seed: Option<u64>) -> Result<PopulationConfig, ConfigError> {
        let fitness = self.fitness_function.parse::<FitnessFunction>()?;
        let kind = self.selection_type.parse::<SelectionKind>()?;
        let selection = Selection::from_params(kind, &self.selection_params)?;
        let config = PopulationConfig {
            pop_size: self.population_size,
            mutation_rate: self.mutation_rate,
            crossover_rate: self.crossover_rate,
            n_crossover_points: self.crossover_points,
            elitism: self.elitism,
            fitness,
            selection,
            parent_pool: self.parent_pool,
            workers: self.workers,
            seed: seed.or(self.seed),
        };
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn snake_config(&self) -> SnakeConfig {
        SnakeConfig {
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            max_steps_without_food: self.max_steps_without_food,
        }
    }

    /// Network mapping a snake observation to one of the four headings.
    pub fn architecture(&self) -> Result<Architecture, ArchitectureError> {
        Architecture::with_hidden(OBSERVATION_LEN, &self.hidden_layers, Direction::LEN)
    }
}

#[cfg(test)]
mod tests {
    use snakevo_training::{RankParams, TournamentParams};

    use super::*;

    const FILE: &str = r#"{
        "generations": 50,
        "population_size": 100,
        "mutation_rate": 0.05,
        "crossover_rate": 0.9,
        "crossover_points": 2,
        "elitism": 0.1,
        "fitness_function": "MAXIMISE_FOOD_EATEN",
        "selection_type": "RANK",
        "selection_params": { "bias": 1.5 },
        "type": "GENERATIONAL",
        "screen_width": 400,
        "graphics": false
    }"#;

    #[test]
    fn test_parse_file_with_defaults() {
        let params: HyperParams = serde_json::from_str(FILE).unwrap();
        assert_eq!(params.generations, 50);
        assert_eq!(params.algorithm, AlgorithmType::Generational);
        assert_eq!(params.hidden_layers, [16]);
        assert_eq!(params.snake_config(), SnakeConfig::default());
        assert_eq!(params.parent_pool, ParentPool::All);
        assert_eq!(params.seed, None);

        let config = params.population_config(Some(9)).unwrap();
        assert_eq!(config.pop_size, 100);
        assert_eq!(config.elite_count(), 10);
        assert_eq!(config.fitness, FitnessFunction::MaximiseFoodEaten);
        assert_eq!(config.selection, Selection::Rank(RankParams { bias: 1.5 }));
        assert_eq!(config.seed, Some(9));

        let arch = params.architecture().unwrap();
        assert_eq!(arch.sizes(), [OBSERVATION_LEN, 16, Direction::LEN]);
    }

    #[test]
    fn test_tournament_size_key() {
        let mut params: HyperParams = serde_json::from_str(FILE).unwrap();
        params.selection_type = "TOURNAMENT".to_owned();
        params.selection_params = serde_json::from_str(r#"{"tournament_size": 0.1}"#).unwrap();
        let config = params.population_config(None).unwrap();
        assert_eq!(
            config.selection,
            Selection::Tournament(TournamentParams { fraction: 0.1 })
        );
    }

    #[test]
    fn test_unknown_names_are_config_errors() {
        let mut params: HyperParams = serde_json::from_str(FILE).unwrap();
        params.fitness_function = "MAXIMISE_STYLE".to_owned();
        assert!(matches!(
            params.population_config(None),
            Err(ConfigError::UnknownFitnessFunction { .. })
        ));

        let mut params: HyperParams = serde_json::from_str(FILE).unwrap();
        params.selection_type = "LOTTERY".to_owned();
        assert!(matches!(
            params.population_config(None),
            Err(ConfigError::UnknownSelection { .. })
        ));

        let mut params: HyperParams = serde_json::from_str(FILE).unwrap();
        params.selection_params.bias = None;
        assert!(matches!(
            params.population_config(None),
            Err(ConfigError::MissingSelectionParameter { .. })
        ));
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let json = FILE.replace("GENERATIONAL", "STEADY_STATE");
        assert!(serde_json::from_str::<HyperParams>(&json).is_err());
    }
}

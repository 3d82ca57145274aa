use std::path::{Path, PathBuf};

use anyhow::{Context as _, ensure};
use chrono::{DateTime, Local, Utc};
use snakevo_engine::{SnakeConfig, SnakeEnv};
use snakevo_training::{Generational, Population, PopulationConfig};

use crate::{
    schema::{
        hyper_params::{HyperParams, MIN_GRID_SIZE},
        model::TrainedModel,
    },
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Path to the hyper-parameter file (JSON format)
    #[arg(short = 'p', long = "hyper-params")]
    hyper_params: PathBuf,
    /// Number of times the whole algorithm is run
    #[arg(short = 'e', long, default_value_t = 1)]
    executions: usize,
    /// Directory receiving one export directory per execution
    #[arg(long, default_value = "./models/evolution/")]
    output_dir: PathBuf,
    /// Seed overriding the one in the hyper-parameter file
    #[arg(long)]
    seed: Option<u64>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        hyper_params,
        executions,
        output_dir,
        seed,
    } = arg;

    // kept verbatim for the export
    let raw: serde_json::Value = util::read_json_file("hyper-parameter", hyper_params)?;
    let params: HyperParams = serde_json::from_value(raw.clone()).with_context(|| {
        format!(
            "Invalid hyper-parameter file: {}",
            hyper_params.display()
        )
    })?;

    ensure!(*executions > 0, "at least one execution is required");
    ensure!(params.generations > 0, "at least one generation is required");
    ensure!(
        params.grid_width >= MIN_GRID_SIZE && params.grid_height >= MIN_GRID_SIZE,
        "grid must be at least {MIN_GRID_SIZE}x{MIN_GRID_SIZE}, got {}x{}",
        params.grid_width,
        params.grid_height
    );
    let base_config = params
        .population_config(*seed)
        .context("Invalid hyper-parameters")?;
    let architecture = params
        .architecture()
        .context("Invalid hidden layer sizes")?;
    let snake_config = params.snake_config();

    tracing::info!(
        generations = params.generations,
        pop_size = base_config.pop_size,
        mutation_rate = base_config.mutation_rate,
        crossover_rate = base_config.crossover_rate,
        crossover_points = base_config.n_crossover_points,
        elitism = base_config.elitism,
        selection = %base_config.selection,
        fitness = %base_config.fitness,
        "hyper-parameters loaded"
    );

    for execution in 0..*executions {
        tracing::info!(execution = execution + 1, of = *executions, "starting execution");

        let config = PopulationConfig {
            seed: base_config.seed.map(|s| s.wrapping_add(execution as u64)),
            ..base_config.clone()
        };
        let env_seed = config.seed;
        let population = Population::new(config, architecture.clone(), |i| {
            new_env(snake_config, env_seed, i)
        })
        .context("Failed to initialise population")?;

        let mut driver = Generational::new(population);
        driver
            .run(params.generations)
            .with_context(|| format!("Execution {} failed", execution + 1))?;

        let trained_at = Utc::now();
        let dir = export_dir(output_dir, trained_at, execution, *executions);
        export(&dir, &driver, &params, &raw, trained_at)?;
    }

    Ok(())
}

/// Builds the environment of agent `index`. Seeded runs derive one
/// environment seed per agent so episodes are reproducible.
fn new_env(config: SnakeConfig, seed: Option<u64>, index: usize) -> SnakeEnv {
    match seed {
        Some(seed) => SnakeEnv::with_seed(
            config,
            seed.wrapping_mul(0x9e37_79b9_7f4a_7c15)
                .wrapping_add(index as u64),
        ),
        None => SnakeEnv::from_os_rng(config),
    }
}

fn export_dir(
    output_dir: &Path,
    trained_at: DateTime<Utc>,
    execution: usize,
    executions: usize,
) -> PathBuf {
    let stamp = trained_at
        .with_timezone(&Local)
        .format("%m_%d_%Y__%H_%M_%S")
        .to_string();
    if executions == 1 {
        output_dir.join(stamp)
    } else {
        output_dir.join(format!("{stamp}__{}", execution + 1))
    }
}

fn export(
    dir: &Path,
    driver: &Generational<SnakeEnv>,
    params: &HyperParams,
    raw_params: &serde_json::Value,
    trained_at: DateTime<Utc>,
) -> anyhow::Result<()> {
    let population = driver.population();
    let best = driver
        .best_individual_of(params.generations - 1)
        .context("No generation was recorded")?;

    let model = TrainedModel {
        trained_at,
        generations: population.generation(),
        fitness_function: population.config().fitness,
        final_fitness: best.fitness().unwrap_or_default(),
        episode: *best.episode(),
        environment: *best.environment().config(),
        architecture: population.architecture().clone(),
        genome: best.get_genome(),
    };

    let model_path = util::write_json_file(dir, "model.json", &model)?;
    util::write_json_file(dir, "fitness_data.json", driver.records())?;
    util::write_json_file(dir, "hyperparameters.json", raw_params)?;

    tracing::info!(
        path = %model_path.display(),
        fitness = model.final_fitness,
        score = model.episode.score,
        steps = model.episode.steps,
        parameters = model.genome.parameter_count(),
        "model saved"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use snakevo_engine::Environment as _;

    use super::*;

    #[test]
    fn test_export_dir_names() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let single = export_dir(Path::new("out"), at, 0, 1);
        let name = single.file_name().unwrap().to_str().unwrap();
        assert_eq!(name.len(), "03_09_2024__14_05_07".len());

        let multi = export_dir(Path::new("out"), at, 1, 3);
        assert_eq!(multi, Path::new("out").join(format!("{name}__2")));
    }

    #[test]
    fn test_seeded_envs_differ_per_agent_and_repeat() {
        let config = SnakeConfig::default();
        let food = |index| {
            let mut env = new_env(config, Some(5), index);
            env.reset();
            env.food()
        };
        assert_eq!(food(0), food(0));
        assert!((0..8).any(|i| food(i) != food(0)));
    }
}

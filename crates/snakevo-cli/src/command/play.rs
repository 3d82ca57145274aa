use std::{path::PathBuf, sync::Arc};

use anyhow::{Context as _, ensure};
use serde::Serialize;
use snakevo_engine::{Environment as _, EpisodeState, SnakeEnv};
use snakevo_training::{Agent, EpisodeResult};

use crate::{
    schema::hyper_params::MIN_GRID_SIZE,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path to the model file (JSON format)
    model_path: PathBuf,
    /// Seed of the food placement
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct PlayReport {
    #[serde(flatten)]
    episode: EpisodeResult,
    outcome: String,
    snake_len: usize,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { model_path, seed } = arg;

    let model = util::read_model_file(model_path)?;
    let grid = model.environment;
    ensure!(
        grid.grid_width >= MIN_GRID_SIZE && grid.grid_height >= MIN_GRID_SIZE,
        "model grid {}x{} is too small",
        grid.grid_width,
        grid.grid_height
    );
    let env = match seed {
        Some(seed) => SnakeEnv::with_seed(model.environment, *seed),
        None => SnakeEnv::from_os_rng(model.environment),
    };
    ensure!(
        model.architecture.input_len() == env.observation_len()
            && model.architecture.output_len() == env.action_count(),
        "model network {:?} does not match the snake observation and actions",
        model.architecture.sizes()
    );
    let mut agent = Agent::new(Arc::new(model.architecture), model.genome, env)
        .with_context(|| format!("Model does not fit its network: {}", model_path.display()))?;

    let episode = agent.simulate().context("Episode failed")?;
    let state = agent.environment().state();
    tracing::info!(
        steps = episode.steps,
        score = episode.score,
        reward = episode.total_reward,
        outcome = ?state,
        "episode finished"
    );

    let report = PlayReport {
        episode,
        outcome: outcome_name(state).to_owned(),
        snake_len: agent.environment().snake().len(),
    };
    Output::stdout().write_json(&report)
}

fn outcome_name(state: EpisodeState) -> &'static str {
    match state {
        EpisodeState::Running => "running",
        EpisodeState::Collided => "collided",
        EpisodeState::Starved => "starved",
        EpisodeState::GridFilled => "grid_filled",
    }
}

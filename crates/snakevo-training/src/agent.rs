//! Agents: a genome, the environment it is scored in, and its last result.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use snakevo_engine::Environment;
use snakevo_network::Architecture;

use crate::{error::ShapeMismatchError, fitness::FitnessFunction, genome::Genome};

/// Statistics of one completed episode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeResult {
    /// Steps survived.
    pub steps: usize,
    /// Items collected.
    pub score: usize,
    /// Sum of all step rewards.
    pub total_reward: f32,
}

/// One member of the population.
///
/// Every agent owns its genome and its environment exclusively. Only the
/// architecture is shared, and it is immutable.
#[derive(Debug, Clone)]
pub struct Agent<E> {
    architecture: Arc<Architecture>,
    genome: Genome,
    environment: E,
    fitness: Option<f32>,
    episode: EpisodeResult,
}

impl<E> Agent<E>
where
    E: Environment,
{
    pub fn new(
        architecture: Arc<Architecture>,
        genome: Genome,
        environment: E,
    ) -> Result<Self, ShapeMismatchError> {
        genome.check_shape(&architecture)?;
        Ok(Self {
            architecture,
            genome,
            environment,
            fitness: None,
            episode: EpisodeResult::default(),
        })
    }

    pub fn random<R>(architecture: Arc<Architecture>, environment: E, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let genome = Genome::random(&architecture, rng);
        Self {
            architecture,
            genome,
            environment,
            fitness: None,
            episode: EpisodeResult::default(),
        }
    }

    #[must_use]
    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    #[must_use]
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Returns an independent copy of the current genome.
    #[must_use]
    pub fn get_genome(&self) -> Genome {
        self.genome.clone()
    }

    /// Replaces the genome after checking it against the architecture.
    ///
    /// A mismatch means the genome was built for another network; the agent is
    /// left unchanged.
    pub fn set_genome(&mut self, genome: Genome) -> Result<(), ShapeMismatchError> {
        genome.check_shape(&self.architecture)?;
        self.genome = genome;
        Ok(())
    }

    #[must_use]
    pub fn environment(&self) -> &E {
        &self.environment
    }

    /// Fitness of the current generation, `None` until evaluated.
    #[must_use]
    pub fn fitness(&self) -> Option<f32> {
        self.fitness
    }

    #[must_use]
    pub fn episode(&self) -> &EpisodeResult {
        &self.episode
    }

    #[must_use]
    pub fn choose_action(&self, observation: &[f32]) -> usize {
        self.architecture.forward(self.genome.layers(), observation)
    }

    /// Plays one episode until the environment reports `done`.
    ///
    /// Statistics accumulated before an environment error are kept in
    /// [`Agent::episode`].
    pub fn simulate(&mut self) -> Result<EpisodeResult, E::Error> {
        let mut transition = self.environment.reset();
        let mut total_reward = transition.reward;
        let mut result = Ok(());
        while !transition.done {
            let action = self.choose_action(&transition.observation);
            match self.environment.step(action) {
                Ok(next) => {
                    total_reward += next.reward;
                    transition = next;
                }
                Err(err) => {
                    result = Err(err);
                    break;
                }
            }
        }
        self.episode = EpisodeResult {
            steps: self.environment.steps_taken(),
            score: self.environment.score(),
            total_reward,
        };
        result.map(|()| self.episode)
    }

    /// Simulates one episode and stores its fitness.
    ///
    /// An agent whose episode fails is scored zero.
    pub fn evaluate(&mut self, fitness_fn: FitnessFunction) -> f32 {
        let fitness = match self.simulate() {
            Ok(episode) => fitness_fn.evaluate(&episode),
            Err(err) => {
                tracing::warn!(%err, steps = self.episode.steps, "episode failed, scoring zero");
                0.0
            }
        };
        self.fitness = Some(fitness);
        fitness
    }

    /// Clears fitness and episode statistics. The genome is untouched.
    pub fn reset(&mut self) {
        self.fitness = None;
        self.episode = EpisodeResult::default();
    }
}

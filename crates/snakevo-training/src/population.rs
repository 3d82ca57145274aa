//! Population management for one generational evolution run.
//!
//! A [`Population`] owns a fixed number of agents and moves them through one
//! generation per [`Population::step`]:
//!
//! 1. **Evaluate** - every agent plays one episode on a bounded pool of
//!    threads, then agents are sorted by fitness (best first)
//! 2. **Track best** - a strictly better agent replaces the best-ever copy
//! 3. **Select** - the top `elite_count` genomes are copied aside and
//!    `pop_size - elite_count` parents are drawn from the parent pool
//! 4. **Crossover** - parents are split at the midpoint and paired
//!    position-wise; each pair is bred with probability `crossover_rate`
//! 5. **Mutate** - only freshly bred children are mutated
//! 6. **Replace** - children, carried parents and elites become the genomes
//!    of the next generation
//! 7. **Reset** - fitness, statistics and buffers are cleared
//!
//! # Carried Parents
//!
//! A pair that fails the crossover draw, and the leftover parent of an odd
//! selection, enter the next generation unchanged and unmutated. Children,
//! carried parents and elites therefore always add up to `pop_size`.
//!
//! # Determinism
//!
//! Breeding draws from one RNG seeded by [`PopulationConfig::seed`]. Episodes
//! draw from each environment's own RNG, so a run is reproducible when both
//! are seeded, regardless of the number of evaluation threads.

use std::{num::NonZeroUsize, sync::Arc};

use rand::{Rng as _, SeedableRng as _, rngs::StdRng};
use snakevo_engine::Environment;
use snakevo_network::Architecture;

use crate::{
    agent::Agent,
    config::{ParentPool, PopulationConfig},
    error::{ConfigError, EvolutionError},
    fitness,
    genome::Genome,
    selection::Scored as _,
    statistics::{FitnessStats, GenerationRecord},
};

#[derive(Debug)]
pub struct Population<E> {
    config: PopulationConfig,
    architecture: Arc<Architecture>,
    agents: Vec<Agent<E>>,
    best: Option<Agent<E>>,
    generation: usize,
    workers: NonZeroUsize,
    rng: StdRng,
    selected: Vec<usize>,
    children: Vec<Genome>,
    carried: Vec<Genome>,
    elites: Vec<Genome>,
}

impl<E> Population<E>
where
    E: Environment + Clone + Send,
{
    /// Validates the configuration and creates `pop_size` agents with random
    /// genomes, one environment per agent.
    ///
    /// `env_factory` receives the agent index.
    pub fn new<F>(
        config: PopulationConfig,
        architecture: Architecture,
        env_factory: F,
    ) -> Result<Self, ConfigError>
    where
        F: FnMut(usize) -> E,
    {
        config.validate()?;

        let environments = (0..config.pop_size).map(env_factory).collect::<Vec<_>>();
        for env in &environments {
            check_dimensions(&architecture, env)?;
        }

        let mut rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let architecture = Arc::new(architecture);
        let agents = environments
            .into_iter()
            .map(|env| Agent::random(Arc::clone(&architecture), env, &mut rng))
            .collect();
        let workers = fitness::resolve_workers(config.workers);

        tracing::debug!(
            pop_size = config.pop_size,
            elites = config.elite_count(),
            parameters = architecture.parameter_count(),
            workers = workers.get(),
            "population initialised"
        );

        Ok(Self {
            config,
            architecture,
            agents,
            best: None,
            generation: 0,
            workers,
            rng,
            selected: vec![],
            children: vec![],
            carried: vec![],
            elites: vec![],
        })
    }

    #[must_use]
    pub fn config(&self) -> &PopulationConfig {
        &self.config
    }

    #[must_use]
    pub fn architecture(&self) -> &Architecture {
        &self.architecture
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent<E>] {
        &self.agents
    }

    /// Best agent seen so far, a snapshot taken when it was evaluated.
    #[must_use]
    pub fn best(&self) -> Option<&Agent<E>> {
        self.best.as_ref()
    }

    /// Number of completed generations.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Runs one full generation and returns what was observed during it.
    pub fn step(&mut self) -> Result<GenerationRecord, EvolutionError> {
        let fitness = self.evaluate();
        let stats = FitnessStats::new(fitness.iter().copied())
            .ok_or(ConfigError::EmptyPopulation)?;
        let best_ever_fitness = self.track_best();

        tracing::info!(
            generation = self.generation,
            best = stats.max,
            mean = stats.mean,
            best_ever = best_ever_fitness,
            "generation evaluated"
        );

        self.select();
        self.crossover();
        self.mutate();
        self.replace()?;
        self.reset();

        let record = GenerationRecord {
            generation: self.generation,
            fitness,
            stats,
            best_ever_fitness,
        };
        self.generation += 1;
        Ok(record)
    }

    /// Plays every agent and sorts the population by fitness, best first.
    fn evaluate(&mut self) -> Vec<f32> {
        fitness::evaluate_population(&mut self.agents, self.config.fitness, self.workers);
        self.agents.sort_by(|a, b| b.score().total_cmp(&a.score()));
        self.agents.iter().map(|a| a.score()).collect()
    }

    fn track_best(&mut self) -> f32 {
        let top = &self.agents[0];
        let improved = self
            .best
            .as_ref()
            .is_none_or(|best| top.score() > best.score());
        if improved {
            self.best = Some(top.clone());
        }
        self.best.as_ref().map_or(top.score(), |best| best.score())
    }

    fn select(&mut self) {
        let elite_count = self.config.elite_count();
        self.elites
            .extend(self.agents[..elite_count].iter().map(Agent::get_genome));
        if elite_count > 0 {
            tracing::debug!(
                elite_fitness = ?self.agents[..elite_count]
                    .iter()
                    .map(|a| a.score())
                    .collect::<Vec<_>>(),
                "elites copied"
            );
        }

        let offset = match self.config.parent_pool {
            ParentPool::All => 0,
            ParentPool::NonElite => elite_count,
        };
        let pool = self.agents[offset..]
            .iter()
            .map(|a| a.score())
            .collect::<Vec<_>>();
        let n_parents = self.config.parent_count();
        let indices = self
            .config
            .selection
            .select_indices(&pool, n_parents, &mut self.rng);
        self.selected.extend(indices.into_iter().map(|i| i + offset));
    }

    fn crossover(&mut self) {
        let middle = self.selected.len() / 2;
        let (first, second) = self.selected.split_at(middle);
        let rate = f64::from(self.config.crossover_rate);
        // with an odd count, `second` holds the leftover parent at its end
        for (&i, &j) in first.iter().zip(second) {
            let (p1, p2) = (self.agents[i].genome(), self.agents[j].genome());
            if self.rng.random_bool(rate) {
                let (c1, c2) = p1.crossover(p2, self.config.n_crossover_points, &mut self.rng);
                self.children.extend([c1, c2]);
            } else {
                self.carried.extend([p1.clone(), p2.clone()]);
            }
        }
        if let Some(&leftover) = second.get(first.len()) {
            self.carried.push(self.agents[leftover].get_genome());
        }
        tracing::debug!(
            children = self.children.len(),
            carried = self.carried.len(),
            "crossover done"
        );
    }

    fn mutate(&mut self) {
        for child in &mut self.children {
            child.mutate(self.config.mutation_rate, &mut self.rng);
        }
    }

    fn replace(&mut self) -> Result<(), EvolutionError> {
        let actual = self.children.len() + self.carried.len() + self.elites.len();
        if actual != self.agents.len() {
            return Err(EvolutionError::ReplacementSize {
                expected: self.agents.len(),
                actual,
            });
        }
        let genomes = self
            .children
            .drain(..)
            .chain(self.carried.drain(..))
            .chain(self.elites.drain(..));
        for (agent, genome) in self.agents.iter_mut().zip(genomes) {
            agent.set_genome(genome)?;
        }
        Ok(())
    }

    fn reset(&mut self) {
        for agent in &mut self.agents {
            agent.reset();
        }
        self.selected.clear();
        self.children.clear();
        self.carried.clear();
        self.elites.clear();
    }
}

fn check_dimensions<E>(architecture: &Architecture, env: &E) -> Result<(), ConfigError>
where
    E: Environment,
{
    if architecture.input_len() != env.observation_len() {
        return Err(ConfigError::DimensionMismatch {
            what: "inputs",
            network: architecture.input_len(),
            environment: env.observation_len(),
        });
    }
    if architecture.output_len() != env.action_count() {
        return Err(ConfigError::DimensionMismatch {
            what: "actions",
            network: architecture.output_len(),
            environment: env.action_count(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use snakevo_engine::{Direction, SnakeConfig, SnakeEnv, observation::OBSERVATION_LEN};

    use super::*;
    use crate::{
        fitness::FitnessFunction,
        selection::{RankParams, Selection, TournamentParams},
    };

    fn config(pop_size: usize) -> PopulationConfig {
        PopulationConfig {
            pop_size,
            mutation_rate: 0.05,
            crossover_rate: 0.8,
            n_crossover_points: 2,
            elitism: 0.2,
            fitness: FitnessFunction::MaximiseMoves,
            selection: Selection::Roulette,
            parent_pool: ParentPool::All,
            workers: 2,
            seed: Some(3),
        }
    }

    fn snake_population(config: PopulationConfig) -> Population<SnakeEnv> {
        let arch = Architecture::with_hidden(OBSERVATION_LEN, &[6], Direction::LEN).unwrap();
        Population::new(config, arch, |i| {
            SnakeEnv::with_seed(SnakeConfig::default(), i as u64)
        })
        .unwrap()
    }

    #[test]
    fn test_step_keeps_size_and_resets() {
        let mut population = snake_population(config(9));
        for g in 0..3 {
            let record = population.step().unwrap();
            assert_eq!(record.generation, g);
            assert_eq!(record.fitness.len(), 9);
            assert!(record.fitness.is_sorted_by(|a, b| a >= b));
            assert_eq!(population.agents().len(), 9);
            assert!(population.agents().iter().all(|a| a.fitness().is_none()));
        }
        assert_eq!(population.generation(), 3);
        assert!(population.best().is_some());
    }

    #[test]
    fn test_odd_parent_count_is_carried() {
        // 7 agents, 1 elite: 6 parents; 8 agents, 1 elite: 7 parents
        for pop_size in [7, 8] {
            let mut config = config(pop_size);
            config.elitism = 0.125;
            config.crossover_rate = 0.0;
            let mut population = snake_population(config);
            population.step().unwrap();
            assert_eq!(population.agents().len(), pop_size);
        }
    }

    #[test]
    fn test_non_elite_pool_never_selects_elites() {
        for selection in [
            Selection::Roulette,
            Selection::Rank(RankParams { bias: 2.0 }),
            Selection::Tournament(TournamentParams { fraction: 1.0 }),
        ] {
            let mut config = config(10);
            config.elitism = 0.3;
            config.parent_pool = ParentPool::NonElite;
            config.selection = selection;
            let mut population = snake_population(config);

            for _ in 0..5 {
                population.evaluate();
                population.select();
                assert_eq!(population.elites.len(), 3);
                assert_eq!(population.selected.len(), 7);
                assert!(population.selected.iter().all(|&i| (3..10).contains(&i)));
                population.reset();
            }
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let arch = Architecture::with_hidden(OBSERVATION_LEN + 1, &[], Direction::LEN).unwrap();
        let err = Population::new(config(4), arch, |_| {
            SnakeEnv::with_seed(SnakeConfig::default(), 0)
        })
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DimensionMismatch {
                what: "inputs",
                network: OBSERVATION_LEN + 1,
                environment: OBSERVATION_LEN,
            }
        );

        let arch = Architecture::with_hidden(OBSERVATION_LEN, &[], 3).unwrap();
        let err = Population::new(config(4), arch, |_| {
            SnakeEnv::with_seed(SnakeConfig::default(), 0)
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DimensionMismatch { what: "actions", .. }
        ));
    }
}

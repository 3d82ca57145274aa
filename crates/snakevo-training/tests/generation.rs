use snakevo_engine::{Environment, Transition};
use snakevo_network::Architecture;
use snakevo_training::{
    ConfigError, FitnessFunction, Generational, Genome, ParentPool, Population, PopulationConfig,
    RankParams, Selection, TournamentParams,
};

const MAX_STEPS: usize = 12;

/// Deterministic corridor: action 1 moves on and earns a point, action 0 or
/// the end of the corridor ends the episode.
#[derive(Debug, Clone, Default)]
struct Corridor {
    steps: usize,
    score: usize,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("sensor failure")]
struct SensorFailure;

impl Environment for Corridor {
    type Error = SensorFailure;

    fn observation_len(&self) -> usize {
        2
    }

    fn action_count(&self) -> usize {
        2
    }

    fn reset(&mut self) -> Transition {
        *self = Self::default();
        Transition::initial(vec![1.0, 0.5])
    }

    #[expect(clippy::cast_precision_loss)]
    fn step(&mut self, action: usize) -> Result<Transition, Self::Error> {
        self.steps += 1;
        if action == 1 {
            self.score += 1;
        }
        Ok(Transition {
            observation: vec![1.0, self.steps as f32 / MAX_STEPS as f32],
            reward: if action == 1 { 1.0 } else { -1.0 },
            done: action == 0 || self.steps >= MAX_STEPS,
        })
    }

    fn score(&self) -> usize {
        self.score
    }

    fn steps_taken(&self) -> usize {
        self.steps
    }
}

/// Fails on the third step of every episode.
#[derive(Debug, Clone, Default)]
struct Broken {
    steps: usize,
}

impl Environment for Broken {
    type Error = SensorFailure;

    fn observation_len(&self) -> usize {
        2
    }

    fn action_count(&self) -> usize {
        2
    }

    fn reset(&mut self) -> Transition {
        self.steps = 0;
        Transition::initial(vec![1.0, 0.5])
    }

    fn step(&mut self, _action: usize) -> Result<Transition, Self::Error> {
        self.steps += 1;
        if self.steps == 3 {
            return Err(SensorFailure);
        }
        Ok(Transition {
            observation: vec![1.0, 0.5],
            reward: 1.0,
            done: false,
        })
    }

    fn score(&self) -> usize {
        0
    }

    fn steps_taken(&self) -> usize {
        self.steps
    }
}

fn config() -> PopulationConfig {
    PopulationConfig {
        pop_size: 12,
        mutation_rate: 0.1,
        crossover_rate: 0.7,
        n_crossover_points: 2,
        elitism: 0.25,
        fitness: FitnessFunction::MaximiseMoves,
        selection: Selection::Roulette,
        parent_pool: ParentPool::All,
        workers: 3,
        seed: Some(42),
    }
}

fn architecture() -> Architecture {
    Architecture::with_hidden(2, &[3], 2).unwrap()
}

fn corridor_population(config: PopulationConfig) -> Population<Corridor> {
    Population::new(config, architecture(), |_| Corridor::default()).unwrap()
}

fn genomes<E>(population: &Population<E>) -> Vec<Genome>
where
    E: Environment + Clone + Send,
{
    population.agents().iter().map(|a| a.get_genome()).collect()
}

fn same_multiset(a: &[Genome], b: &[Genome]) -> bool {
    let mut unmatched = b.to_vec();
    a.iter().all(|g| {
        unmatched
            .iter()
            .position(|u| u == g)
            .map(|i| unmatched.swap_remove(i))
            .is_some()
    }) && unmatched.is_empty()
}

#[test]
fn population_size_is_constant_for_every_strategy() {
    let strategies = [
        Selection::Roulette,
        Selection::Rank(RankParams { bias: 1.5 }),
        Selection::Tournament(TournamentParams { fraction: 1.0 }),
    ];
    for selection in strategies {
        for parent_pool in [ParentPool::All, ParentPool::NonElite] {
            for pop_size in [1, 2, 5, 12] {
                let mut config = config();
                config.pop_size = pop_size;
                config.selection = selection;
                config.parent_pool = parent_pool;
                config.elitism = 0.2;
                let mut driver = Generational::new(corridor_population(config));
                driver.run(4).unwrap();
                assert_eq!(driver.population().agents().len(), pop_size);
                for record in driver.records() {
                    assert_eq!(record.fitness.len(), pop_size);
                }
            }
        }
    }
}

#[test]
fn full_elitism_preserves_genomes() {
    let mut config = config();
    config.elitism = 1.0;
    config.mutation_rate = 1.0;
    let mut population = corridor_population(config);
    let before = genomes(&population);
    population.step().unwrap();
    assert!(same_multiset(&before, &genomes(&population)));
}

#[test]
fn no_breeding_only_reuses_parent_genomes() {
    let mut config = config();
    config.crossover_rate = 0.0;
    config.mutation_rate = 1.0;
    let mut population = corridor_population(config);
    let before = genomes(&population);
    population.step().unwrap();
    for genome in genomes(&population) {
        assert!(before.contains(&genome));
    }
}

#[test]
fn best_ever_fitness_never_decreases() {
    let mut config = config();
    config.selection = Selection::Rank(RankParams { bias: 2.0 });
    let mut driver = Generational::new(corridor_population(config));
    let history = driver.run(10).unwrap();
    assert_eq!(history.len(), 10);
    assert!(history.is_sorted());

    for (generation, record) in driver.records().iter().enumerate() {
        assert_eq!(record.generation, generation);
        assert!(record.stats.max <= record.best_ever_fitness);
        let best = driver.best_individual_of(generation).unwrap();
        assert_eq!(best.fitness(), Some(history[generation]));
    }
    assert!(driver.best_individual_of(10).is_none());
    assert_eq!(
        driver.best_individual().and_then(|a| a.fitness()),
        history.last().copied()
    );
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = |workers| {
        let mut config = config();
        config.workers = workers;
        let mut driver = Generational::new(corridor_population(config));
        let history = driver.run(5).unwrap();
        let best = driver.best_individual().unwrap().get_genome();
        (history, best, genomes(driver.population()))
    };
    assert_eq!(run(1), run(4));
}

#[test]
fn failing_environment_scores_zero() {
    let mut config = config();
    config.fitness = FitnessFunction::MaximiseReward;
    let population = Population::new(config, architecture(), |_| Broken::default()).unwrap();
    let mut driver = Generational::new(population);
    let history = driver.run(2).unwrap();
    assert_eq!(history, [0.0, 0.0]);
    for record in driver.records() {
        assert!(record.fitness.iter().all(|f| *f == 0.0));
    }
    assert_eq!(driver.population().agents().len(), 12);
}

#[test]
fn invalid_configuration_is_rejected_up_front() {
    let mut bad = config();
    bad.crossover_rate = 1.01;
    let err = Population::new(bad, architecture(), |_| Corridor::default()).unwrap_err();
    assert_eq!(
        err,
        ConfigError::RateOutOfRange {
            name: "crossover_rate",
            value: 1.01
        }
    );

    let mut bad = config();
    bad.pop_size = 0;
    let err = Population::new(bad, architecture(), |_| Corridor::default()).unwrap_err();
    assert_eq!(err, ConfigError::EmptyPopulation);

    let wrong = Architecture::with_hidden(3, &[], 2).unwrap();
    let err = Population::new(config(), wrong, |_| Corridor::default()).unwrap_err();
    assert!(matches!(err, ConfigError::DimensionMismatch { .. }));
}

//! Generational driver: runs a population for a fixed number of generations.

use snakevo_engine::Environment;

use crate::{
    agent::Agent, error::EvolutionError, population::Population,
    statistics::GenerationRecord,
};

/// Replaces the whole population every generation and remembers the best
/// agent after each one.
#[derive(Debug)]
pub struct Generational<E> {
    population: Population<E>,
    best_per_generation: Vec<Agent<E>>,
    records: Vec<GenerationRecord>,
}

impl<E> Generational<E>
where
    E: Environment + Clone + Send,
{
    #[must_use]
    pub fn new(population: Population<E>) -> Self {
        Self {
            population,
            best_per_generation: vec![],
            records: vec![],
        }
    }

    /// Runs exactly `n_generations` generations.
    ///
    /// Returns the best-ever fitness after each of them. Calling `run` again
    /// continues from the current population.
    pub fn run(&mut self, n_generations: usize) -> Result<Vec<f32>, EvolutionError> {
        let mut history = Vec::with_capacity(n_generations);
        for _ in 0..n_generations {
            let record = self.population.step()?;
            if let Some(best) = self.population.best() {
                self.best_per_generation.push(best.clone());
            }
            history.push(record.best_ever_fitness);
            self.records.push(record);
        }
        Ok(history)
    }

    /// Best agent as of the end of `generation`, counted from zero.
    #[must_use]
    pub fn best_individual_of(&self, generation: usize) -> Option<&Agent<E>> {
        self.best_per_generation.get(generation)
    }

    /// Best agent of the whole run.
    #[must_use]
    pub fn best_individual(&self) -> Option<&Agent<E>> {
        self.population.best()
    }

    #[must_use]
    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    #[must_use]
    pub fn population(&self) -> &Population<E> {
        &self.population
    }

    #[must_use]
    pub fn into_population(self) -> Population<E> {
        self.population
    }
}

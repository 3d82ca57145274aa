//! Per-generation fitness statistics.

use serde::{Deserialize, Serialize};

/// Summary of one generation's fitness distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    /// Population standard deviation.
    pub std_dev: f32,
    pub total: f32,
}

impl FitnessStats {
    /// Computes the statistics of `values`, `None` if it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use snakevo_training::statistics::FitnessStats;
    /// let stats = FitnessStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert_eq!(stats.min, 2.0);
    /// assert_eq!(stats.max, 9.0);
    /// assert_eq!(stats.mean, 5.0);
    /// assert_eq!(stats.std_dev, 2.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let min = values.iter().copied().min_by(f32::total_cmp)?;
        let max = values.iter().copied().max_by(f32::total_cmp)?;
        let total = values.iter().sum::<f32>();
        let n = values.len() as f32;
        let mean = total / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
        Some(Self {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
            total,
        })
    }
}

/// Everything recorded about one completed generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Zero-based generation index.
    pub generation: usize,
    /// Fitness of every agent, best first.
    pub fitness: Vec<f32>,
    pub stats: FitnessStats,
    /// Best fitness seen in this or any earlier generation.
    pub best_ever_fitness: f32,
}

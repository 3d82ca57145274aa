//! Parent selection strategies.
//!
//! Every strategy draws `n_parents` indices from a fitness slice, with
//! replacement, so parents may repeat.
//!
//! # Roulette Wheel
//!
//! Each entry is picked with probability `fitness / Σ fitness`. Negative
//! fitness gets zero weight, and when every weight is zero the draw falls back
//! to uniform selection.
//!
//! # Rank
//!
//! Entries are ranked by fitness, the best gets rank `n` and the worst rank
//! `1`. Each entry is picked with probability `rank^bias / Σ rank^bias`, so a
//! larger bias increases the selection pressure and `bias = 0` is uniform.
//! Weights are computed as `(rank / n)^bias`, which keeps the best weight at
//! `1` however large the bias.
//!
//! # Tournament
//!
//! `floor(n_parents × fraction)` entries are sampled uniformly with
//! replacement and the fittest of them wins. Ties go to the first sampled
//! entry.
//!
//! Roulette and rank share the same cumulative walk: weights are sorted in
//! descending order, `u ~ U(0, 1)` is drawn and the first entry whose running
//! sum exceeds `u` is picked.

use std::{fmt, str::FromStr};

use rand::{Rng, seq::IndexedRandom as _};
use serde::{Deserialize, Serialize};
use snakevo_engine::Environment;

use crate::{agent::Agent, error::ConfigError};

/// Selection strategy names as they appear in hyper-parameter files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionKind {
    RouletteWheel,
    Rank,
    Tournament,
}

impl SelectionKind {
    pub const ALL: [Self; 3] = [Self::RouletteWheel, Self::Rank, Self::Tournament];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RouletteWheel => "ROULETTE_WHEEL",
            Self::Rank => "RANK",
            Self::Tournament => "TOURNAMENT",
        }
    }
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SelectionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownSelection { name: s.to_owned() })
    }
}

/// Raw selection parameters, as loaded from a hyper-parameter file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias: Option<f32>,
    /// Tournament size as a fraction of the parent count.
    #[serde(
        default,
        alias = "tournament_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub tournament_fraction: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankParams {
    pub bias: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TournamentParams {
    pub fraction: f32,
}

impl TournamentParams {
    /// Number of contestants for a draw of `n_parents` parents.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn size(&self, n_parents: usize) -> usize {
        (n_parents as f32 * self.fraction).floor() as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    Roulette,
    Rank(RankParams),
    Tournament(TournamentParams),
}

impl Selection {
    /// Builds a selection strategy, checking that its parameters are present
    /// and in range.
    pub fn from_params(kind: SelectionKind, params: &SelectionParams) -> Result<Self, ConfigError> {
        match kind {
            SelectionKind::RouletteWheel => Ok(Self::Roulette),
            SelectionKind::Rank => {
                let bias = params
                    .bias
                    .ok_or(ConfigError::MissingSelectionParameter {
                        kind,
                        parameter: "bias",
                    })?;
                if !bias.is_finite() || bias < 0.0 {
                    return Err(ConfigError::InvalidSelectionParameter {
                        parameter: "bias",
                        value: bias,
                    });
                }
                Ok(Self::Rank(RankParams { bias }))
            }
            SelectionKind::Tournament => {
                let fraction =
                    params
                        .tournament_fraction
                        .ok_or(ConfigError::MissingSelectionParameter {
                            kind,
                            parameter: "tournament_size",
                        })?;
                if !(fraction > 0.0 && fraction <= 1.0) {
                    return Err(ConfigError::InvalidSelectionParameter {
                        parameter: "tournament_size",
                        value: fraction,
                    });
                }
                Ok(Self::Tournament(TournamentParams { fraction }))
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> SelectionKind {
        match self {
            Self::Roulette => SelectionKind::RouletteWheel,
            Self::Rank(_) => SelectionKind::Rank,
            Self::Tournament(_) => SelectionKind::Tournament,
        }
    }

    /// Checks that a draw of `n_parents` is well defined.
    pub fn validate(&self, n_parents: usize) -> Result<(), ConfigError> {
        if let Self::Tournament(params) = self
            && n_parents > 0
            && params.size(n_parents) == 0
        {
            return Err(ConfigError::EmptyTournament {
                fraction: params.fraction,
                n_parents,
            });
        }
        Ok(())
    }

    /// Draws `n_parents` indices into `fitness`, with replacement.
    ///
    /// Returns an empty list when `fitness` is empty.
    pub fn select_indices<R>(&self, fitness: &[f32], n_parents: usize, rng: &mut R) -> Vec<usize>
    where
        R: Rng + ?Sized,
    {
        if fitness.is_empty() || n_parents == 0 {
            return vec![];
        }
        match self {
            Self::Roulette => {
                let weights = fitness.iter().map(|f| f.max(0.0)).collect::<Vec<_>>();
                weighted_draws(&weights, n_parents, rng)
            }
            Self::Rank(params) => {
                let weights = rank_weights(fitness, params.bias);
                weighted_draws(&weights, n_parents, rng)
            }
            Self::Tournament(params) => {
                let size = params.size(n_parents).max(1);
                let candidates = (0..fitness.len()).collect::<Vec<_>>();
                (0..n_parents)
                    .map(|_| tournament(&candidates, fitness, size, rng))
                    .collect()
            }
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Roulette => write!(f, "{}", self.kind()),
            Self::Rank(RankParams { bias }) => write!(f, "{}(bias={bias})", self.kind()),
            Self::Tournament(TournamentParams { fraction }) => {
                write!(f, "{}(fraction={fraction})", self.kind())
            }
        }
    }
}

/// Anything that can be selected by fitness.
pub trait Scored {
    fn score(&self) -> f32;
}

impl<E> Scored for Agent<E>
where
    E: Environment,
{
    /// Unevaluated agents count as zero fitness.
    fn score(&self) -> f32 {
        self.fitness().unwrap_or(0.0)
    }
}

/// Rank weights `(rank / n)^bias`, best rank `n`. Equal fitness shares no
/// rank order, so an all-equal slice gets uniform weights.
#[expect(clippy::cast_precision_loss)]
fn rank_weights(fitness: &[f32], bias: f32) -> Vec<f32> {
    let first = fitness[0];
    if fitness.iter().all(|f| f.total_cmp(&first).is_eq()) {
        return vec![1.0; fitness.len()];
    }
    let mut order = (0..fitness.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));

    let n = fitness.len();
    let mut weights = vec![0.0; n];
    for (position, &index) in order.iter().enumerate() {
        let rank = (n - position) as f32 / n as f32;
        weights[index] = rank.powf(bias);
    }
    weights
}

/// Draws `n` indices proportionally to `weights` with a cumulative walk over
/// the weights sorted descending.
fn weighted_draws<R>(weights: &[f32], n: usize, rng: &mut R) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    let total = weights.iter().sum::<f32>();
    if !(total.is_finite() && total > 0.0) {
        return (0..n).map(|_| rng.random_range(0..weights.len())).collect();
    }

    let mut order = (0..weights.len())
        .filter(|&i| weights[i] > 0.0)
        .collect::<Vec<_>>();
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));
    let probabilities = order
        .iter()
        .map(|&i| (i, weights[i] / total))
        .collect::<Vec<_>>();

    (0..n)
        .map(|_| {
            let u = rng.random::<f32>();
            let mut sum = 0.0;
            for &(index, p) in &probabilities {
                sum += p;
                if sum > u {
                    return index;
                }
            }
            // rounding left the running sum just below `u`
            probabilities[probabilities.len() - 1].0
        })
        .collect()
}

fn tournament<R>(candidates: &[usize], fitness: &[f32], size: usize, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    let mut best: Option<usize> = None;
    for _ in 0..size {
        let Some(&c) = candidates.choose(rng) else {
            break;
        };
        if best.is_none_or(|b| fitness[c] > fitness[b]) {
            best = Some(c);
        }
    }
    best.unwrap_or(candidates[0])
}

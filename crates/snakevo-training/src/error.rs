//! Error types of the evolutionary core.
//!
//! Every error here is fatal for a training run: configuration errors abort
//! before the first generation, shape mismatches and replacement size errors
//! indicate a genome/architecture drift that cannot be recovered from.

use crate::selection::SelectionKind;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("{name} must lie in [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f32 },
    #[display("{name:?} is not a known fitness function")]
    UnknownFitnessFunction { name: String },
    #[display("{name:?} is not a known selection strategy")]
    UnknownSelection { name: String },
    #[display("{kind} selection requires the parameter {parameter:?}")]
    MissingSelectionParameter {
        kind: SelectionKind,
        parameter: &'static str,
    },
    #[display("selection parameter {parameter:?} has invalid value {value}")]
    InvalidSelectionParameter { parameter: &'static str, value: f32 },
    #[display("tournament fraction {fraction} of {n_parents} parents yields an empty tournament")]
    EmptyTournament { fraction: f32, n_parents: usize },
    #[display("network expects {network} {what} but the environment provides {environment}")]
    DimensionMismatch {
        what: &'static str,
        network: usize,
        environment: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeMismatchError {
    #[display("genome has {actual} layers, architecture expects {expected}")]
    LayerCount { expected: usize, actual: usize },
    #[display("genome layer {layer} has {actual} weights, architecture expects {expected}")]
    LayerLength {
        layer: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum EvolutionError {
    #[display("invalid configuration: {_0}")]
    Config(ConfigError),
    #[display("genome does not fit the network: {_0}")]
    ShapeMismatch(ShapeMismatchError),
    #[display("replacement produced {actual} genomes for a population of {expected}")]
    ReplacementSize { expected: usize, actual: usize },
}

impl From<ConfigError> for EvolutionError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ShapeMismatchError> for EvolutionError {
    fn from(err: ShapeMismatchError) -> Self {
        Self::ShapeMismatch(err)
    }
}

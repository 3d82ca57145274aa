//! Fully connected feed-forward network evaluated from flat weight layers.
//!
//! The network owns no weights. An [`Architecture`] describes the layer sizes
//! and evaluates a forward pass against weights supplied per call, so the same
//! architecture can be shared by every agent of a population while each agent
//! keeps its own genome.
//!
//! # Layout
//!
//! Layer `k` maps `sizes[k]` inputs to `sizes[k + 1]` outputs and is stored
//! row-major as `outputs × inputs` values:
//!
//! ```text
//! out[o] = Σ_i weights[o * inputs + i] * in[i]
//! ```
//!
//! Hidden layers apply ReLU; the output layer is left linear and the action is
//! the index of its largest value.
//!
//! # Example
//!
//! ```
//! use snakevo_network::Architecture;
//!
//! let arch = Architecture::new(vec![2, 2]).unwrap();
//! // identity weights: the larger input wins
//! let layers = [vec![1.0, 0.0, 0.0, 1.0]];
//! assert_eq!(arch.forward(&layers, &[0.2, 0.9]), 1);
//! ```

pub use self::architecture::*;

pub mod activation;
mod architecture;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ArchitectureError {
    #[display("architecture needs an input and an output layer, got {count} layer sizes")]
    TooFewLayers { count: usize },
    #[display("layer {index} has zero width")]
    EmptyLayer { index: usize },
}

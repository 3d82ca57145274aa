//! Per-layer parameter vectors of one agent.

use rand::Rng;
use serde::{Deserialize, Serialize};
use snakevo_network::Architecture;

use crate::{error::ShapeMismatchError, weights};

/// Weight layers of one network, one flat `outputs × inputs` vector per layer.
///
/// Cloning a genome deep-copies every layer, so a clone never aliases the
/// storage of the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    layers: Vec<Vec<f32>>,
}

impl Genome {
    #[must_use]
    pub fn from_layers(layers: Vec<Vec<f32>>) -> Self {
        Self { layers }
    }

    /// Creates a genome with every layer drawn uniformly in
    /// `[-1/sqrt(fan_in), 1/sqrt(fan_in)]`.
    #[expect(clippy::cast_precision_loss)]
    pub fn random<R>(architecture: &Architecture, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let layers = architecture
            .layer_shapes()
            .map(|shape| {
                let bound = 1.0 / (shape.inputs as f32).sqrt();
                weights::random(rng, bound, shape.len())
            })
            .collect();
        Self { layers }
    }

    #[must_use]
    pub fn layers(&self) -> &[Vec<f32>] {
        &self.layers
    }

    /// Mutable views of the layers. Layer lengths cannot change through them.
    pub fn layers_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        self.layers.iter_mut().map(Vec::as_mut_slice)
    }

    #[must_use]
    pub fn into_layers(self) -> Vec<Vec<f32>> {
        self.layers
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// Checks that layer count and every layer length match the architecture.
    pub fn check_shape(&self, architecture: &Architecture) -> Result<(), ShapeMismatchError> {
        if self.layers.len() != architecture.layer_count() {
            return Err(ShapeMismatchError::LayerCount {
                expected: architecture.layer_count(),
                actual: self.layers.len(),
            });
        }
        let layers = self.layers.iter().zip(architecture.layer_shapes());
        for (layer, (weights, shape)) in layers.enumerate() {
            if weights.len() != shape.len() {
                return Err(ShapeMismatchError::LayerLength {
                    layer,
                    expected: shape.len(),
                    actual: weights.len(),
                });
            }
        }
        Ok(())
    }

    /// Crosses two genomes layer by layer.
    ///
    /// # Panics
    ///
    /// Panics if the genomes do not share the same layer lengths.
    pub fn crossover<R>(&self, other: &Self, n_points: usize, rng: &mut R) -> (Self, Self)
    where
        R: Rng + ?Sized,
    {
        assert_eq!(self.layers.len(), other.layers.len());
        let (c1, c2): (Vec<_>, Vec<_>) = self
            .layers
            .iter()
            .zip(&other.layers)
            .map(|(p1, p2)| weights::crossover(p1, p2, n_points, rng))
            .unzip();
        (Self { layers: c1 }, Self { layers: c2 })
    }

    /// Applies replacement mutation to every weight of every layer.
    pub fn mutate<R>(&mut self, rate: f32, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for layer in self.layers_mut() {
            weights::mutate(layer, rate, rng);
        }
    }
}

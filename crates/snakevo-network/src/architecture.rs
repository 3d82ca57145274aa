use serde::{Deserialize, Serialize};

use crate::{
    ArchitectureError,
    activation::{argmax, relu},
};

/// Shape of one weight layer (`outputs × inputs`, row-major).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerShape {
    pub inputs: usize,
    pub outputs: usize,
}

impl LayerShape {
    /// Number of scalar weights in the layer.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.inputs * self.outputs
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Layer sizes of a fully connected network, input first and output last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Architecture {
    sizes: Vec<usize>,
}

impl TryFrom<Vec<usize>> for Architecture {
    type Error = ArchitectureError;

    fn try_from(sizes: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(sizes)
    }
}

impl From<Architecture> for Vec<usize> {
    fn from(arch: Architecture) -> Self {
        arch.sizes
    }
}

impl Architecture {
    pub fn new(sizes: Vec<usize>) -> Result<Self, ArchitectureError> {
        if sizes.len() < 2 {
            return Err(ArchitectureError::TooFewLayers { count: sizes.len() });
        }
        if let Some(index) = sizes.iter().position(|size| *size == 0) {
            return Err(ArchitectureError::EmptyLayer { index });
        }
        Ok(Self { sizes })
    }

    /// Builds `[inputs, hidden..., outputs]`.
    pub fn with_hidden(
        inputs: usize,
        hidden: &[usize],
        outputs: usize,
    ) -> Result<Self, ArchitectureError> {
        let mut sizes = Vec::with_capacity(hidden.len() + 2);
        sizes.push(inputs);
        sizes.extend_from_slice(hidden);
        sizes.push(outputs);
        Self::new(sizes)
    }

    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    #[must_use]
    pub fn input_len(&self) -> usize {
        self.sizes[0]
    }

    #[must_use]
    pub fn output_len(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.sizes.len() - 1
    }

    pub fn layer_shapes(&self) -> impl ExactSizeIterator<Item = LayerShape> + '_ {
        self.sizes.windows(2).map(|w| LayerShape {
            inputs: w[0],
            outputs: w[1],
        })
    }

    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.layer_shapes().map(|shape| shape.len()).sum()
    }

    /// Evaluates the network and returns the chosen action index.
    ///
    /// `layers` must match [`Architecture::layer_shapes`]; genomes are
    /// validated against the architecture before they reach this point.
    ///
    /// # Panics
    ///
    /// Panics if the observation or any layer has the wrong length.
    #[must_use]
    pub fn forward<L>(&self, layers: &[L], observation: &[f32]) -> usize
    where
        L: AsRef<[f32]>,
    {
        assert_eq!(observation.len(), self.input_len(), "observation length");
        assert_eq!(layers.len(), self.layer_count(), "layer count");

        let last = self.layer_count() - 1;
        let mut activations = observation.to_vec();
        for (k, (shape, weights)) in self.layer_shapes().zip(layers).enumerate() {
            let weights = weights.as_ref();
            assert_eq!(weights.len(), shape.len(), "layer {k} length");
            let mut next = weights
                .chunks_exact(shape.inputs)
                .map(|row| row.iter().zip(&activations).map(|(w, a)| w * a).sum::<f32>())
                .collect::<Vec<_>>();
            if k != last {
                next.iter_mut().for_each(|v| *v = relu(*v));
            }
            activations = next;
        }
        argmax(&activations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_architectures() {
        assert_eq!(
            Architecture::new(vec![3]),
            Err(ArchitectureError::TooFewLayers { count: 1 })
        );
        assert_eq!(
            Architecture::new(vec![3, 0, 4]),
            Err(ArchitectureError::EmptyLayer { index: 1 })
        );
    }

    #[test]
    fn test_layer_shapes() {
        let arch = Architecture::with_hidden(28, &[16, 8], 4).unwrap();
        let shapes = arch.layer_shapes().collect::<Vec<_>>();
        assert_eq!(
            shapes,
            [
                LayerShape {
                    inputs: 28,
                    outputs: 16
                },
                LayerShape {
                    inputs: 16,
                    outputs: 8
                },
                LayerShape {
                    inputs: 8,
                    outputs: 4
                },
            ]
        );
        assert_eq!(arch.parameter_count(), 28 * 16 + 16 * 8 + 8 * 4);
    }

    #[test]
    fn test_hidden_relu_blocks_negative_paths() {
        let arch = Architecture::new(vec![2, 2, 2]).unwrap();
        // hidden = relu(x); output = -hidden
        let layers = [vec![1.0, 0.0, 0.0, 1.0], vec![-1.0, 0.0, 0.0, -1.0]];
        assert_eq!(arch.forward(&layers, &[2.0, 1.0]), 1);
        // a linear hidden layer would pick 1 here
        assert_eq!(arch.forward(&layers, &[-1.0, -3.0]), 0);
    }

    #[test]
    fn test_serde_as_size_list() {
        let arch = Architecture::with_hidden(4, &[3], 2).unwrap();
        let json = serde_json::to_string(&arch).unwrap();
        assert_eq!(json, "[4,3,2]");
        let parsed: Architecture = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, arch);
        assert!(serde_json::from_str::<Architecture>("[4]").is_err());
    }
}

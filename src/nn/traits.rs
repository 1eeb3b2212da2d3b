//! Value estimation traits.
//!
//! A [`ValueEstimator`] maps an encoded position to a scalar in `[-1, 1]`
//! from the point of view of the contender to move. The search engine
//! consumes it through [`LearnedEvaluator`](crate::mcts::LearnedEvaluator);
//! training happens outside this crate and only the weights come back in.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{DuelError, Result};

/// Encoded game state as a flat tensor for value estimation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor (`[features]` for the duel encoder).
    pub shape: Vec<usize>,
}

impl EncodedState {
    /// Create a new encoded state.
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    /// Create a zero-filled encoded state with the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let size = shape.iter().product();
        Self {
            tensor: vec![0.0; size],
            shape,
        }
    }

    /// Get the total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    /// Check if the tensor is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Get element at a flat index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }

    /// Set element at a flat index. Out-of-range writes are ignored.
    pub fn set(&mut self, index: usize, value: f32) {
        if let Some(slot) = self.tensor.get_mut(index) {
            *slot = value;
        }
    }
}

/// Scalar position value.
///
/// Implementations must be pure: the same input always gives the same value.
pub trait ValueEstimator: Send + Sync {
    /// Value of the encoded position for the contender to move.
    fn estimate(&self, encoded: &EncodedState) -> f32;

    /// Batch estimation (optional optimization).
    fn estimate_batch(&self, encoded: &[EncodedState]) -> Vec<f32> {
        encoded.iter().map(|e| self.estimate(e)).collect()
    }

    /// Number of input features expected, if fixed.
    fn input_len(&self) -> Option<usize> {
        None
    }
}

/// Zero value estimator (baseline for testing).
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroValue;

impl ValueEstimator for ZeroValue {
    fn estimate(&self, _encoded: &EncodedState) -> f32 {
        0.0
    }
}

/// `tanh(w · x + b)` over the encoded features.
///
/// Weights are stored as JSON:
///
/// ```json
/// { "weights": [0.1, -0.3, ...], "bias": 0.05 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearValue {
    pub weights: Vec<f32>,
    #[serde(default)]
    pub bias: f32,
}

impl LinearValue {
    pub fn new(weights: Vec<f32>, bias: f32) -> Self {
        Self { weights, bias }
    }

    /// Parse weights from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)?;
        if model.weights.is_empty() {
            return Err(DuelError::config("linear value model has no weights"));
        }
        if model.weights.iter().any(|w| !w.is_finite()) || !model.bias.is_finite() {
            return Err(DuelError::config("linear value model has non-finite weights"));
        }
        Ok(model)
    }

    /// Read weights from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

impl ValueEstimator for LinearValue {
    fn estimate(&self, encoded: &EncodedState) -> f32 {
        let dot: f32 = self
            .weights
            .iter()
            .zip(&encoded.tensor)
            .map(|(w, x)| w * x)
            .sum();
        (dot + self.bias).tanh()
    }

    fn input_len(&self) -> Option<usize> {
        Some(self.weights.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_state_access() {
        let mut state = EncodedState::zeros(vec![6]);
        assert_eq!(state.len(), 6);
        assert!(!state.is_empty());

        state.set(1, 0.3);
        state.set(6, 9.0);
        assert_eq!(state.get(1), Some(0.3));
        assert_eq!(state.get(6), None);
        assert_eq!(state.tensor.iter().filter(|&&v| v != 0.0).count(), 1);
    }

    #[test]
    fn test_zero_value() {
        let states = vec![EncodedState::zeros(vec![10]), EncodedState::zeros(vec![10])];
        assert_eq!(ZeroValue.estimate(&states[0]), 0.0);
        assert_eq!(ZeroValue.estimate_batch(&states), vec![0.0, 0.0]);
        assert_eq!(ZeroValue.input_len(), None);
    }

    #[test]
    fn test_linear_value() {
        let model = LinearValue::new(vec![1.0, -1.0, 0.5], 0.0);
        let state = EncodedState::new(vec![0.5, 0.25, 0.5], vec![3]);
        let expected = (0.5f32 - 0.25 + 0.25).tanh();
        assert!((model.estimate(&state) - expected).abs() < 1e-6);
        assert_eq!(model.input_len(), Some(3));

        // Saturates inside [-1, 1].
        let big = LinearValue::new(vec![100.0], 0.0);
        let v = big.estimate(&EncodedState::new(vec![1.0], vec![1]));
        assert!(v <= 1.0 && v > 0.99);
    }

    #[test]
    fn test_linear_value_json() {
        let model = LinearValue::from_json(r#"{"weights": [0.5, 0.5], "bias": -0.1}"#).unwrap();
        assert_eq!(model.weights.len(), 2);
        assert_eq!(model.bias, -0.1);

        let no_bias = LinearValue::from_json(r#"{"weights": [1.0]}"#).unwrap();
        assert_eq!(no_bias.bias, 0.0);

        assert!(matches!(
            LinearValue::from_json(r#"{"weights": []}"#),
            Err(DuelError::Configuration(_))
        ));
        assert!(LinearValue::from_json("not json").is_err());
    }

    #[test]
    fn test_model_json_round_trip() {
        let model = LinearValue::new(vec![0.25, -0.75], 0.5);
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(LinearValue::from_json(&json).unwrap(), model);
    }
}

//! Activation and output helpers.

#[must_use]
pub fn relu(x: f32) -> f32 {
    x.max(0.0)
}

/// Index of the largest value; the first one wins on ties.
///
/// Returns `0` for an empty slice. `NaN` never wins against a number.
#[must_use]
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] || values[best].is_nan() {
            best = i;
        }
    }
    best
}

//! n-state threshold model.
//!
//! Cut-points are taken from the sorted empirical distribution of one
//! biomarker across the whole study so that each state holds roughly the same
//! number of cells.

use anyhow::{Result, bail};

/// Values closer than this to the minimum count as ties at the minimum.
pub const MIN_TIE_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdModel {
    pub min_value: f64,
    pub max_value: f64,
    /// `n_states - 1` cut-points.
    pub cut_points: Vec<f64>,
}

impl ThresholdModel {
    /// Derives cut-points from values sorted ascending.
    ///
    /// When the value at the first candidate cut equals the minimum (zero or
    /// log-floored intensities), every tie at the minimum goes into state 0
    /// and the remaining values are split evenly.
    pub fn derive(sorted: &[f64], n_states: usize) -> Result<Self> {
        if n_states < 2 {
            bail!("n-state model must have at least 2 states (got {})", n_states);
        }
        let size = sorted.len();
        if size <= n_states {
            bail!(
                "not enough cell measures to compute thresholds: {} values for a {}-state model",
                size,
                n_states
            );
        }

        let min_value = sorted[0];
        let max_value = sorted[size - 1];

        let mut offset = 0usize;
        let mut step = size / n_states;
        if (sorted[step] - min_value).abs() < MIN_TIE_TOLERANCE {
            offset = sorted[step..]
                .iter()
                .position(|v| v - min_value > MIN_TIE_TOLERANCE)
                .map(|p| p + step)
                .unwrap_or(size);
            step = (size - offset) / n_states;
        }

        let midpoint = size % n_states == 0;
        let cut_points = (1..n_states)
            .map(|i| {
                let j = offset + i * step;
                if j >= size {
                    max_value
                } else if midpoint {
                    (sorted[j] + sorted[j - 1]) / 2.0
                } else {
                    sorted[j]
                }
            })
            .collect();

        Ok(Self {
            min_value,
            max_value,
            cut_points,
        })
    }

    pub fn from_values(mut values: Vec<f64>, n_states: usize) -> Result<Self> {
        values.retain(|v| v.is_finite());
        values.sort_by(|a, b| a.total_cmp(b));
        Self::derive(&values, n_states)
    }

    pub fn n_states(&self) -> usize {
        self.cut_points.len() + 1
    }

    /// State index in `[0, n_states - 1]`: the index of the first cut-point
    /// strictly greater than `value`.
    pub fn classify(&self, value: f64) -> usize {
        self.cut_points
            .iter()
            .position(|&cut| value < cut)
            .unwrap_or(self.cut_points.len())
    }

    pub fn state_char(&self, value: f64) -> char {
        let state = self.classify(value) as u32;
        char::from_digit(state, 10).unwrap_or(crate::config::UNKNOWN_STATE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Threshold {
    pub column: String,
    pub biomarker: String,
    pub location: String,
    pub metric: String,
    pub model: ThresholdModel,
}

use crate::utils::constants::{Z_95, Z_99};

/// Trailing moving average over `window` consecutive entries.
///
/// Entry `i` is defined only when all `window` entries ending at `i` are
/// defined, so a fully defined input yields `window - 1` leading `None`s.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut result = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    let mut defined = 0usize;

    for (i, value) in values.iter().enumerate() {
        if let Some(v) = value {
            sum += v;
            defined += 1;
        }
        if i >= window {
            if let Some(old) = values[i - window] {
                sum -= old;
                defined -= 1;
            }
        }
        result.push((defined == window).then(|| sum / window as f64));
    }

    result
}

/// Autocorrelation bands drawn around zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceBands {
    pub z95: f64,
    pub z99: f64,
}

impl ConfidenceBands {
    pub fn for_length(n: usize) -> Self {
        let root = (n as f64).sqrt();
        Self {
            z95: Z_95 / root,
            z99: Z_99 / root,
        }
    }
}

/// Autocorrelation for lags `1..=n`, as `(lag, r)` pairs.
///
/// `r(h) = sum((x_t - m)(x_{t+h} - m)) / sum((x_t - m)^2)`. A constant series
/// has no defined autocorrelation and yields an empty result.
pub fn autocorrelation(values: &[f64]) -> Vec<(usize, f64)> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let deviations: Vec<f64> = values.iter().map(|v| v - mean).collect();
    let c0: f64 = deviations.iter().map(|d| d * d).sum();
    if c0 == 0.0 {
        return Vec::new();
    }

    (1..=n)
        .map(|lag| {
            let c: f64 = deviations[..n - lag]
                .iter()
                .zip(&deviations[lag..])
                .map(|(a, b)| a * b)
                .sum();
            (lag, c / c0)
        })
        .collect()
}

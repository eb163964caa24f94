use crate::error::{ProcessingError, Result};

/// Additive decomposition `observed = trend + seasonal + residual`.
/// Trend and residual are undefined at the edges, where the centered
/// moving average does not fit.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalDecomposition {
    pub period: usize,
    pub observed: Vec<f64>,
    pub trend: Vec<Option<f64>>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<Option<f64>>,
}

/// Classical additive decomposition.
///
/// The trend is a centered moving average (2 x period for even periods).
/// The seasonal figure is the per-phase mean of the detrended series,
/// shifted to zero mean, and repeated across the series.
pub fn decompose_additive(values: &[f64], period: usize) -> Result<SeasonalDecomposition> {
    if period < 2 {
        return Err(ProcessingError::Config(format!(
            "Seasonal period must be at least 2, got {}",
            period
        )));
    }
    if values.len() < 2 * period {
        return Err(ProcessingError::InsufficientData(format!(
            "Seasonal decomposition needs {} observations (two full periods), got {}",
            2 * period,
            values.len()
        )));
    }

    let trend = centered_moving_average(values, period);

    let mut phase_sums = vec![0.0; period];
    let mut phase_counts = vec![0usize; period];
    for (i, (value, t)) in values.iter().zip(&trend).enumerate() {
        if let Some(t) = t {
            phase_sums[i % period] += value - t;
            phase_counts[i % period] += 1;
        }
    }

    let phase_means: Vec<f64> = phase_sums
        .iter()
        .zip(&phase_counts)
        .map(|(s, &c)| if c == 0 { 0.0 } else { s / c as f64 })
        .collect();
    let offset = phase_means.iter().sum::<f64>() / period as f64;
    let figure: Vec<f64> = phase_means.iter().map(|m| m - offset).collect();

    let seasonal: Vec<f64> = (0..values.len()).map(|i| figure[i % period]).collect();
    let residual = values
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((v, t), s)| t.map(|t| v - t - s))
        .collect();

    Ok(SeasonalDecomposition {
        period,
        observed: values.to_vec(),
        trend,
        seasonal,
        residual,
    })
}

fn centered_moving_average(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let half = period / 2;
    let weights: Vec<f64> = if period % 2 == 0 {
        let mut w = vec![1.0 / period as f64; period + 1];
        w[0] = 0.5 / period as f64;
        w[period] = 0.5 / period as f64;
        w
    } else {
        vec![1.0 / period as f64; period]
    };

    let n = values.len();
    (0..n)
        .map(|i| {
            if i < half || i + half >= n {
                return None;
            }
            let start = i - half;
            Some(
                weights
                    .iter()
                    .zip(&values[start..start + weights.len()])
                    .map(|(w, v)| w * v)
                    .sum(),
            )
        })
        .collect()
}

use crate::analyzers::weather_analyzer::{mean, sample_std};
use crate::utils::constants::KDE_CUT;
use std::f64::consts::PI;

/// Gaussian kernel density estimate with Scott's rule bandwidth.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Returns `None` for fewer than two samples or zero spread, where no
    /// bandwidth can be chosen.
    pub fn new(samples: &[f64]) -> Option<Self> {
        let samples: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
        if samples.len() < 2 {
            return None;
        }
        let std = sample_std(&samples, mean(&samples));
        if std.is_nan() || std <= 0.0 {
            return None;
        }
        let bandwidth = std * (samples.len() as f64).powf(-0.2);
        Some(Self { samples, bandwidth })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let norm = 1.0 / (self.samples.len() as f64 * self.bandwidth * (2.0 * PI).sqrt());
        let sum: f64 = self
            .samples
            .iter()
            .map(|s| {
                let z = (x - s) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum();
        norm * sum
    }

    /// Evenly spaced `(x, density)` pairs covering the data plus a margin
    /// of a few bandwidths on each side.
    pub fn curve(&self, points: usize) -> Vec<(f64, f64)> {
        let (min, max) = self
            .samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let lo = min - KDE_CUT * self.bandwidth;
        let hi = max + KDE_CUT * self.bandwidth;
        let points = points.max(2);
        let step = (hi - lo) / (points - 1) as f64;

        (0..points)
            .map(|i| {
                let x = lo + step * i as f64;
                (x, self.evaluate(x))
            })
            .collect()
    }
}

use crate::utils::constants::Z_95;

/// Ordinary least squares fit `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    n: usize,
    mean_x: f64,
    sxx: f64,
    residual_std: f64,
}

impl LinearFit {
    /// Fit over paired observations. `None` when fewer than two points or
    /// all x values are equal.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        let n = points.len();
        if n < 2 {
            return None;
        }
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

        let sxx: f64 = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
        if sxx == 0.0 {
            return None;
        }
        let sxy: f64 = points
            .iter()
            .map(|(x, y)| (x - mean_x) * (y - mean_y))
            .sum();

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        let residual_std = if n > 2 {
            let sse: f64 = points
                .iter()
                .map(|(x, y)| (y - intercept - slope * x).powi(2))
                .sum();
            (sse / (n - 2) as f64).sqrt()
        } else {
            0.0
        };

        Some(Self {
            slope,
            intercept,
            n,
            mean_x,
            sxx,
            residual_std,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Half-width of the 95% confidence interval of the mean response at `x`.
    pub fn confidence_half_width(&self, x: f64) -> f64 {
        Z_95 * self.residual_std * (1.0 / self.n as f64 + (x - self.mean_x).powi(2) / self.sxx).sqrt()
    }

    /// `(x, lower, fit, upper)` at `points` evenly spaced positions in `[lo, hi]`.
    pub fn band(&self, lo: f64, hi: f64, points: usize) -> Vec<(f64, f64, f64, f64)> {
        let points = points.max(2);
        let step = (hi - lo) / (points - 1) as f64;
        (0..points)
            .map(|i| {
                let x = lo + step * i as f64;
                let y = self.predict(x);
                let half = self.confidence_half_width(x);
                (x, y - half, y, y + half)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_line() {
        let points = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)];

        let fit = LinearFit::fit(&points).unwrap();

        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!(fit.confidence_half_width(1.0).abs() < 1e-12);
    }

    #[test]
    fn test_band_is_narrowest_at_mean() {
        let points = [(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.0)];
        let fit = LinearFit::fit(&points).unwrap();

        assert!(fit.confidence_half_width(1.5) < fit.confidence_half_width(0.0));
        let band = fit.band(0.0, 3.0, 4);
        assert_eq!(band.len(), 4);
        assert!(band.iter().all(|(_, lo, y, hi)| lo <= y && y <= hi));
    }

    #[test]
    fn test_degenerate_fit() {
        assert!(LinearFit::fit(&[(1.0, 1.0)]).is_none());
        assert!(LinearFit::fit(&[(1.0, 1.0), (1.0, 2.0)]).is_none());
    }
}

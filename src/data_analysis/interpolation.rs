// src/data_analysis/interpolation.rs
//
// One-dimensional curve interpolation (linear and natural cubic spline) and
// scattered-data interpolation onto a regular grid.

use ndarray::{Array1, Array2};
use std::error::Error;

/// Linear interpolation of `ys` over strictly increasing `xs`.
/// Values outside the sampled range are clamped to the end points.
pub fn interp_linear(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 || x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }
    let k = interval_index(&xs[..n], x);
    let t = (x - xs[k]) / (xs[k + 1] - xs[k]);
    ys[k] + t * (ys[k + 1] - ys[k])
}

// Index k such that xs[k] <= x < xs[k + 1], clamped to the last interval.
fn interval_index(xs: &[f64], x: f64) -> usize {
    let upper = xs.partition_point(|&v| v <= x);
    upper.saturating_sub(1).min(xs.len() - 2)
}

/// Natural cubic spline (zero second derivative at both ends).
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    second_derivs: Vec<f64>,
}

impl CubicSpline {
    /// Builds the spline through the knots. `xs` must be strictly increasing
    /// and at least two knots are required.
    pub fn natural(xs: &[f64], ys: &[f64]) -> Result<Self, Box<dyn Error>> {
        if xs.len() != ys.len() {
            return Err(format!(
                "Spline knots mismatch: {} x values, {} y values",
                xs.len(),
                ys.len()
            )
            .into());
        }
        if xs.len() < 2 {
            return Err("Spline needs at least two knots".into());
        }
        if xs.windows(2).any(|w| !(w[1] > w[0])) {
            return Err("Spline knots must be strictly increasing".into());
        }

        let n = xs.len();
        let mut second_derivs = vec![0.0; n];

        if n > 2 {
            // Tridiagonal system for the interior second derivatives (Thomas algorithm).
            let m = n - 2;
            let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
            let mut diag = vec![0.0; m];
            let mut upper = vec![0.0; m];
            let mut rhs = vec![0.0; m];
            for i in 0..m {
                let k = i + 1;
                diag[i] = 2.0 * (h[k - 1] + h[k]);
                upper[i] = h[k];
                rhs[i] = 6.0 * ((ys[k + 1] - ys[k]) / h[k] - (ys[k] - ys[k - 1]) / h[k - 1]);
            }

            // Forward sweep; the sub-diagonal entry for row i is h[i].
            for i in 1..m {
                let factor = h[i] / diag[i - 1];
                diag[i] -= factor * upper[i - 1];
                rhs[i] -= factor * rhs[i - 1];
            }

            // Back substitution
            let mut solution = vec![0.0; m];
            solution[m - 1] = rhs[m - 1] / diag[m - 1];
            for i in (0..m - 1).rev() {
                solution[i] = (rhs[i] - upper[i] * solution[i + 1]) / diag[i];
            }
            second_derivs[1..n - 1].copy_from_slice(&solution);
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            second_derivs,
        })
    }

    /// Evaluates the spline at `x`; `x` is clamped to the knot range.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.xs.len();
        let x = x.clamp(self.xs[0], self.xs[n - 1]);
        let k = interval_index(&self.xs, x);
        let h = self.xs[k + 1] - self.xs[k];
        let a = self.xs[k + 1] - x;
        let b = x - self.xs[k];
        let m0 = self.second_derivs[k];
        let m1 = self.second_derivs[k + 1];

        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (self.ys[k] / h - m0 * h / 6.0) * a
            + (self.ys[k + 1] / h - m1 * h / 6.0) * b
    }

    /// Samples the spline at `num_points` evenly spaced positions over the knot range.
    pub fn resample(&self, num_points: usize) -> Vec<(f64, f64)> {
        let n = self.xs.len();
        Array1::linspace(self.xs[0], self.xs[n - 1], num_points.max(2))
            .iter()
            .map(|&x| (x, self.evaluate(x)))
            .collect()
    }
}

/// Inverse-distance-weighted interpolation of scattered `(x, y, value)` samples
/// onto the grid defined by `x_bins` × `y_bins`. The result is indexed `[x_idx, y_idx]`.
/// A grid node that coincides with a sample takes that sample's value exactly.
pub fn idw_grid(
    samples: &[(f64, f64, f64)],
    x_bins: &[f64],
    y_bins: &[f64],
    power: f64,
) -> Result<Array2<f64>, Box<dyn Error>> {
    if samples.is_empty() {
        return Err("Scattered interpolation requires at least one sample".into());
    }
    if !power.is_finite() || power <= 0.0 {
        return Err(format!("Invalid inverse-distance power: {power}").into());
    }

    let half_power = power * 0.5;
    let grid = Array2::from_shape_fn((x_bins.len(), y_bins.len()), |(i, j)| {
        let (gx, gy) = (x_bins[i], y_bins[j]);
        let mut weight_sum = 0.0;
        let mut value_sum = 0.0;
        for &(sx, sy, value) in samples {
            let dist_sq = (gx - sx).powi(2) + (gy - sy).powi(2);
            if dist_sq < 1e-18 {
                return value;
            }
            let weight = 1.0 / dist_sq.powf(half_power);
            weight_sum += weight;
            value_sum += weight * value;
        }
        value_sum / weight_sum
    });
    Ok(grid)
}

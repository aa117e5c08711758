// src/data_analysis/derivative.rs

/// Calculates the discrete time derivative of a uniformly sampled signal.
/// Central differences inside, one-sided differences at both ends.
pub fn calculate_derivative(data: &[f64], sample_rate: f64) -> Vec<f64> {
    if data.len() < 2 {
        return Vec::new();
    }

    // Validate sample_rate to prevent silent failures with invalid values
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Vec::new();
    }

    let fs = sample_rate;
    let mut derivative = Vec::with_capacity(data.len());

    // Use forward difference for first point
    derivative.push((data[1] - data[0]) * fs);

    // Use central difference for middle points
    for i in 1..data.len() - 1 {
        derivative.push((data[i + 1] - data[i - 1]) * (0.5 * fs));
    }

    // Use backward difference for last point
    let n = data.len() - 1;
    derivative.push((data[n] - data[n - 1]) * fs);

    derivative
}

/// Root-mean-square of a signal; 0.0 for an empty slice.
pub fn rms(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    (data.iter().map(|v| v * v).sum::<f64>() / data.len() as f64).sqrt()
}

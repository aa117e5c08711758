// src/plot_functions/peak_detection.rs

use crate::constants::{
    MAX_PEAKS_TO_LABEL, MIN_PEAK_SEPARATION_OCTAVES, MIN_SECONDARY_PEAK_DROP_DB,
    PEAK_DETECTION_WINDOW_RADIUS, PEAK_LABEL_MIN_SPL_DB,
};

fn octaves_between(f1: f64, f2: f64) -> f64 {
    (f1 / f2).log2().abs()
}

/// Local maximum test over a window of `PEAK_DETECTION_WINDOW_RADIUS` points.
/// Plateaus resolve to their rightmost point. Near the ends the window shrinks
/// to the neighbours that exist.
fn is_local_peak(series_data: &[(f64, f64)], j: usize) -> bool {
    let amp = series_data[j].1;
    let w = PEAK_DETECTION_WINDOW_RADIUS.max(1);
    let left = j.saturating_sub(w)..j;
    let right = (j + 1)..(j + 1 + w).min(series_data.len());
    if left.is_empty() || right.is_empty() {
        return false;
    }
    series_data[left].iter().all(|&(_, a)| amp >= a) && series_data[right].iter().all(|&(_, a)| amp > a)
}

/// Detects peaks of an SPL spectrum for labeling.
/// Returns (frequency Hz, SPL dB) tuples, loudest first. The primary peak is the global
/// maximum; secondary peaks must be local maxima within `MIN_SECONDARY_PEAK_DROP_DB`
/// of it and at least `MIN_PEAK_SEPARATION_OCTAVES` away from already chosen peaks.
pub fn find_and_sort_peaks(series_data: &[(f64, f64)], spectrum_name: &str) -> Vec<(f64, f64)> {
    let mut peaks_to_plot: Vec<(f64, f64)> = Vec::new();

    let primary = series_data
        .iter()
        .copied()
        .filter(|(f, a)| f.is_finite() && a.is_finite())
        .max_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((peak_freq, peak_spl)) = primary {
        if peak_spl > PEAK_LABEL_MIN_SPL_DB {
            peaks_to_plot.push((peak_freq, peak_spl));
        }
    }

    if series_data.len() > 2 && !peaks_to_plot.is_empty() && peaks_to_plot.len() < MAX_PEAKS_TO_LABEL {
        let (primary_freq, primary_spl) = peaks_to_plot[0];
        let mut candidates: Vec<(f64, f64)> = (1..series_data.len() - 1)
            .filter(|&j| is_local_peak(series_data, j))
            .map(|j| series_data[j])
            .filter(|&(freq, spl)| {
                freq != primary_freq
                    && spl > PEAK_LABEL_MIN_SPL_DB
                    && spl >= primary_spl - MIN_SECONDARY_PEAK_DROP_DB
            })
            .collect();

        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        for (s_freq, s_spl) in candidates {
            if peaks_to_plot.len() >= MAX_PEAKS_TO_LABEL {
                break;
            }
            let too_close_to_existing = peaks_to_plot
                .iter()
                .any(|&(p_freq, _)| octaves_between(s_freq, p_freq) < MIN_PEAK_SEPARATION_OCTAVES);
            if !too_close_to_existing {
                peaks_to_plot.push((s_freq, s_spl));
            }
        }
    }

    peaks_to_plot.sort_by(|a, b| b.1.total_cmp(&a.1));
    if let Some(&(main_freq, main_spl)) = peaks_to_plot.first() {
        println!("  {spectrum_name}: Primary Peak {main_spl:.1} dB at {main_freq:.0} Hz");
        for (idx, (freq, spl)) in peaks_to_plot.iter().skip(1).enumerate() {
            println!("    Subordinate Peak {}: {:.1} dB at {freq:.0} Hz", idx + 1, spl);
        }
    } else {
        println!("  {spectrum_name}: No significant peaks found.");
    }
    peaks_to_plot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_peak_of_measured_spectrum() {
        let spectrum = vec![
            (100.0, 15.0),
            (192.0, 22.6),
            (500.0, 12.0),
            (1000.0, -5.0),
            (2000.0, -20.0),
            (5000.0, -30.0),
            (10000.0, -35.0),
            (15000.0, -30.0),
        ];
        let peaks = find_and_sort_peaks(&spectrum, "SPL");
        assert_eq!(peaks, vec![(192.0, 22.6)]);
    }

    #[test]
    fn test_secondary_peak_needs_separation_and_level() {
        let spectrum = vec![
            (100.0, 10.0),
            (200.0, 30.0),
            (300.0, 25.0),  // adjacent to primary, not a local peak
            (400.0, 20.0),
            (800.0, 24.0),  // local peak one octave above 400 Hz
            (1600.0, 5.0),
        ];
        let peaks = find_and_sort_peaks(&spectrum, "SPL");
        assert_eq!(peaks, vec![(200.0, 30.0), (800.0, 24.0)]);
    }

    #[test]
    fn test_quiet_spectrum_has_no_labels() {
        let spectrum = vec![(100.0, -10.0), (200.0, -5.0), (300.0, -12.0)];
        assert!(find_and_sort_peaks(&spectrum, "SPL").is_empty());
        assert!(find_and_sort_peaks(&[], "SPL").is_empty());
    }
}

// src/plot_functions/peak_detection.rs

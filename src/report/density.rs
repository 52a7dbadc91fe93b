//! Histogram binning and Gaussian kernel density estimation.
//!
//! Small numeric helpers backing the subscriber-distribution chart. The
//! density curve is scaled by the caller to sit over histogram counts.

/// One histogram bin over `[lo, hi)` (the last bin is closed).
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Bin `values` into `bins` equal-width bins spanning their range.
///
/// Degenerate inputs (all values equal) get a single unit-width bin
/// centered on the value so the chart still has something to draw.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<Bin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    if hi <= lo {
        return vec![Bin {
            lo: lo - 0.5,
            hi: lo + 0.5,
            count: values.len(),
        }];
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            lo: lo + i as f64 * width,
            hi: lo + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Gaussian kernel density estimate of `values` at each grid point.
///
/// Bandwidth is Silverman's rule of thumb; a zero-variance sample falls
/// back to unit bandwidth.
pub fn gaussian_kde(values: &[f64], grid: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return vec![0.0; grid.len()];
    }

    let n = values.len() as f64;
    let bandwidth = silverman_bandwidth(values);

    grid.iter()
        .map(|&x| {
            let sum: f64 = values
                .iter()
                .map(|&v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            sum / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt())
        })
        .collect()
}

/// Evenly spaced grid of `points` values over `[lo, hi]`.
pub fn linspace(lo: f64, hi: f64, points: usize) -> Vec<f64> {
    if points < 2 {
        return vec![lo];
    }
    let step = (hi - lo) / (points - 1) as f64;
    (0..points).map(|i| lo + i as f64 * step).collect()
}

fn silverman_bandwidth(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    if std_dev > 0.0 {
        1.06 * std_dev * n.powf(-0.2)
    } else {
        1.0
    }
}

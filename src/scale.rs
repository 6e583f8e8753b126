//! Contrast stretch from floating-point science values to
//! 8-bit display values.
//!
//! The stretch is the usual quicklook recipe: clamp the top
//! and bottom 1% of pixels so hot pixels and cosmic rays do
//! not eat the dynamic range, then map the remaining range
//! linearly onto [0, 255].

use std::cmp::Ordering;

use anyhow::{ensure, Result};
use ndarray::{s, Array2};

/// Percentile of `values` by linear interpolation between
/// order statistics.
pub fn percentile(values: &[f64], pct: f64) -> Result<f64> {
    ensure!(!values.is_empty(), "empty pixel grid");
    ensure!(
        (0. ..=100.).contains(&pct),
        "percentile out of range: {}",
        pct
    );

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    Ok(interpolate_rank(&sorted, pct))
}

fn interpolate_rank(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100. * (sorted.len() - 1) as f64;
    let below = rank.floor() as usize;
    let frac = rank - below as f64;
    if frac == 0. {
        return sorted[below];
    }
    sorted[below] + frac * (sorted[below + 1] - sorted[below])
}

/// Clamp every value to the grid's own 1st and 99th
/// percentiles.
pub fn clip_outliers(data: &mut Array2<f64>) -> Result<()> {
    ensure!(data.len() > 0, "empty pixel grid");

    let mut sorted: Vec<f64> = data.iter().copied().collect();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let bottom = interpolate_rank(&sorted, 1.);
    let top = interpolate_rank(&sorted, 99.);
    data.mapv_inplace(|v| v.min(top).max(bottom));
    Ok(())
}

/// Rescale so the minimum lands on 0 and the maximum on 255.
///
/// A grid with no contrast left after clipping cannot be
/// stretched and is reported as degenerate.
pub fn stretch_to_display(data: &mut Array2<f64>) -> Result<()> {
    ensure!(data.len() > 0, "empty pixel grid");

    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    data.mapv_inplace(|v| v - min);

    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    ensure!(max > 0., "degenerate image: max equals min");
    data.mapv_inplace(|v| v / max * 255.);
    Ok(())
}

/// Reverse row order and truncate to bytes. FITS counts rows
/// from the bottom of the detector, JPEG from the top.
pub fn flip_and_quantize(data: &Array2<f64>) -> Array2<u8> {
    data.slice(s![..;-1, ..]).mapv(|v| v as u8)
}

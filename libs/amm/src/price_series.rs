//! Evenly spaced price sampling across a position range

/// Number of samples taken across a position range
pub const SAMPLE_COUNT: usize = 100;

/// Sample `num` evenly spaced points from `start` to `stop`, both inclusive.
///
/// The step is `(stop - start) / (num - 1)`, so a descending range yields a
/// descending series. Points are computed as `start + step * i` rather than
/// by accumulation, matching the closed-form sample positions.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Sample the standard [`SAMPLE_COUNT`]-point series for a position range
pub fn price_series(lower_price: f64, upper_price: f64) -> Vec<f64> {
    linspace(lower_price, upper_price, SAMPLE_COUNT)
}

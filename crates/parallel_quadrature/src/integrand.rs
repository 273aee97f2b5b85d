//! src/integrand.rs
//!
//! The fixed integrand and its midpoint-rule partial sums.
//!
//! The integrand is compiled in: `4 / (1 + x²)`, whose integral over
//! `[0, 1]` is exactly π. Workers evaluate it at the midpoint of each
//! sub-interval in their claimed block; the controller scales the grand
//! total by the interval width to obtain the estimate.

/// The integrand: `f(x) = 4 / (1 + x²)`.
#[inline]
pub fn integrand(x: f64) -> f64 {
    4.0 / (1.0 + x * x)
}

/// Midpoint-rule partial sum over sub-intervals `start..end` of a space of
/// `total` sub-intervals spanning `[0, 1)`.
///
/// Returns the unscaled sum of integrand samples; multiply by `1 / total`
/// to turn it into the block's contribution to the integral.
pub fn midpoint_block_sum(start: u64, end: u64, total: u64) -> f64 {
    let width = 1.0 / total as f64;
    let mut sum = 0.0;
    for i in start..end {
        let x = (i as f64 + 0.5) * width;
        sum += integrand(x);
    }
    sum
}

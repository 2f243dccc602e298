/// Effective sample size, as a fraction of matched units, under which a warning is logged.
pub const LOW_ESS_FRACTION: f64 = 0.1;
/// Multiplier of the standard error for the approximate 95% interval.
pub const TWO_SIGMA: f64 = 2.0;
/// Summation lanes used by `utils::fast_sum`.
pub const LANES: usize = 16;

use crate::constants::LANES;
use crate::errors::EruptError;

/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    let mut s = String::new();
    for i in items {
        s.push_str(i);
        s.push_str(&String::from(", "));
    }
    s
}

// Validation
pub fn validate_float_parameter(value: f64, min: f64, max: f64, parameter: &str) -> Result<(), EruptError> {
    if value.is_nan() || value < min || max < value {
        let ex_msg = format!("real value within range {} and {}", min, max);
        Err(EruptError::InvalidParameter(
            parameter.to_string(),
            ex_msg,
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate a probability that must be strictly positive, such as a clipping floor.
pub fn validate_probability_parameter(value: f64, parameter: &str) -> Result<(), EruptError> {
    validate_float_parameter(value, 0.0, 1.0, parameter)?;
    if value == 0.0 {
        return Err(EruptError::InvalidParameter(
            parameter.to_string(),
            "probability greater than 0".to_string(),
            value.to_string(),
        ));
    }
    Ok(())
}

/// Fast summation, using independent accumulators so the
/// additions can be vectorized.
#[inline]
pub fn fast_sum(values: &[f64]) -> f64 {
    let chunks = values.chunks_exact(LANES);
    let remainder = chunks.remainder();

    let sum = chunks.fold([0.0_f64; LANES], |mut acc, chunk| {
        for (a, v) in acc.iter_mut().zip(chunk) {
            *a += *v;
        }
        acc
    });

    let remainder: f64 = remainder.iter().sum();

    let mut reduced = 0.0;
    for s in sum.iter() {
        reduced += *s;
    }
    reduced + remainder
}

/// Sample standard deviation (n - 1 denominator) around a known mean.
///
/// Returns 0 for fewer than two values.
pub fn sample_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (ss / (n - 1) as f64).sqrt()
}

//! Scalers that map raw probabilities onto (0, 1]
//!
//! Both scalers are monotone and strictly positive, so any term that gets
//! scaled keeps a positive score downstream.

use serde::{Deserialize, Serialize};

/// How raw probabilities are spread before they are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scaler {
    /// Normal CDF with the sample mean and standard deviation of the values
    #[default]
    #[serde(rename = "normcdf")]
    NormCdf,
    /// Average rank divided by the number of values
    Percentile,
}

impl Scaler {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NormCdf => "normcdf",
            Self::Percentile => "percentile",
        }
    }

    /// Scale `values` into a new vector of the same length
    pub fn scale(&self, values: &[f64]) -> Vec<f64> {
        let scaled = match self {
            Self::NormCdf => normcdf_scale(values),
            Self::Percentile => percentile_scale(values),
        };
        scaled.into_iter().map(|v| v.max(f64::MIN_POSITIVE)).collect()
    }
}

fn normcdf_scale(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return vec![0.5; n];
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = variance.sqrt();
    if std <= f64::EPSILON * mean.abs().max(1.0) {
        return vec![0.5; n];
    }

    values
        .iter()
        .map(|v| standard_normal_cdf((v - mean) / std))
        .collect()
}

/// Average ranks (ties share the mean of their positions), divided by n
fn percentile_scale(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }
        // positions i..j are 1-based ranks i+1..=j
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg_rank / n as f64;
        }
        i = j;
    }
    ranks
}

/// Standard normal CDF via the complementary error function
pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / std::f64::consts::SQRT_2)
}

/// Complementary error function, Chebyshev fit with fractional error below
/// 1.2e-7 everywhere.
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87
                                    + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let ans = t * poly.exp();
    if x >= 0.0 {
        ans
    } else {
        2.0 - ans
    }
}

//! Pairwise correlation of daily return series.

use crate::core::types::round_to;

/// Pearson correlation matrix over return series.
///
/// Series may differ in length (weekend skipping trims instruments on a
/// weekly calendar); each pair is compared over the common trailing
/// window. An entry is 0 when either series has zero variance over that
/// window. Rounded to 3 decimals.
pub fn correlation_matrix(returns: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = returns.len();
    let mut matrix = vec![vec![0.0; n]; n];

    for i in 0..n {
        for j in 0..n {
            matrix[i][j] = pairwise(&returns[i], &returns[j]);
        }
    }
    matrix
}

fn pairwise(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let r1 = &a[a.len() - n..];
    let r2 = &b[b.len() - n..];

    let m1 = r1.iter().sum::<f64>() / n as f64;
    let m2 = r2.iter().sum::<f64>() / n as f64;

    let cov = r1
        .iter()
        .zip(r2.iter())
        .map(|(x, y)| (x - m1) * (y - m2))
        .sum::<f64>()
        / n as f64;
    let s1 = (r1.iter().map(|x| (x - m1).powi(2)).sum::<f64>() / n as f64).sqrt();
    let s2 = (r2.iter().map(|y| (y - m2).powi(2)).sum::<f64>() / n as f64).sqrt();

    if s1 * s2 == 0.0 {
        0.0
    } else {
        round_to(cov / (s1 * s2), 3)
    }
}

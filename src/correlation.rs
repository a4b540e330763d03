// correlation.rs - Equal-time connected spatial correlator

use crate::lattice::{Configuration, Shape};

/// Connected correlator `G(r) = ⟨φ(x) φ(x+r)⟩ - ⟨φ⟩²` for `r in 0..L/2`.
///
/// The shift is periodic along the first axis (rows on a lattice, slices on a
/// path) and the average runs over every site. The field is centred on its
/// mean before multiplying, which is algebraically the same quantity but
/// avoids cancelling two large numbers, so a uniform field gives zero at
/// every lag.
pub fn spatial_correlation(config: &Configuration) -> Vec<f64> {
    let (rows, cols) = match config.shape() {
        Shape::Path { len } => (len, 1),
        Shape::Lattice { rows, cols } => (rows, cols),
    };
    shifted_correlation(config.as_slice(), rows, cols)
}

/// Row-major `rows × cols` snapshot, shifted along rows.
pub fn shifted_correlation(values: &[f64], rows: usize, cols: usize) -> Vec<f64> {
    let n = rows * cols;
    debug_assert_eq!(values.len(), n);
    if n == 0 {
        return Vec::new();
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = values.iter().map(|&x| x - mean).collect();

    (0..rows / 2)
        .map(|r| {
            let mut acc = 0.0;
            for i in 0..rows {
                let src = (i + rows - r) % rows;
                let row = &centered[i * cols..(i + 1) * cols];
                let shifted = &centered[src * cols..(src + 1) * cols];
                acc += row.iter().zip(shifted).map(|(a, b)| a * b).sum::<f64>();
            }
            acc / n as f64
        })
        .collect()
}

// autocorrelation.rs - Normalised autocorrelation and integrated autocorrelation time

/// Largest window the τ estimator will sum over.
pub const MAX_WINDOW: usize = 1000;

/// Below this ρ(1) the chain is treated as uncorrelated.
pub const DECORRELATED_RHO1: f64 = 0.01;

/// Normalised autocorrelation ρ(k) for every lag `0..N`.
///
/// Each lag is divided by its own number of overlapping pairs,
/// `ρ(k) = Σ_{t<N-k} δ_t δ_{t+k} / (σ² (N - k))`, with σ² the population
/// variance. Degenerate inputs are not errors: fewer than two samples give
/// `[1.0]`, a constant series gives all ones.
pub fn autocorrelation(series: &[f64]) -> Vec<f64> {
    autocorrelation_up_to(series, series.len().saturating_sub(1))
}

/// As [`autocorrelation`], but only lags `0..=max_lag` (clamped to `N - 1`).
pub fn autocorrelation_up_to(series: &[f64], max_lag: usize) -> Vec<f64> {
    let n = series.len();
    if n < 2 {
        return vec![1.0];
    }
    let n_lags = max_lag.min(n - 1) + 1;

    let mean = series.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = series.iter().map(|&x| x - mean).collect();
    let variance = centered.iter().map(|d| d * d).sum::<f64>() / n as f64;

    // A constant series can leave a rounding residue in the variance.
    let first = series[0];
    if variance == 0.0 || series.iter().all(|&x| x == first) {
        return vec![1.0; n_lags];
    }

    let mut rho = Vec::with_capacity(n_lags);
    rho.push(1.0);
    for k in 1..n_lags {
        let c_k: f64 = centered[..n - k]
            .iter()
            .zip(&centered[k..])
            .map(|(a, b)| a * b)
            .sum();
        rho.push(c_k / (variance * (n - k) as f64));
    }
    rho
}

/// Integrated autocorrelation time `τ = 1/2 + Σ_{k=1}^{W-1} ρ(k)`.
///
/// Returns exactly 0.5 for series too short to correlate or whose lag-1
/// correlation is below [`DECORRELATED_RHO1`]. Otherwise `W` is the first
/// lag with ρ < 0, or `min(N, MAX_WINDOW)` if none occurs before that.
///
/// Only lags below the cap are searched. A series whose first negative lag
/// lies at or beyond [`MAX_WINDOW`] still sums exactly `MAX_WINDOW - 1` lags,
/// where an unbounded scan would keep going up to that lag.
pub fn integrated_autocorrelation_time(series: &[f64]) -> f64 {
    let max_window = series.len().min(MAX_WINDOW);
    let rho = autocorrelation_up_to(series, max_window.saturating_sub(1));
    integrated_time_from_rho(&rho)
}

/// τ from an already computed ρ, applying the same shortcut and window.
pub fn integrated_time_from_rho(rho: &[f64]) -> f64 {
    if rho.len() < 2 || rho[1] < DECORRELATED_RHO1 {
        return 0.5;
    }
    let max_window = rho.len().min(MAX_WINDOW);
    let window = rho[..max_window]
        .iter()
        .position(|&r| r < 0.0)
        .unwrap_or(max_window);

    0.5 + rho[1..window].iter().sum::<f64>()
}

// error_analysis.rs - Autocorrelation-aware error bars for Monte Carlo time series

use crate::autocorrelation::integrated_autocorrelation_time;

/// Error analysis of one recorded observable.
pub struct ErrorAnalysis {
    /// Raw time series data
    data: Vec<f64>,
    /// Integrated autocorrelation time
    tau_int: f64,
}

impl ErrorAnalysis {
    pub fn new(data: Vec<f64>) -> Self {
        let tau_int = integrated_autocorrelation_time(&data);
        Self { data, tau_int }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Sample variance (N - 1 denominator).
    pub fn variance(&self) -> f64 {
        let n = self.data.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean();
        self.data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    }

    pub fn tau_int(&self) -> f64 {
        self.tau_int
    }

    /// N / (2τ): number of statistically independent samples.
    pub fn effective_samples(&self) -> f64 {
        self.data.len() as f64 / (2.0 * self.tau_int)
    }

    /// Error of the mean inflated by the autocorrelation, `sqrt(σ² / N_eff)`.
    pub fn stat_error(&self) -> f64 {
        let n_eff = self.effective_samples();
        if n_eff <= 0.0 {
            return 0.0;
        }
        (self.variance() / n_eff).sqrt()
    }

    /// Leave-one-out jackknife error of an arbitrary estimator.
    pub fn jackknife_error<F>(&self, estimator: F) -> f64
    where
        F: Fn(&[f64]) -> f64,
    {
        jackknife_error(&self.data, estimator)
    }

    pub fn errors(&self) -> ErrorEstimates {
        let mean = self.mean();
        let stat_error = self.stat_error();
        ErrorEstimates {
            mean,
            tau_int: self.tau_int,
            n_eff: self.effective_samples(),
            stat_error,
            jack_error: self.jackknife_error(mean_of),
            relative_error: if mean != 0.0 { stat_error / mean.abs() } else { f64::INFINITY },
        }
    }
}

fn mean_of(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len() as f64
}

/// Jackknife error: recompute the estimator with each sample left out and
/// scale the spread of those estimates by (N - 1) / N.
pub fn jackknife_error<F>(data: &[f64], estimator: F) -> f64
where
    F: Fn(&[f64]) -> f64,
{
    let n = data.len();
    if n < 2 {
        return 0.0;
    }

    let mut jack_estimates = Vec::with_capacity(n);
    let mut subsample = Vec::with_capacity(n - 1);
    for i in 0..n {
        subsample.clear();
        subsample.extend_from_slice(&data[..i]);
        subsample.extend_from_slice(&data[i + 1..]);
        jack_estimates.push(estimator(&subsample));
    }

    let jack_mean = jack_estimates.iter().sum::<f64>() / n as f64;
    let jack_var = jack_estimates
        .iter()
        .map(|&x| (x - jack_mean).powi(2))
        .sum::<f64>()
        * (n - 1) as f64
        / n as f64;

    jack_var.sqrt()
}

/// Summary of the estimates for one observable.
#[derive(Debug, Clone, Copy)]
pub struct ErrorEstimates {
    pub mean: f64,
    pub tau_int: f64,
    pub n_eff: f64,
    pub stat_error: f64,
    pub jack_error: f64,
    pub relative_error: f64,
}

impl ErrorEstimates {
    /// One row of the table printed by [`print_error_table`].
    pub fn format_row(&self, name: &str) -> String {
        format!(
            "{:<20} {:>12.6} ± {:>10.6} {:>10.6} {:>8.2} {:>8.0}",
            name, self.mean, self.stat_error, self.jack_error, self.tau_int, self.n_eff
        )
    }
}

/// Print a named table of error estimates.
pub fn print_error_table(rows: &[(&str, ErrorEstimates)]) {
    println!("\n{:=<76}", "");
    println!(
        "{:<20} {:>12}   {:>10} {:>10} {:>8} {:>8}",
        "Observable", "Mean", "Stat Err", "Jack Err", "τ_int", "N_eff"
    );
    println!("{:-<76}", "");
    for (name, est) in rows {
        println!("{}", est.format_row(name));
    }
    println!("{:=<76}", "");
    println!("N_eff = N / (2 τ_int)");
}

// metropolis.rs - Single-site Metropolis-Hastings sweeps over paths and field lattices

use std::ops::AddAssign;

use rand::Rng;

use crate::lattice::{Configuration, Shape};
use crate::potential::Potential;

/// Kinetic coefficients of the discretised path action
/// `S = Σ (m / 2a) (x_{i+1} - x_i)² + a V(x_i)`.
///
/// Ignored on 2-D lattices, whose gradient term has unit isotropic coupling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathAction {
    pub mass: f64,
    /// Euclidean-time lattice spacing `a`.
    pub spacing: f64,
}

impl Default for PathAction {
    fn default() -> Self {
        Self { mass: 1.0, spacing: 0.5 }
    }
}

/// Acceptance bookkeeping for one or more sweeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepResult {
    pub accepted: usize,
    pub attempts: usize,
}

impl SweepResult {
    /// accepted / attempts, 0 when nothing was attempted.
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempts as f64
        }
    }
}

impl AddAssign for SweepResult {
    fn add_assign(&mut self, rhs: Self) {
        self.accepted += rhs.accepted;
        self.attempts += rhs.attempts;
    }
}

/// Change in action if site `i` moved from its current value to `new`.
///
/// Path: `(m/2a)[(x₊-x')² + (x'-x₋)² - (x₊-x)² - (x-x₋)²] + a ΔV`.
/// Lattice: `2(x'² - x²) - (x' - x) Σ_nn + ΔV`.
#[inline(always)]
pub fn site_action_change(
    config: &Configuration,
    i: usize,
    new: f64,
    potential: &Potential,
    path: &PathAction,
) -> f64 {
    let old = config.get(i);
    match config.shape() {
        Shape::Path { .. } => {
            let n = config.neighbors(i);
            let (next, prev) = (config.get(n.as_slice()[0]), config.get(n.as_slice()[1]));
            let diff_old = (next - old).powi(2) + (old - prev).powi(2);
            let diff_new = (next - new).powi(2) + (new - prev).powi(2);
            let ds_kinetic = (path.mass / (2.0 * path.spacing)) * (diff_new - diff_old);
            ds_kinetic + path.spacing * potential.delta(old, new)
        }
        Shape::Lattice { .. } => {
            let sum_nn = config.neighbor_sum(i);
            let ds_kinetic = (new * new - old * old) * 2.0 - (new - old) * sum_nn;
            ds_kinetic + potential.delta(old, new)
        }
    }
}

/// Metropolis test for a proposed move at site `i`. Writes `new` and returns
/// true on acceptance. A move with ΔS ≤ 0 is taken without consuming a draw.
#[inline(always)]
pub fn update_site<R: Rng + ?Sized>(
    config: &mut Configuration,
    i: usize,
    new: f64,
    potential: &Potential,
    path: &PathAction,
    rng: &mut R,
) -> bool {
    let delta_s = site_action_change(config, i, new, potential, path);
    let accept = if delta_s <= 0.0 {
        true
    } else {
        rng.gen::<f64>() < (-delta_s).exp()
    };
    if accept {
        config.set(i, new);
    }
    accept
}

/// One sequential sweep: every site visited once, in index order.
///
/// Each site draws its proposal `x + s (2u - 1)` from one uniform `u` in
/// `[0, 1)` and, only when the move raises the action, one acceptance
/// uniform. Any width is accepted: a negative `s` mirrors the interval and
/// `s = 0` freezes the chain with every move accepted.
pub fn local_sweep<R: Rng + ?Sized>(
    config: &mut Configuration,
    potential: &Potential,
    path: &PathAction,
    step_size: f64,
    rng: &mut R,
) -> SweepResult {
    let n = config.len();
    let mut accepted = 0;

    for i in 0..n {
        let new = config.get(i) + step_size * (2.0 * rng.gen::<f64>() - 1.0);
        if update_site(config, i, new, potential, path, rng) {
            accepted += 1;
        }
    }

    SweepResult { accepted, attempts: n }
}

/// Bundles a bound potential with the path action and proposal width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalMetropolis {
    pub potential: Potential,
    pub path: PathAction,
    pub step_size: f64,
}

impl LocalMetropolis {
    pub fn new(potential: Potential, path: PathAction, step_size: f64) -> Self {
        Self { potential, path, step_size }
    }

    /// Field-lattice sampler; the path coefficients are unused there.
    pub fn field(potential: Potential, step_size: f64) -> Self {
        Self::new(potential, PathAction::default(), step_size)
    }

    pub fn sweep<R: Rng + ?Sized>(&self, config: &mut Configuration, rng: &mut R) -> SweepResult {
        local_sweep(config, &self.potential, &self.path, self.step_size, rng)
    }

    /// Run `n_sweeps` sweeps and return the pooled acceptance counts.
    pub fn run<R: Rng + ?Sized>(
        &self,
        config: &mut Configuration,
        n_sweeps: usize,
        rng: &mut R,
    ) -> SweepResult {
        let mut total = SweepResult::default();
        for _ in 0..n_sweeps {
            total += self.sweep(config, rng);
        }
        total
    }
}

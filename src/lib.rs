//! Markov-chain Monte Carlo for Euclidean path integrals and 2-D scalar
//! field lattices: local Metropolis and Wolff cluster samplers plus the
//! autocorrelation and spatial-correlation analysis of their output.
//!
//! The caller owns the simulation loop, the [`Configuration`] and the
//! generator; every sampler takes `&mut R: Rng` so runs are reproducible.

pub mod error;
pub mod potential;
pub mod lattice;
pub mod metropolis;
pub mod wolff;
pub mod autocorrelation;
pub mod correlation;
pub mod error_analysis;

pub mod utils {
    pub mod rng;
}

pub use error::{ConfigurationError, Result};
pub use potential::{Potential, PotentialKind, PotentialParameters};
pub use lattice::{Configuration, Shape};
pub use metropolis::{local_sweep, LocalMetropolis, PathAction, SweepResult};
pub use wolff::{wolff_update, WolffSampler};
pub use autocorrelation::{autocorrelation, integrated_autocorrelation_time};
pub use correlation::spatial_correlation;

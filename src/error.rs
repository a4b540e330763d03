// error.rs - Errors raised while binding a simulation setup

use thiserror::Error;

/// Setup failures. Sampler and analysis calls never produce these; they are
/// raised only when a potential variant or lattice shape is bound.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Selector string did not name a known potential.
    #[error("unknown potential variant: {0:?} (expected harmonic, phi4 or double_well)")]
    UnknownPotential(String),

    /// Zero extent, or a buffer whose length disagrees with the shape.
    #[error("invalid lattice shape: {0}")]
    InvalidShape(String),
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;

// potential.rs - Scalar potentials V(x) entering the Euclidean action

use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigurationError, Result};

/// Which potential an experiment uses. Resolved once, before any sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PotentialKind {
    Harmonic,
    Phi4,
    DoubleWell,
}

impl FromStr for PotentialKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        match key.as_str() {
            "harmonic" | "qho" => Ok(PotentialKind::Harmonic),
            "phi4" | "phi^4" => Ok(PotentialKind::Phi4),
            "double_well" | "doublewell" | "dw" => Ok(PotentialKind::DoubleWell),
            _ => Err(ConfigurationError::UnknownPotential(s.to_string())),
        }
    }
}

impl fmt::Display for PotentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PotentialKind::Harmonic => "harmonic",
            PotentialKind::Phi4 => "phi4",
            PotentialKind::DoubleWell => "double_well",
        };
        f.write_str(name)
    }
}

/// Coefficients for every variant. Only the ones belonging to the bound
/// variant are read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialParameters {
    /// Harmonic mass m.
    pub mass: f64,
    /// Harmonic angular frequency ω.
    pub omega: f64,
    /// φ⁴ mass term m² (negative values give the broken phase).
    pub mass_sq: f64,
    /// φ⁴ quartic coupling λ.
    pub lambda: f64,
    /// Double-well barrier scale V0.
    pub v0: f64,
    /// Double-well minima sit at ±well_separation.
    pub well_separation: f64,
}

impl Default for PotentialParameters {
    fn default() -> Self {
        Self {
            mass:            1.0,
            omega:           1.0,
            mass_sq:         1.0,
            lambda:          0.0,
            v0:              1.0,
            well_separation: 1.5,
        }
    }
}

impl PotentialParameters {
    /// Bind a variant by name. Unknown names fail here, never later.
    pub fn bind(&self, selector: &str) -> Result<Potential> {
        let kind = selector.parse::<PotentialKind>()?;
        Ok(self.bind_kind(kind))
    }

    /// Bind an already-resolved variant.
    pub fn bind_kind(&self, kind: PotentialKind) -> Potential {
        match kind {
            PotentialKind::Harmonic => Potential::Harmonic {
                mass:  self.mass,
                omega: self.omega,
            },
            PotentialKind::Phi4 => Potential::Phi4 {
                mass_sq: self.mass_sq,
                lambda:  self.lambda,
            },
            PotentialKind::DoubleWell => Potential::DoubleWell {
                v0: self.v0,
                a:  self.well_separation,
            },
        }
    }
}

/// A bound potential. Evaluation is pure and never guards large |x|.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Potential {
    /// `0.5 m ω² x²`
    Harmonic { mass: f64, omega: f64 },
    /// `(m²/2) x² + (λ/4) x⁴`
    Phi4 { mass_sq: f64, lambda: f64 },
    /// `V0 (x² - a²)²`
    DoubleWell { v0: f64, a: f64 },
}

impl Potential {
    /// φ⁴ in the path-integral convention where the path mass enters as m².
    /// With `lambda == 0` this is the ω = 1 harmonic oscillator.
    pub fn phi4_from_path_mass(mass: f64, lambda: f64) -> Self {
        Potential::Phi4 { mass_sq: mass * mass, lambda }
    }

    pub fn kind(&self) -> PotentialKind {
        match self {
            Potential::Harmonic { .. } => PotentialKind::Harmonic,
            Potential::Phi4 { .. } => PotentialKind::Phi4,
            Potential::DoubleWell { .. } => PotentialKind::DoubleWell,
        }
    }

    /// V(x).
    #[inline(always)]
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            Potential::Harmonic { mass, omega } => 0.5 * mass * (omega * omega) * (x * x),
            Potential::Phi4 { mass_sq, lambda } => {
                let x2 = x * x;
                (mass_sq / 2.0) * x2 + (lambda / 4.0) * (x2 * x2)
            }
            Potential::DoubleWell { v0, a } => {
                let d = x * x - a * a;
                v0 * (d * d)
            }
        }
    }

    /// V(new) - V(old).
    #[inline(always)]
    pub fn delta(&self, old: f64, new: f64) -> f64 {
        self.evaluate(new) - self.evaluate(old)
    }

    /// Whether V(x) = V(-x). Cluster flips are only valid for even potentials.
    pub fn is_even(&self) -> bool {
        match self {
            Potential::Harmonic { .. } | Potential::Phi4 { .. } | Potential::DoubleWell { .. } => true,
        }
    }
}

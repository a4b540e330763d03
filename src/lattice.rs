// lattice.rs - Periodic 1-D paths and 2-D field lattices

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::{ConfigurationError, Result};

/// Extent of a configuration. Fixed once the buffer is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Euclidean-time path with `len` slices.
    Path { len: usize },
    /// `rows × cols` field lattice, stored row-major.
    Lattice { rows: usize, cols: usize },
}

impl Shape {
    /// Total number of sites.
    #[inline(always)]
    pub fn n_sites(&self) -> usize {
        match *self {
            Shape::Path { len } => len,
            Shape::Lattice { rows, cols } => rows * cols,
        }
    }

    /// Number of nearest neighbours per site (2 or 4).
    pub fn coordination(&self) -> usize {
        match self {
            Shape::Path { .. } => 2,
            Shape::Lattice { .. } => 4,
        }
    }

    fn validate(&self) -> Result<()> {
        let ok = match *self {
            Shape::Path { len } => len > 0,
            Shape::Lattice { rows, cols } => rows > 0 && cols > 0,
        };
        if ok {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidShape(format!("{self:?} has a zero extent")))
        }
    }
}

/// Toroidal buffer of real field values.
///
/// Index arithmetic wraps modulo the extent in every direction; there is no
/// boundary special-casing. Samplers mutate it in place, one site or one
/// cluster at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    shape: Shape,
    values: Vec<f64>,
}

impl Configuration {
    /// Cold start: every site zero.
    pub fn zeros(shape: Shape) -> Result<Self> {
        shape.validate()?;
        Ok(Self { shape, values: vec![0.0; shape.n_sites()] })
    }

    /// Cold-start 1-D path of `len` slices.
    pub fn path(len: usize) -> Result<Self> {
        Self::zeros(Shape::Path { len })
    }

    /// Cold-start `rows × cols` lattice.
    pub fn lattice(rows: usize, cols: usize) -> Result<Self> {
        Self::zeros(Shape::Lattice { rows, cols })
    }

    /// Wrap an existing buffer (row-major for lattices).
    pub fn from_vec(shape: Shape, values: Vec<f64>) -> Result<Self> {
        shape.validate()?;
        if values.len() != shape.n_sites() {
            return Err(ConfigurationError::InvalidShape(format!(
                "{shape:?} needs {} values, got {}",
                shape.n_sites(),
                values.len()
            )));
        }
        Ok(Self { shape, values })
    }

    /// Hot start: sites drawn uniformly from `[-|amplitude|, |amplitude|]`.
    pub fn random_uniform<R: Rng + ?Sized>(
        shape: Shape,
        amplitude: f64,
        rng: &mut R,
    ) -> Result<Self> {
        shape.validate()?;
        let dist = Uniform::new_inclusive(-amplitude.abs(), amplitude.abs());
        let values = (0..shape.n_sites()).map(|_| dist.sample(rng)).collect();
        Ok(Self { shape, values })
    }

    #[inline(always)]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    #[inline(always)]
    pub fn get(&self, i: usize) -> f64 {
        self.values[i]
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, value: f64) {
        self.values[i] = value;
    }

    /// φ → -φ at one site.
    #[inline(always)]
    pub fn flip(&mut self, i: usize) {
        self.values[i] = -self.values[i];
    }

    /// Flat index of `(row, col)`, wrapping both coordinates.
    /// On a path the column is ignored.
    #[inline(always)]
    pub fn index(&self, row: isize, col: isize) -> usize {
        match self.shape {
            Shape::Path { len } => wrap(row, len),
            Shape::Lattice { rows, cols } => wrap(row, rows) * cols + wrap(col, cols),
        }
    }

    /// Periodic nearest neighbours of site `i`.
    ///
    /// Path: `[i+1, i-1]`. Lattice: `[(r,c+1), (r,c-1), (r+1,c), (r-1,c)]`.
    /// Wolff growth examines neighbours in exactly this order. On extents of
    /// 1 or 2 the same site can appear more than once.
    #[inline(always)]
    pub fn neighbors(&self, i: usize) -> Neighbors {
        match self.shape {
            Shape::Path { len } => {
                let next = if i + 1 == len { 0 } else { i + 1 };
                let prev = if i == 0 { len - 1 } else { i - 1 };
                Neighbors { sites: [next, prev, 0, 0], len: 2 }
            }
            Shape::Lattice { rows, cols } => {
                let (r, c) = (i / cols, i % cols);
                let right = r * cols + (if c + 1 == cols { 0 } else { c + 1 });
                let left = r * cols + (if c == 0 { cols - 1 } else { c - 1 });
                let down = (if r + 1 == rows { 0 } else { r + 1 }) * cols + c;
                let up = (if r == 0 { rows - 1 } else { r - 1 }) * cols + c;
                Neighbors { sites: [right, left, down, up], len: 4 }
            }
        }
    }

    /// Sum of the nearest-neighbour values of site `i`.
    #[inline(always)]
    pub fn neighbor_sum(&self, i: usize) -> f64 {
        match self.shape {
            Shape::Path { .. } => {
                let n = self.neighbors(i);
                self.values[n.sites[0]] + self.values[n.sites[1]]
            }
            Shape::Lattice { .. } => {
                let [right, left, down, up] = self.neighbors(i).sites;
                self.values[down] + self.values[up] + self.values[right] + self.values[left]
            }
        }
    }

    /// Spatial average of the field, the usual order-parameter sample.
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

/// Up to four neighbour indices, no allocation.
#[derive(Debug, Clone, Copy)]
pub struct Neighbors {
    sites: [usize; 4],
    len: usize,
}

impl Neighbors {
    pub fn as_slice(&self) -> &[usize] {
        &self.sites[..self.len]
    }
}

impl IntoIterator for Neighbors {
    type Item = usize;
    type IntoIter = std::iter::Take<std::array::IntoIter<usize, 4>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.into_iter().take(self.len)
    }
}

#[inline(always)]
fn wrap(k: isize, n: usize) -> usize {
    k.rem_euclid(n as isize) as usize
}

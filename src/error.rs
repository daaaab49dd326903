use crate::{quadrature::QuadStatus, DofIdx};

use std::fmt;

pub type FemResult<T> = Result<T, FemError>;

/// Failure of a Galerkin solve.
///
/// The variants separate bad geometry, an inconsistent basis,
/// an integration budget that was too small, a singular system
/// and operands of mismatching size, so callers can react differently to each.
#[derive(Debug, thiserror::Error)]
pub enum FemError {
  #[error("invalid mesh: {0}")]
  InvalidMesh(String),

  #[error("invalid basis: {0}")]
  InvalidBasis(String),

  #[error(
    "quadrature for {entry} did not converge ({status:?} after {nsubintervals} subintervals, error estimate {error_estimate:.3e})"
  )]
  QuadratureNonConvergence {
    entry: AssemblyEntry,
    nsubintervals: usize,
    error_estimate: f64,
    status: QuadStatus,
  },

  #[error("galerkin matrix is singular (pivot {pivot:.3e} in row {row})")]
  SingularSystem { row: usize, pivot: f64 },

  #[error("{what} has size {found}, expected {expected}")]
  DimensionMismatch {
    what: &'static str,
    expected: usize,
    found: usize,
  },
}

/// The Galerkin entry an integral contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyEntry {
  Load(DofIdx),
  Stiffness(DofIdx, DofIdx),
}
impl fmt::Display for AssemblyEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Load(i) => write!(f, "load entry {i}"),
      Self::Stiffness(i, j) => write!(f, "stiffness entry ({i}, {j})"),
    }
  }
}

//! Basis functions with compact support and ordered basis sets.

pub mod factory;
pub mod hat;

pub use factory::{build_basis, hat_basis, BoundaryFlags, HatFamily, ShapeFamily};
pub use hat::{Hat, HatFunction, LeftHalfHat, RightHalfHat};

use crate::{
  error::{FemError, FemResult},
  DofIdx, GalVec,
};

use std::ops::Index;

/// A scalar basis function with compact support.
///
/// Implementors only describe their shape on the support.
/// [`BasisFunction::value`] and [`BasisFunction::deriv`] clip to the support,
/// so every basis function is exactly zero outside of [`BasisFunction::domain`].
pub trait BasisFunction {
  /// The support interval $[lo, hi)$.
  fn domain(&self) -> (f64, f64);

  /// Shape of the function, only evaluated inside the support.
  fn shape_value(&self, x: f64) -> f64;
  /// Shape of the derivative, only evaluated inside the support.
  fn shape_deriv(&self, x: f64) -> f64;

  /// Support membership. Half-open by default.
  fn within(&self, x: f64) -> bool {
    let (lo, hi) = self.domain();
    lo <= x && x < hi
  }

  fn value(&self, x: f64) -> f64 {
    if !self.within(x) {
      return 0.0;
    }
    self.shape_value(x)
  }

  fn deriv(&self, x: f64) -> f64 {
    if !self.within(x) {
      return 0.0;
    }
    self.shape_deriv(x)
  }
}

/// Ordered basis, the position of a function is its DOF index.
///
/// Remembers the boundary flags it was built for, so that a solver
/// can check it against a mesh.
#[derive(Debug, Clone)]
pub struct BasisSet<B> {
  functions: Vec<B>,
  flags: BoundaryFlags,
}

impl<B: BasisFunction> BasisSet<B> {
  pub fn new(functions: Vec<B>, flags: BoundaryFlags) -> Self {
    Self { functions, flags }
  }

  pub fn len(&self) -> usize {
    self.functions.len()
  }
  pub fn is_empty(&self) -> bool {
    self.functions.is_empty()
  }
  pub fn flags(&self) -> BoundaryFlags {
    self.flags
  }
  pub fn functions(&self) -> &[B] {
    &self.functions
  }
  pub fn get(&self, idof: DofIdx) -> Option<&B> {
    self.functions.get(idof)
  }
  pub fn iter(&self) -> std::slice::Iter<'_, B> {
    self.functions.iter()
  }

  /// $sum_i phi_i (x)$
  pub fn sum_values(&self, x: f64) -> f64 {
    self.iter().map(|phi| phi.value(x)).sum()
  }

  /// Evaluates the expansion $u_h (x) = sum_i c_i phi_i (x)$.
  pub fn expand(&self, coeffs: &GalVec, x: f64) -> FemResult<f64> {
    self.check_coeffs(coeffs)?;
    Ok(self.combine(coeffs, |phi| phi.value(x)))
  }

  /// Evaluates the derivative $u_h' (x) = sum_i c_i phi_i' (x)$.
  pub fn expand_deriv(&self, coeffs: &GalVec, x: f64) -> FemResult<f64> {
    self.check_coeffs(coeffs)?;
    Ok(self.combine(coeffs, |phi| phi.deriv(x)))
  }

  pub fn check_coeffs(&self, coeffs: &GalVec) -> FemResult<()> {
    if coeffs.len() != self.len() {
      return Err(FemError::DimensionMismatch {
        what: "coefficient vector",
        expected: self.len(),
        found: coeffs.len(),
      });
    }
    Ok(())
  }

  /// $sum_i c_i g(phi_i)$, for coefficients already checked against the basis.
  pub(crate) fn combine<G>(&self, coeffs: &GalVec, g: G) -> f64
  where
    G: Fn(&B) -> f64,
  {
    self.iter().zip(coeffs.iter()).map(|(phi, c)| c * g(phi)).sum()
  }
}

impl<B> Index<DofIdx> for BasisSet<B> {
  type Output = B;
  fn index(&self, idof: DofIdx) -> &Self::Output {
    &self.functions[idof]
  }
}

impl<'a, B> IntoIterator for &'a BasisSet<B> {
  type Item = &'a B;
  type IntoIter = std::slice::Iter<'a, B>;
  fn into_iter(self) -> Self::IntoIter {
    self.functions.iter()
  }
}

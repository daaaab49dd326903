//! Right-hand sides and bilinear forms of the weak formulation.

use crate::basis::BasisFunction;

/// Source term $f$ of the right-hand side $integral f v$.
pub trait LoadFn {
  fn eval(&self, x: f64) -> f64;
}
impl<F> LoadFn for F
where
  F: Fn(f64) -> f64,
{
  fn eval(&self, x: f64) -> f64 {
    self(x)
  }
}

/// Pointwise integrand $a(u, v)(x)$ of a bilinear form $integral a(u, v)$.
pub trait BilinearForm {
  fn integrand<B: BasisFunction>(&self, trial: &B, test: &B, x: f64) -> f64;

  /// Whether $a(u, v) = a(v, u)$, allowing assembly of only one triangle.
  fn is_symmetric(&self) -> bool {
    false
  }
}

/// $a(u, v) = integral u' v'$, the weak form of $-u''$.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaplaceForm;
impl BilinearForm for LaplaceForm {
  fn integrand<B: BasisFunction>(&self, trial: &B, test: &B, x: f64) -> f64 {
    trial.deriv(x) * test.deriv(x)
  }
  fn is_symmetric(&self) -> bool {
    true
  }
}

/// $m(u, v) = integral u v$
#[derive(Debug, Clone, Copy, Default)]
pub struct MassForm;
impl BilinearForm for MassForm {
  fn integrand<B: BasisFunction>(&self, trial: &B, test: &B, x: f64) -> f64 {
    trial.value(x) * test.value(x)
  }
  fn is_symmetric(&self) -> bool {
    true
  }
}

/// $a(u, v) + c m(u, v)$, the weak form of $-u'' + c u$.
///
/// Negative shifts give Helmholtz-type problems.
#[derive(Debug, Clone, Copy)]
pub struct ShiftedLaplaceForm {
  pub shift: f64,
}
impl ShiftedLaplaceForm {
  pub fn new(shift: f64) -> Self {
    Self { shift }
  }
}
impl BilinearForm for ShiftedLaplaceForm {
  fn integrand<B: BasisFunction>(&self, trial: &B, test: &B, x: f64) -> f64 {
    LaplaceForm.integrand(trial, test, x) + self.shift * MassForm.integrand(trial, test, x)
  }
  fn is_symmetric(&self) -> bool {
    true
  }
}

//! One-shot Galerkin solver: validate, assemble, solve.

use crate::{
  assemble::{self, IntegrationRange},
  basis::{BasisFunction, BasisSet},
  error::{FemError, FemResult},
  linalg::DenseLu,
  mesh::Mesh,
  operators::{BilinearForm, LoadFn},
  quadrature::{AdaptiveGaussKronrod, Integrator, QuadConfig},
  GalMat, GalVec,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
  pub range: IntegrationRange,
  /// Pivots below `pivot_tol` times the largest matrix entry count as zero.
  pub pivot_tol: f64,
}
impl Default for SolverConfig {
  fn default() -> Self {
    Self {
      range: IntegrationRange::default(),
      pivot_tol: 1e-10,
    }
  }
}
impl SolverConfig {
  pub fn with_range(mut self, range: IntegrationRange) -> Self {
    self.range = range;
    self
  }
  pub fn with_pivot_tol(mut self, pivot_tol: f64) -> Self {
    self.pivot_tol = pivot_tol;
    self
  }
}

/// Galerkin solver for a given basis on a 1D mesh.
///
/// Holds no state between solves, all matrices and factorizations
/// live only for the duration of a single call.
#[derive(Debug, Clone)]
pub struct GalerkinSolver<I = AdaptiveGaussKronrod> {
  integrator: I,
  config: SolverConfig,
}

impl Default for GalerkinSolver {
  fn default() -> Self {
    Self::new(QuadConfig::default(), SolverConfig::default())
  }
}

impl GalerkinSolver {
  pub fn new(quad: QuadConfig, config: SolverConfig) -> Self {
    Self::with_integrator(AdaptiveGaussKronrod::new(quad), config)
  }
}

impl<I: Integrator> GalerkinSolver<I> {
  pub fn with_integrator(integrator: I, config: SolverConfig) -> Self {
    Self { integrator, config }
  }

  pub fn integrator(&self) -> &I {
    &self.integrator
  }
  pub fn config(&self) -> &SolverConfig {
    &self.config
  }

  pub fn assemble_galvec<B, F>(&self, mesh: &Mesh, basis: &BasisSet<B>, load: &F) -> FemResult<GalVec>
  where
    B: BasisFunction,
    F: LoadFn,
  {
    assemble::assemble_galvec(mesh, basis, load, &self.integrator, self.config.range)
  }

  pub fn assemble_galmat<B, A>(&self, mesh: &Mesh, basis: &BasisSet<B>, form: &A) -> FemResult<GalMat>
  where
    B: BasisFunction,
    A: BilinearForm,
  {
    assemble::assemble_galmat(mesh, basis, form, &self.integrator, self.config.range)
  }

  /// Solves $A mu = phi$ by LU decomposition.
  pub fn solve_system(&self, galmat: GalMat, galvec: &GalVec) -> FemResult<GalVec> {
    DenseLu::new(galmat, self.config.pivot_tol)?.solve(galvec)
  }

  /// Computes the Galerkin coefficients of the problem
  /// $integral a(u, phi_i) = integral f phi_i$ for all basis functions $phi_i$.
  ///
  /// The returned coefficients are index-aligned with `basis`.
  pub fn solve<B, F, A>(
    &self,
    mesh: &Mesh,
    basis: &BasisSet<B>,
    load: &F,
    form: &A,
  ) -> FemResult<GalVec>
  where
    B: BasisFunction,
    F: LoadFn,
    A: BilinearForm,
  {
    let _span = tracing::info_span!("galerkin_solve", ndofs = basis.len()).entered();

    validate_basis(mesh, basis)?;
    let galvec = self.assemble_galvec(mesh, basis, load)?;
    let galmat = self.assemble_galmat(mesh, basis, form)?;
    let galsol = self.solve_system(galmat, &galvec)?;

    tracing::debug!("solved for {} galerkin coefficients", galsol.len());
    Ok(galsol)
  }
}

/// Checks that `basis` fits `mesh`: it has as many functions as its
/// boundary flags demand and every support lies within the mesh range.
pub fn validate_basis<B: BasisFunction>(mesh: &Mesh, basis: &BasisSet<B>) -> FemResult<()> {
  let expected = basis.flags().expected_ndofs(mesh);
  if basis.len() != expected {
    return Err(FemError::InvalidBasis(format!(
      "basis has {} functions, but {} nodes with {:?} require {expected}",
      basis.len(),
      mesh.nnodes(),
      basis.flags(),
    )));
  }

  let (a, b) = mesh.range();
  let outside = basis
    .iter()
    .map(|phi| phi.domain())
    .enumerate()
    .find(|&(_, (lo, hi))| !(a <= lo && lo < hi && hi <= b));
  if let Some((idof, (lo, hi))) = outside {
    return Err(FemError::InvalidBasis(format!(
      "domain [{lo}, {hi}] of basis function {idof} is not a subinterval of the mesh range [{a}, {b}]"
    )));
  }
  Ok(())
}

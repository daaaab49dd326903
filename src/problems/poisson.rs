//! Module for the Poisson Equation, the prototypical ellipitic PDE.
//!
//! $-u'' = f$ on $[a, b]$ with a Dirichlet or Neumann condition on each end.

use crate::{
  assemble,
  basis::{build_basis, BasisFunction, BasisSet, BoundaryFlags, HatFamily, HatFunction},
  error::FemResult,
  mesh::Mesh,
  operators::{LaplaceForm, LoadFn},
  quadrature::Integrator,
  solver::GalerkinSolver,
  DofIdx, GalVec,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition {
  /// Essential condition $u = g$.
  Dirichlet(f64),
  /// Natural condition $u' = g$.
  ///
  /// The derivative is taken along $x$, not along the outward normal.
  Neumann(f64),
}

/// Piecewise-linear Galerkin solution.
#[derive(Debug, Clone)]
pub struct PoissonSolution {
  basis: BasisSet<HatFunction>,
  coeffs: GalVec,
}
impl PoissonSolution {
  pub fn basis(&self) -> &BasisSet<HatFunction> {
    &self.basis
  }
  /// Coefficients, one per mesh node.
  pub fn coeffs(&self) -> &GalVec {
    &self.coeffs
  }
  // The coefficients come from a solve on this very basis.
  pub fn value(&self, x: f64) -> f64 {
    self.basis.combine(&self.coeffs, |phi| phi.value(x))
  }
  pub fn deriv(&self, x: f64) -> f64 {
    self.basis.combine(&self.coeffs, |phi| phi.deriv(x))
  }
}

/// Solves the Poisson problem with (possibly inhomogeneous) boundary data.
///
/// All nodes carry a DOF. Neumann data enters the Galerkin vector through
/// the boundary term of the weak form, Dirichlet data is imposed by fixing
/// the boundary DOFs.
pub fn solve_poisson<I, F>(
  solver: &GalerkinSolver<I>,
  mesh: &Mesh,
  load: &F,
  left: BoundaryCondition,
  right: BoundaryCondition,
) -> FemResult<PoissonSolution>
where
  I: Integrator,
  F: LoadFn,
{
  let basis = build_basis::<HatFamily>(mesh, BoundaryFlags::FREE);
  let mut galmat = solver.assemble_galmat(mesh, &basis, &LaplaceForm)?;
  let mut galvec = solver.assemble_galvec(mesh, &basis, load)?;

  // $integral u' v' = integral f v + u'(b) v(b) - u'(a) v(a)$
  let ends: [(DofIdx, BoundaryCondition, f64); 2] =
    [(0, left, -1.0), (basis.len() - 1, right, 1.0)];
  let mut dirichlet_coeffs = Vec::new();
  for (idof, bc, orientation) in ends {
    match bc {
      BoundaryCondition::Dirichlet(value) => dirichlet_coeffs.push((idof, value)),
      BoundaryCondition::Neumann(flux) => galvec[idof] += orientation * flux,
    }
  }
  tracing::debug!("fixing {} dirichlet dofs", dirichlet_coeffs.len());
  assemble::fix_dofs_coeff(&dirichlet_coeffs, &mut galmat, &mut galvec);

  let coeffs = solver.solve_system(galmat, &galvec)?;
  Ok(PoissonSolution { basis, coeffs })
}

#[cfg(test)]
mod test {
  use super::{solve_poisson, BoundaryCondition::*};
  use crate::{
    basis::hat_basis, error::FemError, mesh::Mesh, operators::LaplaceForm,
    solver::GalerkinSolver,
  };

  use approx::assert_relative_eq;
  use std::f64::consts::PI;

  #[test]
  fn linear_dirichlet_data() {
    let mesh = Mesh::uniform(0.0, 1.0, 4).unwrap();
    let solver = GalerkinSolver::default();
    let zero = |_: f64| 0.0;
    let sol = solve_poisson(&solver, &mesh, &zero, Dirichlet(1.0), Dirichlet(3.0)).unwrap();
    let expected = na::dvector![1.0, 1.5, 2.0, 2.5, 3.0];
    assert_relative_eq!(sol.coeffs().clone(), expected, epsilon = 1e-12);
    assert_relative_eq!(sol.value(0.3), 1.6, epsilon = 1e-12);
    assert_relative_eq!(sol.deriv(0.9), 2.0, epsilon = 1e-12);
  }

  #[test]
  fn dirichlet_and_neumann_data() {
    let mesh = Mesh::uniform(0.0, 1.0, 5).unwrap();
    let solver = GalerkinSolver::default();

    // $u = x - x^2/2$
    let one = |_: f64| 1.0;
    let sol = solve_poisson(&solver, &mesh, &one, Dirichlet(0.0), Neumann(0.0)).unwrap();
    for &x in mesh.nodes() {
      assert_relative_eq!(sol.value(x), x - 0.5 * x * x, epsilon = 1e-12);
    }

    // $u = 2x - 2$
    let zero = |_: f64| 0.0;
    let sol = solve_poisson(&solver, &mesh, &zero, Neumann(2.0), Dirichlet(0.0)).unwrap();
    for &x in mesh.nodes() {
      assert_relative_eq!(sol.value(x), 2.0 * x - 2.0, epsilon = 1e-12);
    }
  }

  #[test]
  fn fixing_agrees_with_elimination() {
    let mesh = Mesh::uniform(0.0, 1.0, 6).unwrap();
    let solver = GalerkinSolver::default();
    let load = |x: f64| (PI * x).sin();

    let fixed = solve_poisson(&solver, &mesh, &load, Dirichlet(0.0), Dirichlet(0.0)).unwrap();
    let basis = hat_basis(&mesh, true, true);
    let eliminated = solver.solve(&mesh, &basis, &load, &LaplaceForm).unwrap();

    let ninterior = eliminated.len();
    assert_relative_eq!(
      fixed.coeffs().rows(1, ninterior).into_owned(),
      eliminated,
      epsilon = 1e-12
    );
    assert_eq!(fixed.coeffs()[0], 0.0);
    assert_eq!(fixed.coeffs()[ninterior + 1], 0.0);
  }

  #[test]
  fn pure_neumann_is_singular() {
    let mesh = Mesh::uniform(0.0, 1.0, 4).unwrap();
    let result = solve_poisson(
      &GalerkinSolver::default(),
      &mesh,
      &|_: f64| 0.0,
      Neumann(1.0),
      Neumann(1.0),
    );
    assert!(matches!(result, Err(FemError::SingularSystem { .. })));
  }
}

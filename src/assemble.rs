//! Assembly of the Galerkin matrix and vector by numerical integration.

use crate::{
  basis::{BasisFunction, BasisSet},
  error::{AssemblyEntry, FemError, FemResult},
  mesh::Mesh,
  operators::{BilinearForm, LoadFn},
  quadrature::Integrator,
  DofIdx, GalMat, GalVec,
};

use itertools::iproduct;

/// Over which range each Galerkin entry gets integrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrationRange {
  /// The whole mesh range $[a, b]$ for every entry, split at the mesh nodes.
  ///
  /// Relies on the basis functions vanishing outside their support.
  /// The split keeps the kinks of the basis functions on subinterval boundaries.
  FullRange,
  /// Cell by cell, over the cells where all involved basis functions live.
  ///
  /// Entries of functions with disjoint support are zero without integration.
  #[default]
  Elementwise,
}

/// Assembly algorithm for the Galerkin Vector.
///
/// $phi_i = integral f phi_i$
pub fn assemble_galvec<B, F, I>(
  mesh: &Mesh,
  basis: &BasisSet<B>,
  load: &F,
  integrator: &I,
  range: IntegrationRange,
) -> FemResult<GalVec>
where
  B: BasisFunction,
  F: LoadFn,
  I: Integrator,
{
  tracing::debug!("assembling galvec with {} dofs over {range:?}", basis.len());

  let mut galvec = GalVec::zeros(basis.len());
  for (idof, phi) in basis.iter().enumerate() {
    galvec[idof] = integrate_entry(
      mesh,
      integrator,
      range,
      phi.domain(),
      |x| load.eval(x) * phi.value(x),
      AssemblyEntry::Load(idof),
    )?;
  }
  Ok(galvec)
}

/// Assembly algorithm for the Galerkin Matrix.
///
/// $A_(i j) = integral a(phi_j, phi_i)$
///
/// For symmetric forms only the upper triangle is integrated and then mirrored.
pub fn assemble_galmat<B, A, I>(
  mesh: &Mesh,
  basis: &BasisSet<B>,
  form: &A,
  integrator: &I,
  range: IntegrationRange,
) -> FemResult<GalMat>
where
  B: BasisFunction,
  A: BilinearForm,
  I: Integrator,
{
  let ndofs = basis.len();
  let symmetric = form.is_symmetric();
  tracing::debug!("assembling {ndofs}x{ndofs} galmat over {range:?} (symmetric: {symmetric})");

  let mut galmat = GalMat::zeros(ndofs, ndofs);
  for (i, j) in iproduct!(0..ndofs, 0..ndofs) {
    if symmetric && j < i {
      continue;
    }
    let (test, trial) = (&basis[i], &basis[j]);
    let support = intersect(test.domain(), trial.domain());
    let value = integrate_entry(
      mesh,
      integrator,
      range,
      support,
      |x| form.integrand(trial, test, x),
      AssemblyEntry::Stiffness(i, j),
    )?;

    tracing::trace!("galmat[({i}, {j})] = {value}");
    galmat[(i, j)] = value;
    if symmetric {
      galmat[(j, i)] = value;
    }
  }
  Ok(galmat)
}

fn intersect((lo0, hi0): (f64, f64), (lo1, hi1): (f64, f64)) -> (f64, f64) {
  (lo0.max(lo1), hi0.min(hi1))
}

/// Integrates `integrand` for a single Galerkin entry,
/// whose integrand vanishes outside of `support`.
fn integrate_entry<I, F>(
  mesh: &Mesh,
  integrator: &I,
  range: IntegrationRange,
  (lo, hi): (f64, f64),
  integrand: F,
  entry: AssemblyEntry,
) -> FemResult<f64>
where
  I: Integrator,
  F: Fn(f64) -> f64,
{
  let ranges: Vec<(f64, f64)> = match range {
    IntegrationRange::FullRange => mesh.cells().collect(),
    IntegrationRange::Elementwise => mesh.cells_within(lo, hi).collect(),
  };

  let mut sum = 0.0;
  for (a, b) in ranges {
    let result = integrator.integrate(&integrand, a, b);
    if !result.converged() {
      tracing::warn!(
        "integral for {entry} on [{a}, {b}] did not converge: {:?}",
        result.status
      );
      return Err(FemError::QuadratureNonConvergence {
        entry,
        nsubintervals: result.nsubintervals,
        error_estimate: result.error_estimate,
        status: result.status,
      });
    }
    sum += result.value;
  }
  Ok(sum)
}

/// Fix DOFs of the FE solution.
///
/// Is primarly used to enforce essential (Dirichlet) boundary conditions.
///
/// Modifies supplied galerkin matrix and galerkin vector,
/// such that the FE solution has the given coefficents on the dofs.
/// $mat(A_0, 0; 0, I) vec(mu_0, mu_diff) = vec(phi - A_(0 diff) gamma, gamma)$
pub fn fix_dofs_coeff(dof_coeffs: &[(DofIdx, f64)], galmat: &mut GalMat, galvec: &mut GalVec) {
  let ndofs = galmat.nrows();

  let mut lifting = GalVec::zeros(ndofs);
  for &(idof, coeff) in dof_coeffs {
    lifting[idof] = coeff;
  }

  // Modify galvec.
  *galvec -= &*galmat * lifting;

  // Set galvec to prescribed coefficents.
  dof_coeffs.iter().for_each(|&(i, v)| galvec[i] = v);

  // Set entries zero that share a (row or column) index with a fixed dof
  // and the diagonal to one.
  for &(idof, _) in dof_coeffs {
    galmat.row_mut(idof).fill(0.0);
    galmat.column_mut(idof).fill(0.0);
    galmat[(idof, idof)] = 1.0;
  }
}

#[cfg(test)]
mod test {
  use super::{assemble_galmat, assemble_galvec, fix_dofs_coeff, IntegrationRange};
  use crate::{
    basis::hat_basis,
    error::{AssemblyEntry, FemError},
    linalg::DMatrixExt,
    mesh::Mesh,
    operators::{LaplaceForm, MassForm},
    quadrature::{AdaptiveGaussKronrod, QuadConfig},
  };

  use approx::assert_relative_eq;

  #[test]
  fn galvec_of_constant_load() {
    let mesh = Mesh::uniform(0.0, 1.0, 4).unwrap();
    let basis = hat_basis(&mesh, false, false);
    let config = QuadConfig::default().with_abs_tol(1e-13).with_rel_tol(0.0);
    let quad = AdaptiveGaussKronrod::new(config);
    for range in [IntegrationRange::FullRange, IntegrationRange::Elementwise] {
      let galvec = assemble_galvec(&mesh, &basis, &|_: f64| 1.0, &quad, range).unwrap();
      let expected = na::dvector![0.125, 0.25, 0.25, 0.25, 0.125];
      assert_relative_eq!(galvec, expected, epsilon = 1e-12);
    }
  }

  #[test]
  fn mass_matrix() {
    let mesh = Mesh::uniform(0.0, 1.0, 4).unwrap();
    let basis = hat_basis(&mesh, true, true);
    let quad = AdaptiveGaussKronrod::default();
    let galmat =
      assemble_galmat(&mesh, &basis, &MassForm, &quad, IntegrationRange::default()).unwrap();
    let h = 0.25;
    #[rustfmt::skip]
    let expected = h / 6.0 * na::dmatrix![
      4.0, 1.0, 0.0;
      1.0, 4.0, 1.0;
      0.0, 1.0, 4.0;
    ];
    assert_relative_eq!(galmat, expected, epsilon = 1e-12);
  }

  #[test]
  fn nonsymmetric_form_fills_full_matrix() {
    struct AdvectionForm;
    impl crate::operators::BilinearForm for AdvectionForm {
      fn integrand<B: crate::basis::BasisFunction>(&self, trial: &B, test: &B, x: f64) -> f64 {
        trial.deriv(x) * test.value(x)
      }
    }

    let mesh = Mesh::uniform(0.0, 1.0, 4).unwrap();
    let basis = hat_basis(&mesh, true, true);
    let quad = AdaptiveGaussKronrod::default();
    let galmat =
      assemble_galmat(&mesh, &basis, &AdvectionForm, &quad, IntegrationRange::default()).unwrap();
    #[rustfmt::skip]
    let expected = na::dmatrix![
       0.0,  0.5,  0.0;
      -0.5,  0.0,  0.5;
       0.0, -0.5,  0.0;
    ];
    assert_relative_eq!(galmat, expected, epsilon = 1e-12);
    assert!(!galmat.is_symmetric(1e-3));
  }

  /// Laplacian with a coefficient jumping inside the first cell.
  struct JumpingLaplace;
  impl crate::operators::BilinearForm for JumpingLaplace {
    fn integrand<B: crate::basis::BasisFunction>(&self, trial: &B, test: &B, x: f64) -> f64 {
      let coeff = if x < 0.2 { 1.0 } else { 2.0 };
      coeff * trial.deriv(x) * test.deriv(x)
    }
  }

  #[test]
  fn nonconvergence_is_reported() {
    let mesh = Mesh::uniform(0.0, 1.0, 3).unwrap();
    let basis = hat_basis(&mesh, true, true);
    let config = QuadConfig::default()
      .with_abs_tol(1e-15)
      .with_rel_tol(0.0)
      .with_max_subintervals(2);
    let quad = AdaptiveGaussKronrod::new(config);
    for range in [IntegrationRange::FullRange, IntegrationRange::Elementwise] {
      let result = assemble_galmat(&mesh, &basis, &JumpingLaplace, &quad, range);
      assert!(matches!(
        result,
        Err(FemError::QuadratureNonConvergence {
          entry: AssemblyEntry::Stiffness(0, 0),
          ..
        })
      ));
    }
  }

  #[test]
  fn full_range_covers_all_cells() {
    // Free ends on a nonuniform mesh, the rows of the Laplacian must cancel.
    let mesh = Mesh::new(vec![0.0, 0.1, 0.37, 0.6, 1.0]).unwrap();
    let basis = hat_basis(&mesh, false, false);
    let quad = AdaptiveGaussKronrod::default();
    let galmat =
      assemble_galmat(&mesh, &basis, &LaplaceForm, &quad, IntegrationRange::FullRange).unwrap();
    for row in galmat.row_iter() {
      assert!(row.sum().abs() <= 1e-12);
    }
  }

  #[test]
  fn fixing_dofs() {
    #[rustfmt::skip]
    let mut galmat = na::dmatrix![
       1.0, -1.0,  0.0;
      -1.0,  2.0, -1.0;
       0.0, -1.0,  1.0;
    ];
    let mut galvec = na::dvector![0.0, 0.0, 0.0];
    fix_dofs_coeff(&[(0, 1.0), (2, 3.0)], &mut galmat, &mut galvec);

    #[rustfmt::skip]
    let expected_galmat = na::dmatrix![
      1.0, 0.0, 0.0;
      0.0, 2.0, 0.0;
      0.0, 0.0, 1.0;
    ];
    assert_eq!(galmat, expected_galmat);
    assert_eq!(galvec, na::dvector![1.0, 4.0, 3.0]);
  }
}

use crate::{
  error::{FemError, FemResult},
  GalMat, GalVec,
};

pub trait DMatrixExt {
  fn is_symmetric(&self, eps: f64) -> bool;
}
impl DMatrixExt for na::DMatrix<f64> {
  fn is_symmetric(&self, eps: f64) -> bool {
    self.is_square()
      && (0..self.nrows())
        .all(|i| (0..i).all(|j| (self[(i, j)] - self[(j, i)]).abs() <= eps))
  }
}

/// Dense LU decomposition with partial pivoting.
///
/// Pivots whose magnitude is at most `pivot_tol` times the largest
/// matrix entry are treated as zero, making the matrix singular.
pub struct DenseLu {
  raw: na::LU<f64, na::Dyn, na::Dyn>,
}
impl DenseLu {
  pub fn new(galmat: GalMat, pivot_tol: f64) -> FemResult<Self> {
    if !galmat.is_square() {
      return Err(FemError::DimensionMismatch {
        what: "columns of galerkin matrix",
        expected: galmat.nrows(),
        found: galmat.ncols(),
      });
    }
    let scale = galmat.amax();
    let raw = na::LU::new(galmat);
    if let Some((row, pivot)) = first_degenerate_pivot(&raw, pivot_tol * scale) {
      tracing::warn!("degenerate pivot {pivot:e} in row {row} of LU decomposition");
      return Err(FemError::SingularSystem { row, pivot });
    }
    Ok(Self { raw })
  }

  /// Sign of the row permutation.
  pub fn sign(&self) -> f64 {
    self.raw.p().determinant::<f64>()
  }

  pub fn determinant(&self) -> f64 {
    self.raw.determinant()
  }

  pub fn solve(&self, rhs: &GalVec) -> FemResult<GalVec> {
    let ndofs = self.raw.u().nrows();
    if rhs.len() != ndofs {
      return Err(FemError::DimensionMismatch {
        what: "galerkin vector",
        expected: ndofs,
        found: rhs.len(),
      });
    }
    self.raw.solve(rhs).ok_or_else(|| {
      let (row, pivot) = first_degenerate_pivot(&self.raw, 0.0).unwrap_or((0, 0.0));
      FemError::SingularSystem { row, pivot }
    })
  }
}

fn first_degenerate_pivot(lu: &na::LU<f64, na::Dyn, na::Dyn>, threshold: f64) -> Option<(usize, f64)> {
  lu.u()
    .diagonal()
    .iter()
    .copied()
    .enumerate()
    .find(|(_, pivot)| pivot.abs() <= threshold)
}

#[cfg(test)]
mod test {
  use super::{DMatrixExt, DenseLu};
  use crate::error::FemError;

  use approx::assert_relative_eq;

  #[test]
  fn solves_with_pivoting() {
    // Zero in the top left corner requires a row swap.
    let mat = na::dmatrix![
      0.0, 2.0, 1.0;
      1.0, 1.0, 0.0;
      2.0, 0.0, 3.0;
    ];
    let x = na::dvector![1.0, -2.0, 0.5];
    let b = &mat * &x;

    let lu = DenseLu::new(mat.clone(), 1e-10).unwrap();
    assert_relative_eq!(lu.solve(&b).unwrap(), x, epsilon = 1e-12);
    assert_eq!(lu.sign().abs(), 1.0);
    assert_relative_eq!(lu.determinant(), mat.determinant(), epsilon = 1e-12);
  }

  #[test]
  fn rejects_singular_matrix() {
    // Neumann Laplacian, constants are in the kernel.
    let mat = na::dmatrix![
       1.0, -1.0,  0.0;
      -1.0,  2.0, -1.0;
       0.0, -1.0,  1.0;
    ];
    assert!(matches!(
      DenseLu::new(mat, 1e-10),
      Err(FemError::SingularSystem { row: 2, .. })
    ));
  }

  #[test]
  fn symmetry() {
    let sym = na::dmatrix![
      2.0, -1.0;
      -1.0, 2.0;
    ];
    let nonsym = na::dmatrix![
      2.0, -1.0;
      0.0, 2.0;
    ];
    assert!(sym.is_symmetric(0.0));
    assert!(!nonsym.is_symmetric(1e-3));
    assert!(!na::DMatrix::<f64>::zeros(2, 3).is_symmetric(1.0));
  }

  #[test]
  fn mismatching_shapes_are_rejected() {
    assert!(matches!(
      DenseLu::new(na::DMatrix::zeros(2, 3), 1e-10),
      Err(FemError::DimensionMismatch {
        expected: 2,
        found: 3,
        ..
      })
    ));

    let lu = DenseLu::new(na::DMatrix::identity(3, 3), 1e-10).unwrap();
    assert!(matches!(
      lu.solve(&na::DVector::zeros(2)),
      Err(FemError::DimensionMismatch {
        expected: 3,
        found: 2,
        ..
      })
    ));
  }

  #[test]
  fn empty_system() {
    let lu = DenseLu::new(na::DMatrix::zeros(0, 0), 1e-10).unwrap();
    assert_eq!(lu.solve(&na::DVector::zeros(0)).unwrap().len(), 0);
  }
}

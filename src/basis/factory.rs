use super::{BasisFunction, BasisSet, Hat, HatFunction, LeftHalfHat, RightHalfHat};
use crate::mesh::{Mesh, NodeIdx};

/// Which ends of the mesh carry a (homogeneous) Dirichlet condition.
///
/// A Dirichlet end is eliminated from the degrees of freedom,
/// a free end keeps a boundary half function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundaryFlags {
  pub dirichlet_left: bool,
  pub dirichlet_right: bool,
}
impl BoundaryFlags {
  pub const DIRICHLET: Self = Self::new(true, true);
  pub const FREE: Self = Self::new(false, false);

  pub const fn new(dirichlet_left: bool, dirichlet_right: bool) -> Self {
    Self {
      dirichlet_left,
      dirichlet_right,
    }
  }

  /// Number of basis functions a basis for `mesh` has with these flags.
  pub fn expected_ndofs(&self, mesh: &Mesh) -> usize {
    mesh.nnodes() - 2 + usize::from(!self.dirichlet_left) + usize::from(!self.dirichlet_right)
  }
}

/// A family of shapes a basis can be built from.
pub trait ShapeFamily {
  type Function: BasisFunction;

  /// Boundary function on the first cell.
  fn left_boundary(mesh: &Mesh) -> Self::Function;
  /// Function centered on the interior node `inode`.
  fn interior(inode: NodeIdx, mesh: &Mesh) -> Self::Function;
  /// Boundary function on the last cell.
  fn right_boundary(mesh: &Mesh) -> Self::Function;
}

/// Piecewise-linear hat functions.
pub struct HatFamily;
impl ShapeFamily for HatFamily {
  type Function = HatFunction;

  fn left_boundary(mesh: &Mesh) -> HatFunction {
    LeftHalfHat::new(0, mesh).into()
  }
  fn interior(inode: NodeIdx, mesh: &Mesh) -> HatFunction {
    Hat::new(inode, mesh).into()
  }
  fn right_boundary(mesh: &Mesh) -> HatFunction {
    RightHalfHat::new(mesh.nnodes() - 1, mesh).into()
  }
}

/// Builds the ordered basis of shape family `F` on `mesh`.
///
/// Left boundary function (unless Dirichlet), then one function per interior node,
/// then the right boundary function (unless Dirichlet).
pub fn build_basis<F: ShapeFamily>(mesh: &Mesh, flags: BoundaryFlags) -> BasisSet<F::Function> {
  let mut functions = Vec::with_capacity(flags.expected_ndofs(mesh));
  if !flags.dirichlet_left {
    functions.push(F::left_boundary(mesh));
  }
  functions.extend((1..mesh.nnodes() - 1).map(|inode| F::interior(inode, mesh)));
  if !flags.dirichlet_right {
    functions.push(F::right_boundary(mesh));
  }
  BasisSet::new(functions, flags)
}

pub fn hat_basis(mesh: &Mesh, dirichlet_left: bool, dirichlet_right: bool) -> BasisSet<HatFunction> {
  build_basis::<HatFamily>(mesh, BoundaryFlags::new(dirichlet_left, dirichlet_right))
}

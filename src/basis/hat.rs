//! Piecewise-linear hat functions and their boundary halves.
//!
//! Every variant only captures the node coordinates spanning its support.
//!
//! # Panics
//! The constructors index into the mesh and panic if the node `idx`
//! lacks the neighbours the variant needs.

use super::BasisFunction;
use crate::mesh::{Mesh, NodeIdx};

/// Decreasing half hat on the cell right of node `idx`.
///
/// $1$ at `x[idx]`, $0$ at `x[idx+1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeftHalfHat {
  left: f64,
  right: f64,
}
impl LeftHalfHat {
  pub fn new(idx: NodeIdx, mesh: &Mesh) -> Self {
    Self {
      left: mesh.node(idx),
      right: mesh.node(idx + 1),
    }
  }
}
impl BasisFunction for LeftHalfHat {
  fn domain(&self) -> (f64, f64) {
    (self.left, self.right)
  }
  fn shape_value(&self, x: f64) -> f64 {
    (self.right - x) / (self.right - self.left)
  }
  fn shape_deriv(&self, _x: f64) -> f64 {
    -1.0 / (self.right - self.left)
  }
}

/// Increasing half hat on the cell left of node `idx`.
///
/// $0$ at `x[idx-1]`, $1$ at `x[idx]`.
/// It sits on the last cell of the mesh, so its support is closed on the right
/// and it takes the value $1$ on the final node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RightHalfHat {
  left: f64,
  right: f64,
}
impl RightHalfHat {
  pub fn new(idx: NodeIdx, mesh: &Mesh) -> Self {
    Self {
      left: mesh.node(idx - 1),
      right: mesh.node(idx),
    }
  }
}
impl BasisFunction for RightHalfHat {
  fn domain(&self) -> (f64, f64) {
    (self.left, self.right)
  }
  fn shape_value(&self, x: f64) -> f64 {
    (x - self.left) / (self.right - self.left)
  }
  fn shape_deriv(&self, _x: f64) -> f64 {
    1.0 / (self.right - self.left)
  }
  fn within(&self, x: f64) -> bool {
    self.left <= x && x <= self.right
  }
}

/// Tent function centered on node `idx`.
///
/// Continuous at the center, the derivative jumps there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hat {
  lower: f64,
  mid: f64,
  upper: f64,
}
impl Hat {
  pub fn new(idx: NodeIdx, mesh: &Mesh) -> Self {
    Self {
      lower: mesh.node(idx - 1),
      mid: mesh.node(idx),
      upper: mesh.node(idx + 1),
    }
  }
}
impl BasisFunction for Hat {
  fn domain(&self) -> (f64, f64) {
    (self.lower, self.upper)
  }
  fn shape_value(&self, x: f64) -> f64 {
    if x < self.mid {
      (x - self.lower) / (self.mid - self.lower)
    } else {
      (self.upper - x) / (self.upper - self.mid)
    }
  }
  fn shape_deriv(&self, x: f64) -> f64 {
    if x < self.mid {
      1.0 / (self.mid - self.lower)
    } else {
      -1.0 / (self.upper - self.mid)
    }
  }
}

/// The closed set of piecewise-linear shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HatFunction {
  LeftHalf(LeftHalfHat),
  RightHalf(RightHalfHat),
  Full(Hat),
}

impl BasisFunction for HatFunction {
  fn domain(&self) -> (f64, f64) {
    match self {
      Self::LeftHalf(f) => f.domain(),
      Self::RightHalf(f) => f.domain(),
      Self::Full(f) => f.domain(),
    }
  }
  fn shape_value(&self, x: f64) -> f64 {
    match self {
      Self::LeftHalf(f) => f.shape_value(x),
      Self::RightHalf(f) => f.shape_value(x),
      Self::Full(f) => f.shape_value(x),
    }
  }
  fn shape_deriv(&self, x: f64) -> f64 {
    match self {
      Self::LeftHalf(f) => f.shape_deriv(x),
      Self::RightHalf(f) => f.shape_deriv(x),
      Self::Full(f) => f.shape_deriv(x),
    }
  }
  fn within(&self, x: f64) -> bool {
    match self {
      Self::LeftHalf(f) => f.within(x),
      Self::RightHalf(f) => f.within(x),
      Self::Full(f) => f.within(x),
    }
  }
}

impl From<LeftHalfHat> for HatFunction {
  fn from(f: LeftHalfHat) -> Self {
    Self::LeftHalf(f)
  }
}
impl From<RightHalfHat> for HatFunction {
  fn from(f: RightHalfHat) -> Self {
    Self::RightHalf(f)
  }
}
impl From<Hat> for HatFunction {
  fn from(f: Hat) -> Self {
    Self::Full(f)
  }
}

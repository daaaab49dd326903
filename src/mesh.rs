//! A one-dimensional mesh: a strictly increasing sequence of nodes
//! partitioning the interval $[a, b]$ into cells.

use crate::error::{FemError, FemResult};

use itertools::Itertools;

pub type NodeIdx = usize;
pub type CellIdx = usize;

/// Validated 1D mesh.
///
/// Always holds at least two finite, strictly increasing nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
  nodes: Vec<f64>,
}

impl Mesh {
  pub fn new(nodes: Vec<f64>) -> FemResult<Self> {
    if nodes.len() < 2 {
      return Err(FemError::InvalidMesh(format!(
        "mesh needs at least 2 nodes, got {}",
        nodes.len()
      )));
    }
    if let Some(inode) = nodes.iter().position(|x| !x.is_finite()) {
      return Err(FemError::InvalidMesh(format!(
        "node {inode} is not finite ({})",
        nodes[inode]
      )));
    }
    // Negated comparison, so that NaN would be caught as well.
    if let Some(icell) = nodes.iter().tuple_windows().position(|(a, b)| !(a < b)) {
      return Err(FemError::InvalidMesh(format!(
        "nodes not strictly increasing: x[{}] = {} >= x[{}] = {}",
        icell,
        nodes[icell],
        icell + 1,
        nodes[icell + 1]
      )));
    }
    Ok(Self { nodes })
  }

  /// Uniform mesh of $[a, b]$ with `ncells` cells.
  pub fn uniform(a: f64, b: f64, ncells: usize) -> FemResult<Self> {
    if ncells == 0 {
      return Err(FemError::InvalidMesh("uniform mesh needs at least 1 cell".into()));
    }
    let width = b - a;
    let nodes = (0..=ncells)
      .map(|i| a + width * i as f64 / ncells as f64)
      .collect();
    Self::new(nodes)
  }

  pub fn nodes(&self) -> &[f64] {
    &self.nodes
  }
  pub fn node(&self, inode: NodeIdx) -> f64 {
    self.nodes[inode]
  }
  pub fn nnodes(&self) -> usize {
    self.nodes.len()
  }
  pub fn ncells(&self) -> usize {
    self.nodes.len() - 1
  }
  pub fn first(&self) -> f64 {
    self.nodes[0]
  }
  pub fn last(&self) -> f64 {
    self.nodes[self.nodes.len() - 1]
  }
  pub fn range(&self) -> (f64, f64) {
    (self.first(), self.last())
  }

  /// Iterator over the cells as `(lo, hi)` pairs, left to right.
  pub fn cells(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
    self.nodes.iter().copied().tuple_windows()
  }

  /// The cells overlapping $(lo, hi)$ in a set of positive measure,
  /// clipped to $[lo, hi]$.
  pub fn cells_within(&self, lo: f64, hi: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
    self
      .cells()
      .filter(move |&(l, h)| l < hi && h > lo)
      .map(move |(l, h)| (l.max(lo), h.min(hi)))
  }

  pub fn max_cell_width(&self) -> f64 {
    self.cells().map(|(l, h)| h - l).fold(0.0, f64::max)
  }
}

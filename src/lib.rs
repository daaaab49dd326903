//! Galerkin finite elements for two-point boundary value problems
//! with piecewise-linear hat functions.

extern crate nalgebra as na;

pub mod assemble;
pub mod basis;
pub mod error;
pub mod linalg;
pub mod mesh;
pub mod operators;
pub mod problems;
pub mod quadrature;
pub mod solver;

pub use error::{FemError, FemResult};

pub type DofIdx = usize;

pub type GalMat = na::DMatrix<f64>;
pub type GalVec = na::DVector<f64>;

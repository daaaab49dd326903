//! Adaptive numerical integration on intervals.

/// A quadrature rule on the reference interval $[-1, 1]$.
pub struct QuadRule {
  nodes: &'static [f64],
  weights: &'static [f64],
}
impl QuadRule {
  pub fn npoints(&self) -> usize {
    self.nodes.len()
  }

  /// Applies the rule to `f` on $[a, b]$.
  pub fn apply<F>(&self, f: F, a: f64, b: f64) -> f64
  where
    F: Fn(f64) -> f64,
  {
    let center = 0.5 * (a + b);
    let half_width = 0.5 * (b - a);
    half_width
      * self
        .nodes
        .iter()
        .zip(self.weights.iter())
        .map(|(n, w)| w * f(center + half_width * n))
        .sum::<f64>()
  }
}

/// 15 point Kronrod extension of the 7 point Gauss rule.
///
/// The Gauss nodes are the odd positions of the Kronrod nodes.
#[rustfmt::skip]
pub const KRONROD15: QuadRule = QuadRule {
  nodes: &[
    -0.991455371120812639206854697526329, -0.949107912342758524526189684047851,
    -0.864864423359769072789712788640926, -0.741531185599394439863864773280788,
    -0.586087235467691130294144845693013, -0.405845151377397166906606412076961,
    -0.207784955007898467600689403773245,  0.000000000000000000000000000000000,
     0.207784955007898467600689403773245,  0.405845151377397166906606412076961,
     0.586087235467691130294144845693013,  0.741531185599394439863864773280788,
     0.864864423359769072789712788640926,  0.949107912342758524526189684047851,
     0.991455371120812639206854697526329,
  ],
  weights: &[
    0.022935322010529224963732008058970, 0.063092092629978553290700663189204,
    0.104790010322250183839876322541518, 0.140653259715525918745189590510238,
    0.169004726639267902826583426598550, 0.190350578064785409913256402421014,
    0.204432940075298892414161999234649, 0.209482141084727828012999174891714,
    0.204432940075298892414161999234649, 0.190350578064785409913256402421014,
    0.169004726639267902826583426598550, 0.140653259715525918745189590510238,
    0.104790010322250183839876322541518, 0.063092092629978553290700663189204,
    0.022935322010529224963732008058970,
  ],
};

#[rustfmt::skip]
pub const GAUSS7: QuadRule = QuadRule {
  nodes: &[
    -0.949107912342758524526189684047851, -0.741531185599394439863864773280788,
    -0.405845151377397166906606412076961,  0.000000000000000000000000000000000,
     0.405845151377397166906606412076961,  0.741531185599394439863864773280788,
     0.949107912342758524526189684047851,
  ],
  weights: &[
    0.129484966168869693270611432679082, 0.279705391489276667901467771423780,
    0.381830050505118944950369775488975, 0.417959183673469387755102040816327,
    0.381830050505118944950369775488975, 0.279705391489276667901467771423780,
    0.129484966168869693270611432679082,
  ],
};

#[derive(Debug, Clone, PartialEq)]
pub struct QuadConfig {
  pub abs_tol: f64,
  pub rel_tol: f64,
  /// Maximal number of subintervals the integration range is split into.
  pub max_subintervals: usize,
}
impl Default for QuadConfig {
  fn default() -> Self {
    Self {
      abs_tol: 1e-3,
      rel_tol: 1e-3,
      max_subintervals: 100,
    }
  }
}
impl QuadConfig {
  pub fn with_abs_tol(mut self, abs_tol: f64) -> Self {
    self.abs_tol = abs_tol;
    self
  }
  pub fn with_rel_tol(mut self, rel_tol: f64) -> Self {
    self.rel_tol = rel_tol;
    self
  }
  pub fn with_max_subintervals(mut self, max_subintervals: usize) -> Self {
    self.max_subintervals = max_subintervals;
    self
  }

  pub fn tolerance(&self, value: f64) -> f64 {
    self.abs_tol.max(self.rel_tol * value.abs())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadStatus {
  Converged,
  /// The subinterval budget was used up before reaching the tolerance.
  SubintervalLimit,
  /// Subintervals became too small to be bisected in floating point.
  RoundoffLimit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadResult {
  pub value: f64,
  pub error_estimate: f64,
  pub nsubintervals: usize,
  pub status: QuadStatus,
}
impl QuadResult {
  pub fn converged(&self) -> bool {
    self.status == QuadStatus::Converged
  }
}

/// Integration engine used for assembling Galerkin entries.
pub trait Integrator {
  fn integrate<F>(&self, f: F, a: f64, b: f64) -> QuadResult
  where
    F: Fn(f64) -> f64;
}

/// Globally adaptive Gauss-Kronrod (G7-K15) integration.
///
/// Repeatedly bisects the subinterval with the largest error estimate
/// until the summed estimate is within tolerance or the budget is exhausted.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveGaussKronrod {
  config: QuadConfig,
}
impl AdaptiveGaussKronrod {
  pub fn new(config: QuadConfig) -> Self {
    Self { config }
  }
  pub fn config(&self) -> &QuadConfig {
    &self.config
  }
}

#[derive(Debug, Clone, Copy)]
struct Subinterval {
  a: f64,
  b: f64,
  value: f64,
  error: f64,
}
impl Subinterval {
  fn new<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> Self {
    let kronrod = KRONROD15.apply(f, a, b);
    let gauss = GAUSS7.apply(f, a, b);
    Self {
      a,
      b,
      value: kronrod,
      error: (kronrod - gauss).abs(),
    }
  }
}

impl Integrator for AdaptiveGaussKronrod {
  fn integrate<F>(&self, f: F, a: f64, b: f64) -> QuadResult
  where
    F: Fn(f64) -> f64,
  {
    if a == b {
      return QuadResult {
        value: 0.0,
        error_estimate: 0.0,
        nsubintervals: 0,
        status: QuadStatus::Converged,
      };
    }

    let mut intervals = vec![Subinterval::new(&f, a, b)];
    let mut value = intervals[0].value;
    let mut error = intervals[0].error;

    let status = loop {
      if error <= self.config.tolerance(value) {
        break QuadStatus::Converged;
      }
      if intervals.len() >= self.config.max_subintervals {
        break QuadStatus::SubintervalLimit;
      }

      let iworst = intervals
        .iter()
        .enumerate()
        .max_by(|(_, i0), (_, i1)| i0.error.total_cmp(&i1.error))
        .map(|(i, _)| i)
        .unwrap_or(0);
      let worst = intervals[iworst];
      let mid = 0.5 * (worst.a + worst.b);
      if mid <= worst.a || mid >= worst.b {
        break QuadStatus::RoundoffLimit;
      }

      let lower = Subinterval::new(&f, worst.a, mid);
      let upper = Subinterval::new(&f, mid, worst.b);
      value += lower.value + upper.value - worst.value;
      error += lower.error + upper.error - worst.error;

      intervals[iworst] = lower;
      intervals.push(upper);
    };

    // Recompute the sums, the running updates accumulate cancellation error.
    let value = intervals.iter().map(|i| i.value).sum();
    let error_estimate = intervals.iter().map(|i| i.error).sum();

    QuadResult {
      value,
      error_estimate,
      nsubintervals: intervals.len(),
      status,
    }
  }
}

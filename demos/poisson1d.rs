use galerkin1d::{
  basis::hat_basis, mesh::Mesh, operators::LaplaceForm, solver::GalerkinSolver, FemResult,
};

use std::f64::consts::PI;

fn main() -> FemResult<()> {
  tracing_subscriber::fmt::init();

  // $-u'' = sin(pi x)$ on $[0, 1]$ with $u(0) = u(1) = 0$.
  let load = |x: f64| (PI * x).sin();
  let exact_sol = |x: f64| (PI * x).sin() / (PI * PI);

  let solver = GalerkinSolver::default();

  let mesh = Mesh::new(vec![0.0, 0.25, 0.5, 0.75, 1.0])?;
  let basis = hat_basis(&mesh, true, true);
  let galsol = solver.solve(&mesh, &basis, &load, &LaplaceForm)?;

  println!("{:>6} {:>12} {:>12} {:>10}", "x", "galerkin", "exact", "error");
  for k in 0..=20 {
    let x = k as f64 / 20.0;
    let approx = basis.expand(&galsol, x)?;
    let exact = exact_sol(x);
    println!("{x:>6.2} {approx:>12.6} {exact:>12.6} {:>10.2e}", (approx - exact).abs());
  }

  println!();
  println!("{:>6} {:>12} {:>8}", "ncells", "max error", "rate");
  let mut prev_error: Option<f64> = None;
  for ncells in [4, 8, 16, 32, 64, 128] {
    let mesh = Mesh::uniform(0.0, 1.0, ncells)?;
    let basis = hat_basis(&mesh, true, true);
    let galsol = solver.solve(&mesh, &basis, &load, &LaplaceForm)?;

    let mut error: f64 = 0.0;
    for k in 0..=1000 {
      let x = k as f64 / 1000.0;
      error = error.max((basis.expand(&galsol, x)? - exact_sol(x)).abs());
    }
    let rate = prev_error.map(|prev| (prev / error).log2());
    match rate {
      Some(rate) => println!("{ncells:>6} {error:>12.4e} {rate:>8.2}"),
      None => println!("{ncells:>6} {error:>12.4e} {:>8}", "-"),
    }
    prev_error = Some(error);
  }

  Ok(())
}

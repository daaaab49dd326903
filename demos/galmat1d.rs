use galerkin1d::{
  basis::hat_basis,
  mesh::Mesh,
  operators::{LaplaceForm, MassForm},
  solver::GalerkinSolver,
  FemResult,
};

fn main() -> FemResult<()> {
  tracing_subscriber::fmt::init();

  // Unit cells, so the entries come out as integers (times 1/6 for the mass).
  let mesh = Mesh::uniform(0.0, 3.0, 3)?;
  println!("{:?}", mesh.cells().collect::<Vec<_>>());

  let solver = GalerkinSolver::default();
  for (left, right) in [(false, false), (true, true)] {
    let basis = hat_basis(&mesh, left, right);
    let laplace = solver.assemble_galmat(&mesh, &basis, &LaplaceForm)?;
    let mass = solver.assemble_galmat(&mesh, &basis, &MassForm)?;
    println!("dirichlet left: {left}, right: {right}");
    println!("laplace galmat:{laplace:.3}");
    println!("mass galmat:{mass:.3}");
  }
  Ok(())
}

#![allow(non_snake_case)]

use krylov::algebra::*;
use krylov::solver::*;

fn problem_data() -> (CsrMatrix<f64>, Vec<f64>) {
    // 1-d Laplacian, tridiagonal with [-1 2 -1]
    let n = 10;
    let mut A = DokMatrix::new(n, n);
    for i in 0..n {
        A.set(i, i, 2.).unwrap();
        if i > 0 {
            A.set(i, i - 1, -1.).unwrap();
        }
        if i + 1 < n {
            A.set(i, i + 1, -1.).unwrap();
        }
    }

    let b = vec![1.; n];

    (CsrMatrix::from(&A), b)
}

fn main() {
    let (A, b) = problem_data();

    let settings = SolverSettingsBuilder::default()
        .tolerance(1e-10)
        .verbose(true)
        .build()
        .unwrap();

    let mut solver = IterativeSolver::new(settings).unwrap();
    let mut method = ConjugateGradient::new();

    let result = solver.solve(&A, &b, None, &mut method).unwrap();

    println!("x = {:?}", result.x);
}

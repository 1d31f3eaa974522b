#![allow(non_snake_case)]

// Solves A*x = b for a matrix read from a Matrix Market file, with the
// right hand side chosen so that the solution is a vector of ones.
//
//   cargo run --example solve_mtx -- matrix.mtx[.gz] [cg|bicg]

use krylov::algebra::*;
use krylov::io::read_matrix_market_file;
use krylov::solver::*;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: solve_mtx <file.mtx | file.mtx.gz> [cg|bicg]");
        return ExitCode::FAILURE;
    };
    let mut method: KrylovMethod<f64> = match args.next().unwrap_or("cg".into()).parse() {
        Ok(method) => method,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let A: CsrMatrix<f64> = match read_matrix_market_file(&path) {
        Ok(dok) => dok.into(),
        Err(e) => {
            eprintln!("{path}: {e}");
            return ExitCode::FAILURE;
        }
    };
    if !A.is_square() {
        eprintln!("{path}: matrix is {}x{}, not square", A.m, A.n);
        return ExitCode::FAILURE;
    }

    let ones = vec![1.; A.n];
    let mut b = vec![0.; A.m];
    mul_mat_vec(&mut b, 1., MatrixShape::N, &A, &ones, 0.).unwrap();

    let settings = SolverSettingsBuilder::default()
        .verbose(true)
        .build()
        .unwrap();

    match solve(&A, &b, None, Some(settings), &mut method) {
        Ok(result) => {
            let k = result.x.len().min(10);
            println!("x[0..{k}] = {:?}", &result.x[..k]);
            println!("error = {:e}", result.x.norm_inf_diff(&ones));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("solve failed: {e}");
            ExitCode::FAILURE
        }
    }
}

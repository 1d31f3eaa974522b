#![allow(non_snake_case)]

use krylov::{algebra::*, io::ConfigurablePrintTarget, solver::*};

fn test_print_solver() -> (IterativeSolver<f64>, CsrMatrix<f64>, Vec<f64>) {
    let mut dok = DokMatrix::new(2, 2);
    dok.set(0, 0, 4.).unwrap();
    dok.set(0, 1, 1.).unwrap();
    dok.set(1, 0, 1.).unwrap();
    dok.set(1, 1, 3.).unwrap();
    let A = CsrMatrix::from(&dok);
    let b = vec![1., 2.];

    let settings = SolverSettingsBuilder::default()
        .verbose(true)
        .build()
        .unwrap();
    (IterativeSolver::new(settings).unwrap(), A, b)
}

fn run(solver: &mut IterativeSolver<f64>, A: &CsrMatrix<f64>, b: &[f64]) {
    let result = solver
        .solve(A, b, None, &mut ConjugateGradient::new())
        .unwrap();
    assert_eq!(result.status, SolverStatus::Solved);
}

#[test]
fn test_print_to_stdout() {
    let (mut solver, A, b) = test_print_solver();
    solver.print_to_stdout();
    run(&mut solver, &A, &b);
}

#[test]
fn test_print_to_buffer() {
    let (mut solver, A, b) = test_print_solver();
    solver.print_to_buffer();
    run(&mut solver, &A, &b);
    let result = solver.get_print_buffer().unwrap();
    assert!(result.contains("krylov v"));
    assert!(result.contains("method        = cg"));
    assert!(result.contains("Terminated with status = Solved"));
    assert!(result.contains("matvec : "));

    // header, then one line per convergence check
    let checks = result
        .lines()
        .skip_while(|l| !l.starts_with(" iter"))
        .skip(2)
        .take_while(|l| !l.starts_with("---"))
        .count();
    assert_eq!(checks, 2);
}

#[test]
fn test_print_quiet() {
    let (mut solver, A, b) = test_print_solver();
    solver.settings.verbose = false;
    solver.print_to_buffer();
    run(&mut solver, &A, &b);
    assert!(solver.get_print_buffer().unwrap().is_empty());
}

#[test]
fn test_print_to_file() {
    use std::io::{Read, Seek};

    let (mut solver, A, b) = test_print_solver();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    solver.print_to_file(file.into_file());
    run(&mut solver, &A, &b);

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("krylov v"));
}

#[test]
fn test_print_to_stream() {
    use std::io::{Read, Seek};

    let (mut solver, A, b) = test_print_solver();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    let stream = Box::new(file.into_file());

    solver.print_to_stream(stream);
    run(&mut solver, &A, &b);

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("krylov v"));
}

#[test]
fn test_print_to_sink() {
    let (mut solver, A, b) = test_print_solver();
    solver.print_to_sink();
    run(&mut solver, &A, &b);
    // no output
    assert!(solver.get_print_buffer().is_err());
}

#![allow(non_snake_case)]

use crate::algebra::*;

fn dok_from(m: usize, n: usize, entries: &[(usize, usize, f64)]) -> DokMatrix<f64> {
    let mut A = DokMatrix::new(m, n);
    for &(i, j, v) in entries {
        A.set(i, j, v).unwrap();
    }
    A
}

fn test_matrix_2x2() -> DokMatrix<f64> {
    // A = [0. 1.]
    //     [2. 0.]
    dok_from(2, 2, &[(0, 1, 1.), (1, 0, 2.)])
}

fn test_matrix_3x3() -> DokMatrix<f64> {
    // A = [0.  1.  0.]
    //     [2.  0. -4.]
    //     [0.  0.  3.]
    dok_from(3, 3, &[(0, 1, 1.), (1, 0, 2.), (1, 2, -4.), (2, 2, 3.)])
}

fn test_matrix_3x5() -> DokMatrix<f64> {
    // A = [0.  1.  0.  0.  2.]
    //     [2.  0. -4.  0.  0.]
    //     [0.  0.  3.  1. -9.]
    dok_from(
        3,
        5,
        &[
            (0, 1, 1.),
            (0, 4, 2.),
            (1, 0, 2.),
            (1, 2, -4.),
            (2, 2, 3.),
            (2, 3, 1.),
            (2, 4, -9.),
        ],
    )
}

// checks a product against both representations and the
// enum wrapper
fn check_gemv(
    A: &DokMatrix<f64>,
    shape: MatrixShape,
    alpha: f64,
    x: &[f64],
    beta: f64,
    y0: &[f64],
    expected: &[f64],
) {
    let csr = CsrMatrix::from(A);
    let any: AnySparseMatrix<f64> = csr.clone().into();

    let mut y = y0.to_vec();
    mul_mat_vec(&mut y, alpha, shape, A, x, beta).unwrap();
    assert_eq!(y, expected);

    let mut y = y0.to_vec();
    mul_mat_vec(&mut y, alpha, shape, &csr, x, beta).unwrap();
    assert_eq!(y, expected);

    let mut y = y0.to_vec();
    mul_mat_vec(&mut y, alpha, shape, &any, x, beta).unwrap();
    assert_eq!(y, expected);
}

#[test]
fn test_gemv_2x2() {
    let A = test_matrix_2x2();
    let x = [1., 1.];
    check_gemv(&A, MatrixShape::N, 1., &x, 0., &[0.; 2], &[1., 2.]);
    check_gemv(&A, MatrixShape::T, 1., &x, 0., &[0.; 2], &[2., 1.]);
}

#[test]
fn test_gemv_3x3() {
    let A = test_matrix_3x3();
    let x = [1., 2., 3.];
    check_gemv(&A, MatrixShape::N, 1., &x, 0., &[0.; 3], &[2., -10., 9.]);
    check_gemv(&A, MatrixShape::T, 1., &x, 0., &[0.; 3], &[4., 1., 1.]);
    check_gemv(&A, MatrixShape::T, 2., &x, 0., &[0.; 3], &[8., 2., 2.]);
}

#[test]
fn test_gemv_3x5() {
    let A = test_matrix_3x5();

    let x = [1., 2., 3., 4., 5.];
    check_gemv(&A, MatrixShape::N, 1., &x, 0., &[0.; 3], &[12., -10., -32.]);

    let x = [1., 2., 3.];
    check_gemv(&A, MatrixShape::T, 1., &x, 0., &[0.; 5], &[4., 1., 1., 3., -25.]);
    check_gemv(&A, MatrixShape::T, 2., &x, 0., &[0.; 5], &[8., 2., 2., 6., -50.]);
}

#[test]
fn test_gemv_beta() {
    let A = test_matrix_3x3();
    let x = [1., 2., 3.];

    // y = 2*A*x - y
    check_gemv(&A, MatrixShape::N, 2., &x, -1., &[1., 1., 1.], &[3., -21., 17.]);
    // y = A*x + 3y
    check_gemv(&A, MatrixShape::N, 1., &x, 3., &[1., 1., 1.], &[5., -7., 12.]);
    // y = 0*A*x + 0.5y
    check_gemv(&A, MatrixShape::N, 0., &x, 0.5, &[2., 4., 6.], &[1., 2., 3.]);
}

#[test]
fn test_gemv_beta_zero_ignores_y() {
    let A = test_matrix_3x3();
    let x = [1., 2., 3.];
    let y0 = [f64::NAN, f64::INFINITY, f64::NAN];

    check_gemv(&A, MatrixShape::N, 1., &x, 0., &y0, &[2., -10., 9.]);
    check_gemv(&A, MatrixShape::T, 1., &x, 0., &y0, &[4., 1., 1.]);
    check_gemv(&A, MatrixShape::N, 0., &x, 0., &y0, &[0., 0., 0.]);
}

#[test]
fn test_gemv_dimension_checks() {
    let A = CsrMatrix::from(&test_matrix_3x5());

    // N : x must have ncols entries, y nrows
    let mut y = vec![0.; 3];
    let err = mul_mat_vec(&mut y, 1., MatrixShape::N, &A, &[1., 2., 3.], 0.);
    assert_eq!(
        err,
        Err(MatrixError::DimensionMismatch {
            what: "matrix-vector product input",
            expected: 5,
            found: 3
        })
    );

    let mut y = vec![0.; 5];
    assert!(mul_mat_vec(&mut y, 1., MatrixShape::N, &A, &[1.; 5], 0.).is_err());

    // T : the other way around
    let mut y = vec![0.; 5];
    assert!(mul_mat_vec(&mut y, 1., MatrixShape::T, &A, &[1.; 5], 0.).is_err());
    let mut y = vec![0.; 3];
    assert!(mul_mat_vec(&mut y, 1., MatrixShape::T, &A, &[1.; 3], 0.).is_err());

    // failed calls leave y alone
    let mut y = vec![7.; 3];
    assert!(mul_mat_vec(&mut y, 1., MatrixShape::T, &A, &[1.; 3], 0.).is_err());
    assert_eq!(y, vec![7.; 3]);
}

#[test]
fn test_dok_csr_agree() {
    let dok = test_matrix_3x5();
    let csr = CsrMatrix::from(&dok);

    assert_eq!(csr.size(), dok.size());
    assert_eq!(csr.nnz(), dok.nnz());
    assert!(!csr.is_square());

    for i in 0..dok.m {
        for j in 0..dok.n {
            assert_eq!(csr.at(i, j).unwrap(), dok.at(i, j).unwrap());
        }
    }
    assert!(csr.at(3, 0).is_err());
    assert!(csr.at(0, 5).is_err());
}

#[test]
fn test_csr_from_accumulated_dok() {
    // repeated additions collapse into a single entry
    let mut dok = DokMatrix::<f64>::new(2, 2);
    dok.add(0, 0, 1.).unwrap();
    dok.add(0, 0, 2.).unwrap();
    dok.add(1, 1, 4.).unwrap();

    let csr = CsrMatrix::from(dok);
    assert!(csr.check_format().is_ok());
    assert_eq!(csr.nnz(), 2);
    assert_eq!(csr.at(0, 0).unwrap(), 3.);
    assert_eq!(csr.at(1, 1).unwrap(), 4.);
}

#[test]
fn test_empty_rows_and_identity() {
    let A = CsrMatrix::<f64>::zeros(3, 2);
    let mut y = vec![1.; 3];
    mul_mat_vec(&mut y, 1., MatrixShape::N, &A, &[1., 1.], 0.).unwrap();
    assert_eq!(y, vec![0.; 3]);

    let I = CsrMatrix::<f64>::identity(3);
    let mut y = vec![0.; 3];
    mul_mat_vec(&mut y, 1., MatrixShape::T, &I, &[4., 5., 6.], 0.).unwrap();
    assert_eq!(y, vec![4., 5., 6.]);
}

#[test]
fn test_gemv_nonfinite_entries() {
    // a zero in x still multiplies every stored entry
    let dok = dok_from(2, 2, &[(0, 0, f64::INFINITY), (1, 1, 1.)]);
    let csr = CsrMatrix::from(&dok);
    let x = [0., 1.];

    for shape in [MatrixShape::N, MatrixShape::T] {
        let mut ycsr = vec![0.; 2];
        let mut ydok = vec![0.; 2];
        mul_mat_vec(&mut ycsr, 1., shape, &csr, &x, 0.).unwrap();
        mul_mat_vec(&mut ydok, 1., shape, &dok, &x, 0.).unwrap();

        assert!(ycsr[0].is_nan() && ydok[0].is_nan());
        assert_eq!(ycsr[1], 1.);
        assert_eq!(ydok[1], 1.);
    }
}

#![allow(non_snake_case)]

use krylov::{algebra::*, io::*, solver::*};
use std::io::{Cursor, Write};

const SYMMETRIC: &str = "%%MatrixMarket matrix coordinate real symmetric
% a 3x3 symmetric positive definite matrix
%
3 3 5
1 1 4.0
2 1 -1.0
2 2 4.0
3 2 -1.0
3 3 4.0
";

fn read(text: &str) -> Result<DokMatrix<f64>, MatrixMarketError> {
    read_matrix_market(Cursor::new(text))
}

#[test]
fn test_read_symmetric() {
    let A = read(SYMMETRIC).unwrap();
    assert_eq!(A.size(), (3, 3));
    assert_eq!(A.nnz(), 7);
    assert_eq!(A.at(0, 1).unwrap(), -1.);
    assert_eq!(A.at(1, 0).unwrap(), -1.);
    assert_eq!(A.at(1, 2).unwrap(), -1.);
    assert_eq!(A.at(2, 1).unwrap(), -1.);
    assert_eq!(A.at(0, 2).unwrap(), 0.);
    assert_eq!(A.at(2, 2).unwrap(), 4.);
}

#[test]
fn test_read_general() {
    let text = "%%MatrixMarket matrix coordinate real general
2 3 3

1 3 1.5e0
2 1 -2
2 2 7
";
    let A = read(text).unwrap();
    assert_eq!(A.size(), (2, 3));
    assert_eq!(A.nnz(), 3);
    assert_eq!(A.at(0, 2).unwrap(), 1.5);
    assert_eq!(A.at(1, 0).unwrap(), -2.);
    // no mirroring for general matrices
    assert!(!A.contains(0, 1));
}

#[test]
fn test_read_errors() {
    assert!(matches!(
        read("%%NotMatrixMarket matrix coordinate real general\n1 1 0\n"),
        Err(MatrixMarketError::BadHeader(_))
    ));
    assert!(matches!(read(""), Err(MatrixMarketError::BadHeader(_))));
    assert!(matches!(
        read("%%MatrixMarket matrix array real general\n1 1\n1.0\n"),
        Err(MatrixMarketError::Unsupported(_))
    ));
    assert!(matches!(
        read("%%MatrixMarket matrix coordinate complex general\n1 1 0\n"),
        Err(MatrixMarketError::Unsupported(_))
    ));
    assert!(matches!(
        read("%%MatrixMarket matrix coordinate real skew-symmetric\n1 1 0\n"),
        Err(MatrixMarketError::Unsupported(_))
    ));
    assert!(matches!(
        read("%%MatrixMarket matrix coordinate real symmetric\n2 3 0\n"),
        Err(MatrixMarketError::Unsupported(_))
    ));

    // entry count disagrees with the size line
    assert!(matches!(
        read("%%MatrixMarket matrix coordinate real general\n2 2 3\n1 1 1.0\n2 2 1.0\n"),
        Err(MatrixMarketError::CountMismatch {
            expected: 3,
            found: 2
        })
    ));

    // out of range and malformed entries
    assert!(matches!(
        read("%%MatrixMarket matrix coordinate real general\n2 2 1\n3 1 1.0\n"),
        Err(MatrixMarketError::Matrix(MatrixError::IndexOutOfRange { .. }))
    ));
    assert!(matches!(
        read("%%MatrixMarket matrix coordinate real general\n2 2 1\n0 1 1.0\n"),
        Err(MatrixMarketError::Parse { line: 3, .. })
    ));
    assert!(matches!(
        read("%%MatrixMarket matrix coordinate real general\n2 2 1\n1 1 x\n"),
        Err(MatrixMarketError::Parse { line: 3, .. })
    ));
    assert!(matches!(
        read("%%MatrixMarket matrix coordinate real general\n2 2\n"),
        Err(MatrixMarketError::Parse { line: 2, .. })
    ));
    assert!(matches!(
        read("%%MatrixMarket matrix coordinate real general\n% only comments\n"),
        Err(MatrixMarketError::Parse { .. })
    ));
}

#[test]
fn test_read_file_and_solve() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SYMMETRIC.as_bytes()).unwrap();
    file.flush().unwrap();

    let dok: DokMatrix<f64> = read_matrix_market_file(file.path()).unwrap();
    let A = CsrMatrix::from(&dok);

    // right hand side for the solution [1 1 ... 1]
    let ones = vec![1.; A.m];
    let mut b = vec![0.; A.m];
    mul_mat_vec(&mut b, 1., MatrixShape::N, &A, &ones, 0.).unwrap();

    let mut method = ConjugateGradient::new();
    let result = solve(&A, &b, None, None, &mut method).unwrap();
    assert_eq!(result.status, SolverStatus::Solved);
    assert!(result.x.norm_inf_diff(&ones) < 1e-5);

    assert!(matches!(
        read_matrix_market_file::<f64, _>(file.path().with_extension("missing")),
        Err(MatrixMarketError::Io(_))
    ));
}

#[test]
fn test_read_gzip_file() {
    use flate2::{write::GzEncoder, Compression};

    let file = tempfile::Builder::new()
        .suffix(".mtx.gz")
        .tempfile()
        .unwrap();
    let mut encoder = GzEncoder::new(file.reopen().unwrap(), Compression::default());
    encoder.write_all(SYMMETRIC.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let A: DokMatrix<f64> = read_matrix_market_file(file.path()).unwrap();
    assert_eq!(A, read(SYMMETRIC).unwrap());

    // compressed data without the extension is read as text
    let plain = file.path().with_extension("");
    std::fs::copy(file.path(), &plain).unwrap();
    let err = read_matrix_market_file::<f64, _>(&plain);
    std::fs::remove_file(&plain).unwrap();
    assert!(err.is_err());
}

#![allow(non_snake_case)]

use crate::algebra::{DokMatrix, FloatT, MatrixError};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Error type returned when reading Matrix Market data
#[derive(Error, Debug)]
pub enum MatrixMarketError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The first line is not a Matrix Market banner
    #[error("bad Matrix Market header: \"{0}\"")]
    BadHeader(String),
    /// A valid banner for a format that is not read
    #[error("unsupported Matrix Market format: {0}")]
    Unsupported(String),
    /// A size or entry line could not be parsed
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    /// Number of entry lines differs from the size line
    #[error("expected {expected} entries, found {found}")]
    CountMismatch { expected: usize, found: usize },
    /// An entry lies outside the declared dimensions
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum Symmetry {
    General,
    Symmetric,
}

/// Reads a sparse matrix in Matrix Market coordinate format.
///
/// Real (or integer) `general` and `symmetric` matrices are supported.
/// Only the lower or upper triangle of a symmetric matrix is stored in
/// the file, and every off-diagonal entry read is also placed at its
/// mirrored position.  Symmetric matrices must be square.
///
/// ```text
/// %%MatrixMarket matrix coordinate real symmetric
/// % comment
/// 3 3 4
/// 1 1 4.0
/// 2 1 -1.0
/// 2 2 4.0
/// 3 3 2.0
/// ```
pub fn read_matrix_market<T, R>(reader: R) -> Result<DokMatrix<T>, MatrixMarketError>
where
    T: FloatT,
    R: BufRead,
{
    let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));

    let symmetry = match lines.next() {
        Some((_, line)) => parse_header(&line?)?,
        None => return Err(MatrixMarketError::BadHeader(String::new())),
    };

    // skip comments and blank lines up to the size line
    let mut size = None;
    for (lineno, line) in lines.by_ref() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        size = Some(parse_size(lineno, line)?);
        break;
    }
    let Some((rows, cols, nnz)) = size else {
        return Err(MatrixMarketError::Parse {
            line: 0,
            reason: "missing size line".to_string(),
        });
    };

    if symmetry == Symmetry::Symmetric && rows != cols {
        return Err(MatrixMarketError::Unsupported(format!(
            "symmetric matrix of size {rows}x{cols}"
        )));
    }

    let mut A = DokMatrix::new(rows, cols);
    let mut count = 0;

    for (lineno, line) in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        let (i, j, v) = parse_entry::<T>(lineno, line)?;

        A.set(i, j, v)?;
        if symmetry == Symmetry::Symmetric && i != j {
            A.set(j, i, v)?;
        }
        count += 1;
    }

    if count != nnz {
        return Err(MatrixMarketError::CountMismatch {
            expected: nnz,
            found: count,
        });
    }

    Ok(A)
}

/// Reads a Matrix Market file from disk.  See [`read_matrix_market`].
///
/// Files with a `.gz` extension, e.g. `matrix.mtx.gz`, are decompressed
/// while reading.
pub fn read_matrix_market_file<T, P>(path: P) -> Result<DokMatrix<T>, MatrixMarketError>
where
    T: FloatT,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        read_matrix_market(BufReader::new(GzDecoder::new(file)))
    } else {
        read_matrix_market(BufReader::new(file))
    }
}

fn parse_header(line: &str) -> Result<Symmetry, MatrixMarketError> {
    let tokens: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
    if tokens.len() != 5 || tokens[0] != "%%matrixmarket" {
        return Err(MatrixMarketError::BadHeader(line.to_string()));
    }

    let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
    if tokens[1] != "matrix" {
        return Err(MatrixMarketError::Unsupported(format!("object \"{}\"", tokens[1])));
    }
    if tokens[2] != "coordinate" {
        return Err(MatrixMarketError::Unsupported(format!("format \"{}\"", tokens[2])));
    }
    match tokens[3] {
        "real" | "integer" => {}
        field => {
            return Err(MatrixMarketError::Unsupported(format!("field \"{field}\"")));
        }
    }
    match tokens[4] {
        "general" => Ok(Symmetry::General),
        "symmetric" => Ok(Symmetry::Symmetric),
        symmetry => Err(MatrixMarketError::Unsupported(format!(
            "symmetry \"{symmetry}\""
        ))),
    }
}

fn parse_size(lineno: usize, line: &str) -> Result<(usize, usize, usize), MatrixMarketError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(MatrixMarketError::Parse {
            line: lineno,
            reason: "size line must be \"rows cols entries\"".to_string(),
        });
    }
    let rows = parse_field::<usize>(lineno, fields[0])?;
    let cols = parse_field::<usize>(lineno, fields[1])?;
    let nnz = parse_field::<usize>(lineno, fields[2])?;
    Ok((rows, cols, nnz))
}

// one-based indices in the file, zero-based in the matrix
fn parse_entry<T: FloatT>(lineno: usize, line: &str) -> Result<(usize, usize, T), MatrixMarketError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(MatrixMarketError::Parse {
            line: lineno,
            reason: "entry line must be \"row col value\"".to_string(),
        });
    }
    let i = parse_field::<usize>(lineno, fields[0])?;
    let j = parse_field::<usize>(lineno, fields[1])?;
    let v = parse_field::<f64>(lineno, fields[2])?;

    if i == 0 || j == 0 {
        return Err(MatrixMarketError::Parse {
            line: lineno,
            reason: "indices are one-based".to_string(),
        });
    }
    let v = T::from_f64(v).ok_or_else(|| MatrixMarketError::Parse {
        line: lineno,
        reason: format!("value {v} not representable"),
    })?;

    Ok((i - 1, j - 1, v))
}

fn parse_field<F>(lineno: usize, field: &str) -> Result<F, MatrixMarketError>
where
    F: std::str::FromStr,
    F::Err: std::fmt::Display,
{
    field.parse::<F>().map_err(|e| MatrixMarketError::Parse {
        line: lineno,
        reason: format!("\"{field}\": {e}"),
    })
}

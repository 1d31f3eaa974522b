#![allow(non_snake_case)]

use crate::algebra::*;
use crate::solver::core::traits::Method;
use crate::solver::{solve, SolveResult, SolverError, SolverSettings};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

/// A linear system `A*x = b` together with an optional initial guess
/// and the settings to solve it with.
///
/// Systems can be saved to and loaded from JSON files so that a
/// problematic solve can be reproduced elsewhere.

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
pub struct LinearSystem<T: FloatT> {
    pub A: CsrMatrix<T>,
    pub b: Vec<T>,
    #[serde(default)]
    pub x0: Option<Vec<T>>,
    #[serde(default)]
    pub settings: SolverSettings<T>,
}

impl<T> LinearSystem<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    pub fn new(A: CsrMatrix<T>, b: Vec<T>) -> Self {
        Self {
            A,
            b,
            x0: None,
            settings: SolverSettings::default(),
        }
    }

    /// Solves the system with `method`.
    pub fn solve<K>(&self, method: &mut K) -> Result<SolveResult<T>, SolverError>
    where
        K: Method<T> + ?Sized,
    {
        solve(
            &self.A,
            &self.b,
            self.x0.as_deref(),
            Some(self.settings.clone()),
            method,
        )
    }

    pub fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json = serde_json::to_string(self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Reads a system written by [`write_to_file`](LinearSystem::write_to_file).
    ///
    /// The matrix and the settings are checked, and malformed data is
    /// reported as [`io::ErrorKind::InvalidData`].
    pub fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let system: LinearSystem<T> = serde_json::from_str(&buffer)?;

        system
            .A
            .check_format()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        system
            .settings
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(system)
    }
}

#[test]
fn test_json_io() {
    use crate::solver::{ConjugateGradient, SolverStatus};
    use std::io::{Seek, SeekFrom};

    let mut dok = DokMatrix::new(2, 2);
    dok.set(0, 0, 4.0).unwrap();
    dok.set(0, 1, 1.0).unwrap();
    dok.set(1, 0, 1.0).unwrap();
    dok.set(1, 1, 3.0).unwrap();

    let mut system = LinearSystem::new(CsrMatrix::from(&dok), vec![1.0, 2.0]);
    system.x0 = Some(vec![1.0, 1.0]);
    system.settings.tolerance = 1e-10;

    let mut file = tempfile::tempfile().unwrap();
    system.write_to_file(&mut file).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let system2 = LinearSystem::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(system, system2);

    let result = system2.solve(&mut ConjugateGradient::new()).unwrap();
    assert_eq!(result.status, SolverStatus::Solved);
}

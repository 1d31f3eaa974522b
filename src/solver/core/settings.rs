use crate::algebra::*;
use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

/// Iterative solver settings
///
/// Settings are normally made through the generated
/// [`SolverSettingsBuilder`], which checks the values before
/// returning them:
///
/// ```no_run
/// use krylov::solver::*;
///
/// let settings = SolverSettingsBuilder::<f64>::default()
///     .tolerance(1e-10)
///     .max_iter(500)
///     .verbose(true)
///     .build()
///     .unwrap();
/// ```

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverSettings<T: FloatT> {
    ///relative residual tolerance
    #[builder(default = "(1e-6).as_T()")]
    pub tolerance: T,

    ///maximum number of iterations.  `None` allows 10 times
    ///the system dimension
    #[builder(default = "None", setter(strip_option))]
    pub max_iter: Option<usize>,

    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,
}

impl<T> Default for SolverSettings<T>
where
    T: FloatT,
{
    fn default() -> SolverSettings<T> {
        SolverSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> SolverSettings<T>
where
    T: FloatT,
{
    /// Checks that the settings are valid.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_tolerance(self.tolerance)?;
        validate_max_iter(self.max_iter)?;
        Ok(())
    }

    /// the iteration cap applied to a system of dimension `n`
    pub fn iteration_limit(&self, n: usize) -> usize {
        self.max_iter.unwrap_or(10 * n)
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for SolverSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        SolverSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> SolverSettingsBuilder<T>
where
    T: FloatT,
{
    /// check the fields that have been set explicitly
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(tolerance) = self.tolerance {
            validate_tolerance(tolerance)?;
        }
        if let Some(max_iter) = self.max_iter {
            validate_max_iter(max_iter)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_tolerance<T: FloatT>(tolerance: T) -> Result<(), SettingsError> {
    if tolerance.is_finite() && tolerance > T::zero() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("tolerance"))
    }
}

fn validate_max_iter(max_iter: Option<usize>) -> Result<(), SettingsError> {
    match max_iter {
        Some(0) => Err(SettingsError::BadFieldValue("max_iter")),
        _ => Ok(()),
    }
}

#[test]
fn test_settings_defaults() {
    let settings = SolverSettings::<f64>::default();
    assert_eq!(settings.tolerance, 1e-6);
    assert_eq!(settings.max_iter, None);
    assert!(!settings.verbose);
    assert_eq!(settings.iteration_limit(7), 70);
}

#[test]
fn test_settings_validate() {
    let settings = SolverSettingsBuilder::<f64>::default()
        .tolerance(1e-10)
        .max_iter(5)
        .build()
        .unwrap();
    assert_eq!(settings.iteration_limit(100), 5);

    assert!(SolverSettingsBuilder::<f64>::default()
        .tolerance(-1.)
        .build()
        .is_err());
    assert!(SolverSettingsBuilder::<f64>::default()
        .tolerance(f64::NAN)
        .build()
        .is_err());
    assert!(SolverSettingsBuilder::<f64>::default()
        .max_iter(0)
        .build()
        .is_err());

    // direct mutation bypasses the builder, so is checked separately
    let mut settings = SolverSettings::<f64>::default();
    settings.tolerance = 0.;
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BadFieldValue("tolerance"))
    );
}

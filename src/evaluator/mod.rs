//! This module contains the boundary between this crate and force-field implementations.
//!
//! It defines the `Evaluator` trait, the single operation every force field must provide, and
//! `NativeLibrary`, the implementation backed by the pre-compiled ChIMES serial calculator.

mod native;
mod options;

pub use native::{LIBRARY_FILE_NAME, NativeLibrary};
pub use options::EvaluatorOptions;

use crate::error::CalcError;
use crate::types::{CalculationResult, Configuration};

/// A force field able to compute energy, stress and forces of a configuration.
///
/// The configuration is borrowed immutably and the result is returned by value, so the caller
/// owns every buffer once the call returns, whatever the implementation does internally.
pub trait Evaluator {
    fn evaluate(&self, config: &Configuration) -> Result<CalculationResult, CalcError>;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, config: &Configuration) -> Result<CalculationResult, CalcError> {
        (**self).evaluate(config)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&self, config: &Configuration) -> Result<CalculationResult, CalcError> {
        (**self).evaluate(config)
    }
}

/// Checks the preconditions every evaluator relies on: finite cell vectors.
pub fn validate_configuration(config: &Configuration) -> Result<(), CalcError> {
    for (vector, value) in config.cell.vectors() {
        if value.iter().any(|v| !v.is_finite()) {
            return Err(CalcError::NonFiniteCell { vector, value });
        }
    }
    if config.atoms.is_empty() {
        log::warn!("Evaluating a configuration with no atoms");
    }
    Ok(())
}

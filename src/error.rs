//! Error types for the diagnostic engine.
//!
//! Errors cover only inputs a formula cannot accept: values outside a
//! stated validity domain, or populations an equation was never validated
//! for. Physiologically implausible but computable inputs are not errors;
//! they surface as advisories on the derived quantities instead (see
//! [`crate::panel::Advisory`]).

use thiserror::Error;

/// The error type for all fallible engine functions.
///
/// Every variant is a deterministic function of the input: repeated calls
/// with the same arguments reproduce the same error. The engine never
/// clamps or extrapolates past a stated validity window.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Input outside the published validity domain of a formula.
    #[error("{parameter} = {value} outside validity domain [{lo}, {hi}]")]
    OutsideValidDomain {
        /// Name of the offending parameter
        parameter: &'static str,
        /// The rejected value
        value: f64,
        /// Lower bound of the validity domain
        lo: f64,
        /// Upper bound of the validity domain
        hi: f64,
    },

    /// No validated equation exists for this subject population.
    ///
    /// MDRD and CKD-EPI are adult equations; pediatric estimation must go
    /// through the revised Schwartz formula instead.
    #[error("{equation} is not validated for {population}")]
    UnsupportedPopulation {
        /// The equation that was requested
        equation: &'static str,
        /// The population it cannot be applied to
        population: &'static str,
    },
}

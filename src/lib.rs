//! Acid-base and electrolyte diagnostic engine.
//!
//! This library implements the derived-quantity calculations of a blood gas
//! analyzer (bicarbonate, base excess, anion gap, osmolarity, eGFR) together
//! with a rule-based classifier that maps a measured pH/pCO2 pair onto a
//! fixed set of acid-base diagnoses, including compensated and hidden mixed
//! disorders.
//!
//! All formulas are published closed-form equations reproduced with their
//! original coefficients. Units follow the International System (kPa,
//! mmol/L, meters); partial pressures are accepted in kPa, with the exact
//! historical mmHg conversion factor exposed as [`config::KPA_PER_MMHG`].
//!
//! Every function here is pure: identical inputs give identical outputs, and
//! no evaluation retains or mutates its input panel.
//!
//! References:
//! - Radiometer ABL800 Flex Reference Manual, derived-parameter equations
//! - Siggaard-Andersen O. The Acid-Base Status of the Blood. 1976
//! - Levey AS et al. Ann Intern Med. 2009;150:604-612 (CKD-EPI)

pub mod classifier;
pub mod config;
pub mod error;
pub mod formulas;
pub mod panel;
pub mod report;

pub use classifier::{classify, Compensation, DiagnosisVerdict, PrimaryDisorder};
pub use config::{ReferenceRanges, KPA_PER_MMHG};
pub use error::EngineError;
pub use panel::{Advisory, DerivedQuantities, MeasurementPanel, Sex, Subject};
pub use report::{Report, ReportLine};

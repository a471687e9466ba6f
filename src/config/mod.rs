//! Unit constants and reference ranges.
//!
//! All clinical constants include citations to their source publications.
//! Ranges are exposed read-only: the presentation layer may display them but
//! never changes them at runtime, to preserve formula fidelity.

pub mod reference;

pub use reference::{ReferenceRanges, CREA_UMOL_PER_MGDL, HB_GDL_PER_MMOL, KPA_PER_MMHG};

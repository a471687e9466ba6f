//! Physiologic formula library.
//!
//! Pure numeric functions implementing published closed-form equations with
//! documented units. Coefficients are reproduced exactly from the cited
//! sources; several are empirical nomogram fits that cannot be re-derived
//! independently.
//!
//! Unit conventions: partial pressures in kPa, concentrations in mmol/L,
//! albumin in g/dL, temperature in Celsius, height in meters.

pub mod bicarbonate;
pub mod gap;
pub mod renal;
pub mod temperature;

pub use bicarbonate::{
    approx_bicarbonate, base_excess_approx, base_excess_nomogram, bicarbonate_plasma,
    bicarbonate_standard, hematocrit, hemoglobin_mmol_l, oxygen_content, SBE_CTHB_MMOL_L,
};
pub use gap::{
    albumin_correction, anion_gap, anion_gap_with_potassium, corrected_sodium, delta_ratio,
    osmolarity, strong_ion_difference, DeltaRatioBand,
};
pub use renal::{ckd_stage, egfr_ckd_epi, egfr_mdrd, egfr_schwartz, CkdStage};
pub use temperature::{ionized_calcium_ph74, pco2_at_temperature, ph_at_temperature};

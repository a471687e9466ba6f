//! Bicarbonate, base excess and hemoglobin-derived quantities.
//!
//! Two bicarbonate variants coexist on purpose: the generic
//! Henderson-Hasselbalch approximation (water solutions, legacy
//! calculators) and the Siggaard-Andersen refinement used by Radiometer
//! analyzers. They disagree in the second decimal; regression fixtures pin
//! the refined form to historical analyzer output.
//!
//! References:
//! - Radiometer ABL800 Flex Reference Manual, equations 4, 5, 9, 13, 27
//! - Siggaard-Andersen O et al. Scand J Clin Lab Invest 1988;48 Suppl 189:7-15
//! - Siggaard-Andersen O. The Acid-Base Status of the Blood. 1976

use crate::config::{HB_GDL_PER_MMOL, KPA_PER_MMHG};

/// Default hemoglobin for the standard base excess (SBE) variant, mmol/L.
///
/// cBase(Ecf) models bicarbonate distribution over extracellular fluid,
/// which behaves like blood diluted to ctHb ~= 3 mmol/L.
pub const SBE_CTHB_MMOL_L: f64 = 3.0;

/// Convert total hemoglobin from g/dL to mmol/L.
pub fn hemoglobin_mmol_l(cthb_g_dl: f64) -> f64 {
    cthb_g_dl / HB_GDL_PER_MMOL
}

/// Actual bicarbonate cHCO3(P), generic Henderson-Hasselbalch approximation.
///
/// `0.03` is the CO2 solubility coefficient in mmol/L/mmHg and `6.1` the
/// dissociation constant for H2CO3. Good for water solutions, lower
/// precision in lipemia.
///
/// # Arguments
/// * `ph` - Arterial pH
/// * `pco2_kpa` - CO2 partial pressure (kPa)
///
/// # Returns
/// Plasma bicarbonate, mmol/L.
pub fn approx_bicarbonate(ph: f64, pco2_kpa: f64) -> f64 {
    let pco2_mmhg = pco2_kpa / KPA_PER_MMHG;
    0.03 * pco2_mmhg * 10_f64.powf(ph - 6.1)
}

/// Actual bicarbonate cHCO3(P), Siggaard-Andersen refined form.
///
/// Uses a pH-dependent dissociation constant
/// `pKp = 6.125 - log10(1 + 10^(pH - 8.7))` and the CO2 solubility at 37 C
/// of 0.230 mmol/L/kPa.
///
/// Reference: Radiometer ABL800 manual eq. 4; Siggaard-Andersen 1988 eqs 6-7.
pub fn bicarbonate_plasma(ph: f64, pco2_kpa: f64) -> f64 {
    let pkp = 6.125 - (1.0 + 10_f64.powf(ph - 8.7)).log10();
    0.230 * pco2_kpa * 10_f64.powf(ph - pkp)
}

/// Standard bicarbonate cHCO3(P,st), mmol/L.
///
/// The bicarbonate concentration the plasma would show after equilibration
/// with pCO2 5.33 kPa and pO2 high enough to saturate hemoglobin at 37 C.
///
/// # Arguments
/// * `ph` - Arterial pH
/// * `pco2_kpa` - CO2 partial pressure (kPa)
/// * `cthb_mmol_l` - Total hemoglobin (mmol/L)
/// * `so2` - Hemoglobin oxygen saturation (fraction)
///
/// Reference: Radiometer ABL800 manual eq. 9.
pub fn bicarbonate_standard(ph: f64, pco2_kpa: f64, cthb_mmol_l: f64, so2: f64) -> f64 {
    let a = 4.04e-3 + 4.25e-4 * cthb_mmol_l;
    let z = base_excess_nomogram(ph, pco2_kpa, cthb_mmol_l) - 0.3062 * cthb_mmol_l * (1.0 - so2);
    24.47 + 0.919 * z + z * a * (z - 8.0)
}

/// Base excess, linear Siggaard-Andersen approximation.
///
/// Cheap estimate from pH and actual bicarbonate; use
/// [`base_excess_nomogram`] for analyzer-grade values.
pub fn base_excess_approx(ph: f64, hco3_mmol_l: f64) -> f64 {
    0.9287 * hco3_mmol_l + 13.77 * ph - 124.58
}

/// Base excess by the Siggaard-Andersen nomogram, closed form.
///
/// Standard base excess SBE / cBase(Ecf) with `cthb_mmol_l` =
/// [`SBE_CTHB_MMOL_L`], actual base excess ABE / cBase(B) with the measured
/// hemoglobin.
///
/// The pH is first projected along the hemoglobin-dependent buffer line to
/// the standard pCO2 of 5.33 kPa, then the base excess is recovered as the
/// positive root of the nomogram quadratic. Every coefficient below is an
/// empirical fit constant from the reference equations; none of them is
/// independently derivable.
///
/// # Arguments
/// * `ph` - Arterial pH
/// * `pco2_kpa` - CO2 partial pressure (kPa)
/// * `cthb_mmol_l` - Total hemoglobin (mmol/L)
///
/// # Returns
/// Base excess, mEq/L.
///
/// Reference: Radiometer ABL800 manual eq. 5; Siggaard-Andersen 1976.
pub fn base_excess_nomogram(ph: f64, pco2_kpa: f64, cthb_mmol_l: f64) -> f64 {
    let cthb = cthb_mmol_l;
    let a = 4.04e-3 + 4.25e-4 * cthb;
    let ph_hb = 4.06e-2 * cthb + 5.98 - 1.92 * 10_f64.powf(-0.16169 * cthb);
    let log_pco2_hb = -1.7674e-2 * cthb + 3.4046 + 2.12 * 10_f64.powf(-0.15158 * cthb);
    let ph_st = ph
        + (5.33 / pco2_kpa).log10()
            * ((ph_hb - ph) / (log_pco2_hb - (7.5006 * pco2_kpa).log10()));
    let hco3_533 = 0.23 * 5.33 * 10_f64.powf((ph_st - 6.161) / 0.9524);
    0.5 * ((8.0 * a - 0.919) / a)
        + 0.5 * (((0.919 - 8.0 * a) / a).powi(2) - 4.0 * ((24.47 - hco3_533) / a)).sqrt()
}

/// Hematocrit derived from total hemoglobin.
///
/// # Arguments
/// * `cthb_mmol_l` - Total hemoglobin (mmol/L)
///
/// # Returns
/// Hematocrit, fraction (not %).
///
/// Reference: Radiometer ABL800 manual eq. 13.
pub fn hematocrit(cthb_mmol_l: f64) -> f64 {
    0.0485 * cthb_mmol_l + 8.3e-3
}

/// Total oxygen content of blood ctO2(B), mmol/L.
///
/// Dissolved fraction plus hemoglobin-bound fraction, discounting the
/// dyshemoglobins that cannot carry O2.
///
/// # Arguments
/// * `po2_kpa` - O2 partial pressure (kPa)
/// * `so2` - Oxygen saturation (fraction)
/// * `fcohb` - Carboxyhemoglobin fraction
/// * `fmethb` - Methemoglobin fraction
/// * `cthb_mmol_l` - Total hemoglobin (mmol/L)
///
/// Reference: Radiometer ABL800 manual eq. 27.
pub fn oxygen_content(po2_kpa: f64, so2: f64, fcohb: f64, fmethb: f64, cthb_mmol_l: f64) -> f64 {
    // O2 solubility coefficient in blood at 37 C, mmol/L/kPa
    let alpha_o2 = 9.83e-3;
    alpha_o2 * po2_kpa + so2 * (1.0 - fcohb - fmethb) * cthb_mmol_l
}

//! Temperature corrections and the ionized calcium projection.
//!
//! Analyzers measure at 37 C; these corrections restate pH and pCO2 at the
//! patient's actual body temperature.
//!
//! Reference: Radiometer ABL800 Flex Reference Manual, equations 1, 3, 45.

use crate::error::EngineError;

/// pH of blood at the patient's body temperature.
///
/// # Arguments
/// * `ph` - pH measured at 37 C
/// * `temp_c` - Body temperature, Celsius
pub fn ph_at_temperature(ph: f64, temp_c: f64) -> f64 {
    ph - (0.0146 + 0.0065 * (ph - 7.40)) * (temp_c - 37.0)
}

/// pCO2 of blood at the patient's body temperature, kPa.
///
/// # Arguments
/// * `pco2_kpa` - pCO2 measured at 37 C (kPa)
/// * `temp_c` - Body temperature, Celsius
pub fn pco2_at_temperature(pco2_kpa: f64, temp_c: f64) -> f64 {
    pco2_kpa * 10_f64.powf(0.021 * (temp_c - 37.0))
}

/// Ionized calcium projected to pH 7.4, mmol/L.
///
/// Biological variation limits the projection to a narrow pH window; the
/// reference analyzer refuses (prints '?') outside it, and so do we rather
/// than extrapolate.
///
/// # Arguments
/// * `ph` - Arterial pH; must lie in [7.2, 7.4]
/// * `ca_mmol_l` - Measured ionized calcium, mmol/L
///
/// # Errors
/// [`EngineError::OutsideValidDomain`] when pH is outside [7.2, 7.4].
///
/// Reference: Radiometer ABL800 manual eq. 45.
pub fn ionized_calcium_ph74(ph: f64, ca_mmol_l: f64) -> Result<f64, EngineError> {
    if !(7.2..=7.4).contains(&ph) {
        return Err(EngineError::OutsideValidDomain {
            parameter: "pH",
            value: ph,
            lo: 7.2,
            hi: 7.4,
        });
    }
    Ok(ca_mmol_l * (1.0 - 0.53 * (7.4 - ph)))
}

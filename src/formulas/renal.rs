//! Estimated glomerular filtration rate (eGFR) and CKD staging.
//!
//! Three estimators with disjoint validated populations: MDRD (adults,
//! considered obsolete), CKD-EPI (adults, preferred above 60 mL/min) and the
//! revised Schwartz formula (children 1-16 years). Requesting an adult
//! equation for a child is a hard error, not an approximation.
//!
//! References:
//! - Levey AS et al. A new equation to estimate glomerular filtration rate.
//!   Ann Intern Med. 2009;150(9):604-612 (CKD-EPI)
//! - Radiometer ABL800 Flex Reference Manual, eqs 53-54 (MDRD, IDMS revised)
//! - Schwartz GJ et al. J Am Soc Nephrol. 2009;20(3):629-637

use serde::Serialize;

use crate::config::CREA_UMOL_PER_MGDL;
use crate::error::EngineError;
use crate::panel::Sex;

/// eGFR by the MDRD study equation, 2005 IDMS-calibrated revision.
///
/// For patients over 18 years; not valid in acute renal failure.
///
/// # Arguments
/// * `sex` - Male or Female; Child is rejected
/// * `ccrea_umol_l` - Serum creatinine (IDMS-calibrated), umol/L
/// * `age_years` - Age, years
/// * `black_skin` - Apply the African-American cohort multiplier
///
/// # Returns
/// eGFR, mL/min/1.73 m2.
///
/// # Errors
/// [`EngineError::UnsupportedPopulation`] for [`Sex::Child`]; use
/// [`egfr_schwartz`] instead.
pub fn egfr_mdrd(
    sex: Sex,
    ccrea_umol_l: f64,
    age_years: f64,
    black_skin: bool,
) -> Result<f64, EngineError> {
    // 175 replaces the original 186 of the 1999 equation after creatinine
    // assay standardization over isotope dilution mass spectrometry
    let mut egfr =
        175.0 * (ccrea_umol_l / CREA_UMOL_PER_MGDL).powf(-1.154) * age_years.powf(-0.203);
    match sex {
        Sex::Male => {}
        Sex::Female => egfr *= 0.742,
        Sex::Child => {
            return Err(EngineError::UnsupportedPopulation {
                equation: "MDRD eGFR",
                population: "children",
            })
        }
    }
    if black_skin {
        egfr *= 1.210;
    }
    Ok(egfr)
}

/// eGFR by the CKD-EPI 2009 equation.
///
/// More accurate than MDRD, especially when actual GFR exceeds
/// 60 mL/min/1.73 m2. Cachexia or limb amputation reduce creatinine
/// production and flatter the estimate.
///
/// Branches at 0.9 mg/dL (male) / 0.7 mg/dL (female) with separate exponents
/// below and above the threshold.
///
/// # Errors
/// [`EngineError::UnsupportedPopulation`] for [`Sex::Child`].
pub fn egfr_ckd_epi(
    sex: Sex,
    ccrea_umol_l: f64,
    age_years: f64,
    black_skin: bool,
) -> Result<f64, EngineError> {
    let crea_mgdl = ccrea_umol_l / CREA_UMOL_PER_MGDL;
    let age_factor = 0.993_f64.powf(age_years);
    let mut egfr = match sex {
        Sex::Male => {
            let exp = if crea_mgdl <= 0.9 { -0.411 } else { -1.209 };
            141.0 * (crea_mgdl / 0.9).powf(exp) * age_factor
        }
        Sex::Female => {
            let exp = if crea_mgdl <= 0.7 { -0.329 } else { -1.209 };
            141.0 * (crea_mgdl / 0.7).powf(exp) * age_factor * 1.018
        }
        Sex::Child => {
            return Err(EngineError::UnsupportedPopulation {
                equation: "CKD-EPI eGFR",
                population: "children",
            })
        }
    };
    if black_skin {
        egfr *= 1.159;
    }
    Ok(egfr)
}

/// eGFR by the revised Schwartz formula (children 1-16 years).
///
/// Fixed k = 0.413 (2009 revision, IDMS-calibrated creatinine). Most
/// accurate in the 15-75 mL/min/1.73 m2 range. Not for adults.
///
/// # Arguments
/// * `ccrea_umol_l` - Serum creatinine (IDMS-calibrated), umol/L
/// * `height_m` - Child height, meters
pub fn egfr_schwartz(ccrea_umol_l: f64, height_m: f64) -> f64 {
    let crea_mgdl = ccrea_umol_l / CREA_UMOL_PER_MGDL;
    0.413 * height_m * 100.0 / crea_mgdl
}

/// Chronic Kidney Disease stage by eGFR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CkdStage {
    /// >= 90: normal function (CKD1 only if proteinuria present)
    Normal,
    /// 60-89: mild loss of kidney function
    Ckd2,
    /// 45-59: mild to moderate loss
    Ckd3a,
    /// 30-44: moderate to severe loss
    Ckd3b,
    /// 15-29: severe loss
    Ckd4,
    /// < 15: kidney failure
    Ckd5,
}

/// Stage an eGFR value, mL/min/1.73 m2.
pub fn ckd_stage(gfr: f64) -> CkdStage {
    if gfr >= 90.0 {
        CkdStage::Normal
    } else if gfr >= 60.0 {
        CkdStage::Ckd2
    } else if gfr >= 45.0 {
        CkdStage::Ckd3a
    } else if gfr >= 30.0 {
        CkdStage::Ckd3b
    } else if gfr >= 15.0 {
        CkdStage::Ckd4
    } else {
        CkdStage::Ckd5
    }
}

impl CkdStage {
    /// Clinical reading of the stage.
    pub fn description(&self) -> &'static str {
        match self {
            CkdStage::Normal => {
                "Normal kidney function if no proteinuria, otherwise CKD1 (90-100 %)"
            }
            CkdStage::Ckd2 => {
                "CKD2 kidney damage with mild loss of kidney function (89-60 %). For most patients, a GFR over 60 mL/min/1.73 m2 is adequate"
            }
            CkdStage::Ckd3a => {
                "CKD3a, mild to moderate loss of kidney function (59-45 %). Evaluate progression"
            }
            CkdStage::Ckd3b => {
                "CKD3b, moderate to severe loss of kidney function (44-30 %). Evaluate progression"
            }
            CkdStage::Ckd4 => {
                "CKD4, severe loss of kidney function (29-15 %). Be prepared for dialysis"
            }
            CkdStage::Ckd5 => {
                "CKD5, kidney failure (<15 %). Needs dialysis or kidney transplant"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mdrd_male_regression() {
        let egfr = egfr_mdrd(Sex::Male, 74.4, 27.0, false).unwrap();
        assert!(
            (egfr - 109.36590492087734).abs() < 1e-9,
            "MDRD male: {}",
            egfr
        );
    }

    #[test]
    fn test_mdrd_female_black_regression() {
        let egfr = egfr_mdrd(Sex::Female, 100.0, 80.0, true).unwrap();
        assert!(
            (egfr - 55.98942027449337).abs() < 1e-9,
            "MDRD female black: {}",
            egfr
        );
    }

    #[test]
    fn test_mdrd_rejects_children() {
        let err = egfr_mdrd(Sex::Child, 40.0, 10.0, false).unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedPopulation { .. }));
    }

    #[test]
    fn test_ckd_epi_branches_at_threshold() {
        // Continuity at the sex-specific creatinine breakpoint
        let below = egfr_ckd_epi(Sex::Male, 0.9 * CREA_UMOL_PER_MGDL, 40.0, false).unwrap();
        let above =
            egfr_ckd_epi(Sex::Male, 0.9001 * CREA_UMOL_PER_MGDL, 40.0, false).unwrap();
        assert!((below - above).abs() < 0.1, "{} vs {}", below, above);
        // And the female breakpoint
        let f_below = egfr_ckd_epi(Sex::Female, 0.7 * CREA_UMOL_PER_MGDL, 40.0, false).unwrap();
        let f_above =
            egfr_ckd_epi(Sex::Female, 0.7001 * CREA_UMOL_PER_MGDL, 40.0, false).unwrap();
        assert!((f_below - f_above).abs() < 0.1, "{} vs {}", f_below, f_above);
    }

    #[test]
    fn test_ckd_epi_decreases_with_creatinine() {
        let healthy = egfr_ckd_epi(Sex::Male, 74.4, 27.0, false).unwrap();
        let impaired = egfr_ckd_epi(Sex::Male, 300.0, 27.0, false).unwrap();
        assert!(healthy > impaired, "{} vs {}", healthy, impaired);
    }

    #[test]
    fn test_ckd_epi_rejects_children() {
        let err = egfr_ckd_epi(Sex::Child, 40.0, 10.0, false).unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedPopulation { .. }));
    }

    #[test]
    fn test_schwartz_regression() {
        let egfr = egfr_schwartz(40.0, 1.15);
        assert!((egfr - 104.96395).abs() < 1e-5, "Schwartz: {}", egfr);
    }

    #[test]
    fn test_ckd_staging_bounds() {
        assert_eq!(ckd_stage(120.0), CkdStage::Normal);
        assert_eq!(ckd_stage(90.0), CkdStage::Normal);
        assert_eq!(ckd_stage(89.9), CkdStage::Ckd2);
        assert_eq!(ckd_stage(60.0), CkdStage::Ckd2);
        assert_eq!(ckd_stage(59.0), CkdStage::Ckd3a);
        assert_eq!(ckd_stage(44.0), CkdStage::Ckd3b);
        assert_eq!(ckd_stage(15.0), CkdStage::Ckd4);
        assert_eq!(ckd_stage(8.0), CkdStage::Ckd5);
    }
}

//! Anion gap arithmetic, osmolarity and ion-balance estimates.
//!
//! The anion gap family is deliberately split into explicit variants
//! (with/without potassium, with/without albumin correction) instead of one
//! function with optional parameters, so every valid input combination is a
//! distinct enumerable call.
//!
//! Pitfall worth remembering: the delta ratio assumes the anion gap was taken
//! WITHOUT potassium and against the 7-16 mEq/L reference band; AG(K+) is not
//! compatible with it.
//!
//! References:
//! - Figge J et al. Crit Care Med 1998 (hypoalbuminemia correction)
//! - Radiometer ABL800 Flex Reference Manual, eq. 48 (osmolarity)
//! - Hillier TA et al. Am J Med 1999;106:399-403 (sodium vs glucose)

use serde::Serialize;

use crate::config::reference::ALBUMIN_MEAN_GDL;

/// Serum anion gap, mEq/L: `Na - (Cl + HCO3)`.
///
/// Estimates unmeasured anions (phosphates, sulphates, albumin). Elevated in
/// ketoacidosis, uremia, lactic acidosis and toxic ingestions; low with
/// chloride excess or hypoalbuminemia.
///
/// # Arguments
/// * `na` - Serum sodium, mmol/L
/// * `cl` - Serum chloride, mmol/L
/// * `hco3` - Actual bicarbonate, mmol/L
pub fn anion_gap(na: f64, cl: f64, hco3: f64) -> f64 {
    na - (cl + hco3)
}

/// Anion gap including potassium, mEq/L: `(Na + K) - (Cl + HCO3)`.
///
/// Rarely used: potassium is tricky to measure and AG(K+) cannot feed the
/// delta-ratio calculation. Normal band 10-20 mEq/L rather than 7-16.
pub fn anion_gap_with_potassium(na: f64, k: f64, cl: f64, hco3: f64) -> f64 {
    (na + k) - (cl + hco3)
}

/// Additive anion gap correction for low albumin, mEq/L.
///
/// `2.5 * (4.4 - albumin)`; starved patients show a deceptively low gap
/// because albumin is the dominant unmeasured anion. The 2.5 mEq/L per g/dL
/// multiplier is the widely accepted mean over the physiologic pH range.
///
/// # Arguments
/// * `albumin_g_dl` - Serum albumin, g/dL
pub fn albumin_correction(albumin_g_dl: f64) -> f64 {
    2.5 * (ALBUMIN_MEAN_GDL - albumin_g_dl)
}

/// Delta ratio (gap-gap): `(AG - 12) / (24 - HCO3)`.
///
/// Dissects an elevated-anion-gap acidosis into concurrent processes. The
/// constants 12 and 24 are the assumed normal AG (without potassium) and
/// normal bicarbonate.
///
/// Returns `None` when the measured bicarbonate equals the normal 24 mmol/L
/// and the ratio is undefined.
pub fn delta_ratio(ag: f64, hco3: f64) -> Option<f64> {
    if hco3 == 24.0 {
        return None;
    }
    Some((ag - 12.0) / (24.0 - hco3))
}

/// Interpretation bands of the delta ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeltaRatioBand {
    /// gg < 0.4: hyperchloremic normal anion gap acidosis (NAGMA)
    Hyperchloremic,
    /// 0.4 <= gg <= 0.8: combined HAGMA + NAGMA; often renal failure
    Combined,
    /// 0.8 < gg < 1: diabetic ketoacidosis with urinary ketone loss
    KetoacidosisLikely,
    /// 1 <= gg <= 2: classic uncomplicated high anion gap acidosis
    PureHighGap,
    /// gg > 2: concurrent metabolic alkalosis or chronic respiratory acidosis
    ConcurrentAlkalosis,
}

impl DeltaRatioBand {
    /// Classify a delta ratio value.
    pub fn from_ratio(gg: f64) -> Self {
        if gg < 0.4 {
            DeltaRatioBand::Hyperchloremic
        } else if gg <= 0.8 {
            DeltaRatioBand::Combined
        } else if gg < 1.0 {
            DeltaRatioBand::KetoacidosisLikely
        } else if gg <= 2.0 {
            DeltaRatioBand::PureHighGap
        } else {
            DeltaRatioBand::ConcurrentAlkalosis
        }
    }

    /// Clinical reading of the band.
    pub fn description(&self) -> &'static str {
        match self {
            DeltaRatioBand::Hyperchloremic => {
                "(gg < 0.4): hyperchloremic normal anion gap metabolic acidosis (NAGMA)"
            }
            DeltaRatioBand::Combined => {
                "(0.4 <= gg <= 0.8): combined HAGMA + NAGMA (ratio <1 often associated with renal failure - check urine electrolytes and kidney function)"
            }
            DeltaRatioBand::KetoacidosisLikely => {
                "(0.8 < gg < 1): most likely diabetic ketoacidosis with urinary ketone loss (when patient not dehydrated yet)"
            }
            DeltaRatioBand::PureHighGap => "(1 <= gg <= 2): classic high anion gap acidosis",
            DeltaRatioBand::ConcurrentAlkalosis => {
                "(2 < gg): concurrent metabolic alkalosis or chronic respiratory acidosis with high HCO3-"
            }
        }
    }
}

/// Abbreviated strong ion difference, mEq/L: `Na - Cl - 38`.
///
/// Positive values push towards alkalosis (relative sodium excess), negative
/// towards acidosis (relative chloride excess). Albumin-corrected like the
/// anion gap.
pub fn strong_ion_difference(na: f64, cl: f64, albumin_g_dl: f64) -> f64 {
    na - cl - 38.0 + albumin_correction(albumin_g_dl)
}

/// Serum osmolarity, mOsm/L: `2*Na + glucose`.
///
/// Osmotic concentration per liter, not the osmometer-measured osmolality
/// per kilogram.
///
/// Reference: Radiometer ABL800 manual eq. 48.
pub fn osmolarity(na: f64, glucose: f64) -> f64 {
    2.0 * na + glucose
}

/// Sodium corrected for hyperglycemia (Hillier 1999), mmol/L.
///
/// Elevated glucose draws water into plasma and dilutes sodium; the true
/// sodium once glucose normalizes is higher than measured. 2.4 mmol/L shift
/// per 100 mg/dL of glucose above 100.
pub fn corrected_sodium(na: f64, glucose_mmol_l: f64) -> f64 {
    // Glucose molar mass 180 g/mol; mmol/L * 18.0 = mg/dL
    let glucose_mgdl = glucose_mmol_l * 18.0;
    na + (glucose_mgdl - 100.0) / 100.0 * 2.4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::bicarbonate::bicarbonate_plasma;

    #[test]
    fn test_anion_gap_typical() {
        assert_eq!(anion_gap(140.0, 102.0, 24.0), 14.0);
    }

    #[test]
    fn test_anion_gap_with_albumin() {
        // Analyzer regression: low albumin masks part of the gap
        let hco3 = bicarbonate_plasma(7.499, 4.77294);
        let ag = anion_gap(137.0, 108.0, hco3) + albumin_correction(3.39);
        assert!(
            (ag - 3.9175115055719747).abs() < 1e-9,
            "albumin-corrected AG: {}",
            ag
        );
    }

    #[test]
    fn test_anion_gap_analyzer_regression() {
        // Radiometer ABL800 Flex reproduction fixture
        let hco3 = bicarbonate_plasma(6.656, 3.71);
        let ag = anion_gap(173.0, 77.0, hco3);
        assert!(
            (ag - 93.07578958435911).abs() < 1e-9,
            "analyzer AG: {}",
            ag
        );
    }

    #[test]
    fn test_anion_gap_potassium_offset() {
        let ag = anion_gap(140.0, 102.0, 24.0);
        let agk = anion_gap_with_potassium(140.0, 4.0, 102.0, 24.0);
        assert_eq!(agk - ag, 4.0);
    }

    #[test]
    fn test_delta_ratio_bands() {
        assert_eq!(
            DeltaRatioBand::from_ratio(0.3),
            DeltaRatioBand::Hyperchloremic
        );
        assert_eq!(DeltaRatioBand::from_ratio(0.4), DeltaRatioBand::Combined);
        assert_eq!(DeltaRatioBand::from_ratio(0.8), DeltaRatioBand::Combined);
        assert_eq!(
            DeltaRatioBand::from_ratio(0.9),
            DeltaRatioBand::KetoacidosisLikely
        );
        assert_eq!(DeltaRatioBand::from_ratio(1.0), DeltaRatioBand::PureHighGap);
        assert_eq!(DeltaRatioBand::from_ratio(2.0), DeltaRatioBand::PureHighGap);
        assert_eq!(
            DeltaRatioBand::from_ratio(2.5),
            DeltaRatioBand::ConcurrentAlkalosis
        );
    }

    #[test]
    fn test_delta_ratio_undefined_at_normal_hco3() {
        assert_eq!(delta_ratio(20.0, 24.0), None);
        let gg = delta_ratio(24.0, 12.0).unwrap();
        assert!((gg - 1.0).abs() < 1e-12, "gg: {}", gg);
    }

    #[test]
    fn test_strong_ion_difference_normal() {
        // 140 - 102 - 38 = 0 at mean albumin
        let sid = strong_ion_difference(140.0, 102.0, ALBUMIN_MEAN_GDL);
        assert!(sid.abs() < 1e-12, "SID: {}", sid);
    }

    #[test]
    fn test_osmolarity_normal() {
        let mosm = osmolarity(140.0, 5.5);
        assert_eq!(mosm, 285.5);
    }

    #[test]
    fn test_corrected_sodium_hyperglycemia() {
        // Hillier fixture: Na 126 measured at glucose 33.3 mmol/L
        let corr = corrected_sodium(126.0, 33.3);
        assert!((corr - 137.9856).abs() < 1e-9, "corrected Na: {}", corr);
    }
}

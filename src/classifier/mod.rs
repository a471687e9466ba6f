//! Rule-based acid-base classifier.
//!
//! A decision procedure over two observed axes: pH state (acidotic, normal,
//! alkalotic against the 7.35-7.45 band) and pCO2 state (low, normal, high
//! against 35-45 mmHg). The nine combinations map to a closed set of
//! diagnoses covering primary disorders, full and partial compensation, and
//! hidden opposing processes.
//!
//! The branch ordering is part of the contract: the pH-normal row is checked
//! first regardless of pCO2, and band bounds are inclusive on the normal
//! side. No other ordering reproduces the same behavior on boundary values.
//!
//! The thresholds (7.35/7.39/7.41/7.45, 35/45 mmHg, 0.07 pH margin, the
//! 0.008/0.003 compensation coefficients) are empirical constants from the
//! cited clinical references. Do not re-derive or "improve" them; any drift
//! changes clinical meaning.
//!
//! References:
//! - Graham T. Stepwise approach to ABG interpretation (UCHC selective)
//! - Winters RW et al. Ann Intern Med 1967 (expected pCO2)
//! - Ryabov 1994, p. 67 (expected-pH compensation slopes)

use serde::Serialize;

use crate::config::reference::{PCO2_MEAN_MMHG, PH_MEAN};
use crate::config::{ReferenceRanges, KPA_PER_MMHG};

/// Maximal |measured - expected| pH excursion explainable by a lone
/// respiratory process before a hidden metabolic one is suspected.
pub const HIDDEN_PH_MARGIN: f64 = 0.07;

/// pH change per mmHg of pCO2 shift, acute respiratory disturbance
/// (no renal compensation yet).
const ACUTE_PH_SLOPE: f64 = 0.008;

/// pH change per mmHg of pCO2 shift, chronic respiratory disturbance
/// (renal compensation established after 3-5 days).
const CHRONIC_PH_SLOPE: f64 = 0.003;

/// Primary acid-base disorder categories. A fixed, closed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimaryDisorder {
    /// Both axes inside reference bands
    Normal,
    MetabolicAcidosis,
    MetabolicAlkalosis,
    RespiratoryAcidosis,
    RespiratoryAlkalosis,
}

/// Degree of secondary (opposing-axis) compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Compensation {
    /// Opposing axis still inside its reference band
    None,
    /// Opposing axis shifted but pH not yet normalized
    Partial,
    /// pH pulled back inside the reference band
    Full,
}

/// Classifier output: one symbolic category plus an optional free-text
/// qualifier (e.g. "COPD?", a hidden-process note with the expected pH).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisVerdict {
    /// The dominant disorder
    pub disorder: PrimaryDisorder,
    /// Compensation state of the opposing axis
    pub compensation: Compensation,
    /// Fixed human-readable label for this table cell
    pub summary: &'static str,
    /// Follow-up hint or hidden-process note
    pub qualifier: Option<String>,
}

impl DiagnosisVerdict {
    fn new(disorder: PrimaryDisorder, compensation: Compensation, summary: &'static str) -> Self {
        Self {
            disorder,
            compensation,
            summary,
            qualifier: None,
        }
    }

    fn with_qualifier(mut self, qualifier: String) -> Self {
        self.qualifier = Some(qualifier);
        self
    }
}

/// Tempo of a respiratory disturbance for the expected-pH projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespiratoryTempo {
    /// Hours: buffering only, no renal response
    Acute,
    /// Days: renal compensation established
    Chronic,
}

/// Expected pH for a given pCO2 under a simple respiratory disturbance.
///
/// `7.4 + slope * (40 - pCO2_mmHg)` with slope 0.008 (acute) or 0.003
/// (chronic). The chronic projection is reported for comparison only; branch
/// selection always uses the acute one.
pub fn expected_ph(pco2_kpa: f64, tempo: RespiratoryTempo) -> f64 {
    let slope = match tempo {
        RespiratoryTempo::Acute => ACUTE_PH_SLOPE,
        RespiratoryTempo::Chronic => CHRONIC_PH_SLOPE,
    };
    PH_MEAN + slope * (PCO2_MEAN_MMHG - pco2_kpa / KPA_PER_MMHG)
}

/// Quick standard base excess estimate from the measured-vs-expected pH gap.
///
/// Divides the pH excursion unexplained by pCO2 by 0.015 pH units per mEq/L.
/// Rough, but needs no nomogram.
///
/// Reference: Ryabov 1994, p. 67.
pub fn estimated_sbe_ryabov(ph: f64, pco2_kpa: f64) -> f64 {
    (ph - expected_ph(pco2_kpa, RespiratoryTempo::Acute)) / 0.015
}

/// Winters' expected pCO2 for a metabolic acidosis, mmHg (band: +/- 2).
pub fn winters_pco2_acidosis(hco3_mmol_l: f64) -> f64 {
    1.5 * hco3_mmol_l + 8.0
}

/// Expected respiratory compensation for a metabolic alkalosis, mmHg
/// (band: +/- 1.5).
pub fn winters_pco2_alkalosis(hco3_mmol_l: f64) -> f64 {
    0.7 * hco3_mmol_l + 20.0
}

/// Does this pH/pCO2 pair hide an opposing metabolic process?
///
/// Compares the measured pH against the acute expected pH for the measured
/// pCO2. An excursion beyond [`HIDDEN_PH_MARGIN`] in either direction names
/// the background process; the note always carries the expected pH at two
/// decimals.
fn hidden_process_note(ph: f64, pco2_kpa: f64) -> String {
    let expected = expected_ph(pco2_kpa, RespiratoryTempo::Acute);
    let mut note = String::new();
    if (ph - expected).abs() > HIDDEN_PH_MARGIN {
        if ph > expected {
            note.push_str("background metabolic alkalosis: ");
        } else {
            note.push_str("background metabolic acidosis: ");
        }
    }
    note.push_str(&format!("expected pH {:.2}", expected));
    note
}

/// Classify an arterial blood gas sample.
///
/// Pure function of `(pH, pCO2)`; the actual bicarbonate derived from the
/// same pair adds no independent axis and rides along only in reporting.
/// Calling twice with identical inputs yields identical verdicts.
///
/// # Arguments
/// * `ph` - Arterial pH
/// * `pco2_kpa` - CO2 partial pressure (kPa)
pub fn classify(ph: f64, pco2_kpa: f64) -> DiagnosisVerdict {
    let ranges = ReferenceRanges::default();
    let pco2_mmhg = pco2_kpa / KPA_PER_MMHG;
    let (ph_lo, ph_hi) = ranges.ph;
    let (pco2_lo, pco2_hi) = ranges.pco2_mmhg;

    if (ph_lo..=ph_hi).contains(&ph) {
        // pH normal or fully compensated. Both axes normal means no hidden
        // process worth chasing; an abnormal pCO2 with a normal pH means two
        // opposed processes, disambiguated by which half of the band the pH
        // sits in.
        if pco2_mmhg < pco2_lo {
            if ph >= 7.41 {
                DiagnosisVerdict::new(
                    PrimaryDisorder::RespiratoryAlkalosis,
                    Compensation::Full,
                    "Respiratory alkalosis, full comp. by metabolic acidosis",
                )
            } else {
                DiagnosisVerdict::new(
                    PrimaryDisorder::MetabolicAcidosis,
                    Compensation::Full,
                    "Metabolic acidosis, full comp. by respiratory alkalosis",
                )
            }
        } else if pco2_mmhg > pco2_hi {
            if ph <= 7.39 {
                // Classic chronically retaining COPD gas
                DiagnosisVerdict::new(
                    PrimaryDisorder::RespiratoryAcidosis,
                    Compensation::Full,
                    "Respiratory acidosis, full comp. by metabolic alkalosis",
                )
                .with_qualifier("COPD?".to_string())
            } else {
                DiagnosisVerdict::new(
                    PrimaryDisorder::MetabolicAlkalosis,
                    Compensation::Full,
                    "Metabolic alkalosis, full comp. by respiratory acidosis",
                )
            }
        } else {
            DiagnosisVerdict::new(PrimaryDisorder::Normal, Compensation::None, "Normal ABG")
        }
    } else if ph < ph_lo {
        // Decompensated acidosis
        if pco2_mmhg < pco2_lo {
            DiagnosisVerdict::new(
                PrimaryDisorder::MetabolicAcidosis,
                Compensation::Partial,
                "Metabolic acidosis, partial comp. by respiratory alkalosis",
            )
            .with_qualifier("check anion gap and base deficit".to_string())
        } else if pco2_mmhg > pco2_hi {
            DiagnosisVerdict::new(
                PrimaryDisorder::RespiratoryAcidosis,
                Compensation::Partial,
                "Respiratory acidosis",
            )
            .with_qualifier(hidden_process_note(ph, pco2_kpa))
        } else {
            DiagnosisVerdict::new(
                PrimaryDisorder::MetabolicAcidosis,
                Compensation::None,
                "Metabolic acidosis, no respiratory comp.",
            )
        }
    } else {
        // Decompensated alkalosis
        if pco2_mmhg < pco2_lo {
            DiagnosisVerdict::new(
                PrimaryDisorder::RespiratoryAlkalosis,
                Compensation::Partial,
                "Respiratory alkalosis",
            )
            .with_qualifier(hidden_process_note(ph, pco2_kpa))
        } else if pco2_mmhg > pco2_hi {
            DiagnosisVerdict::new(
                PrimaryDisorder::MetabolicAlkalosis,
                Compensation::Partial,
                "Metabolic alkalosis, partial comp. by respiratory acidosis",
            )
            .with_qualifier("check Na, Cl, albumin".to_string())
        } else {
            DiagnosisVerdict::new(
                PrimaryDisorder::MetabolicAlkalosis,
                Compensation::None,
                "Metabolic alkalosis, no respiratory comp.",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kpa(mmhg: f64) -> f64 {
        mmhg * KPA_PER_MMHG
    }

    #[test]
    fn test_normal_abg() {
        let verdict = classify(7.40, 5.33);
        assert_eq!(verdict.disorder, PrimaryDisorder::Normal);
        assert_eq!(verdict.summary, "Normal ABG");
        assert_eq!(verdict.qualifier, None);
    }

    #[test]
    fn test_expected_ph_slopes() {
        // At pCO2 55 mmHg acute expectation is 7.28
        let acute = expected_ph(kpa(55.0), RespiratoryTempo::Acute);
        assert!((acute - 7.28).abs() < 1e-12, "acute: {}", acute);
        let chronic = expected_ph(kpa(55.0), RespiratoryTempo::Chronic);
        assert!((chronic - 7.355).abs() < 1e-12, "chronic: {}", chronic);
    }

    #[test]
    fn test_ryabov_estimate() {
        // Worked example: pH 7.36 at pCO2 55 mmHg -> SBE ~ +5.33 mEq/L
        let sbe = estimated_sbe_ryabov(7.36, kpa(55.0));
        assert!((sbe - 5.333333333).abs() < 1e-6, "SBE: {}", sbe);
    }

    #[test]
    fn test_hidden_process_margin() {
        // pCO2 30 mmHg -> expected acute pH 7.48. Excursions inside the 0.07
        // margin stay unflagged; beyond it names the background process.
        let at_margin = classify(7.5499, kpa(30.0));
        assert_eq!(at_margin.disorder, PrimaryDisorder::RespiratoryAlkalosis);
        let note = at_margin.qualifier.unwrap();
        assert!(
            !note.contains("background"),
            "in-margin excursion wrongly flagged: {}",
            note
        );
        assert!(note.contains("expected pH 7.48"), "note: {}", note);

        let beyond = classify(7.60, kpa(30.0));
        let note = beyond.qualifier.unwrap();
        assert!(
            note.contains("background metabolic alkalosis"),
            "note: {}",
            note
        );
    }

    #[test]
    fn test_hidden_acidosis_direction() {
        // pCO2 60 mmHg -> expected acute pH 7.24; measured far below
        let verdict = classify(7.10, kpa(60.0));
        assert_eq!(verdict.disorder, PrimaryDisorder::RespiratoryAcidosis);
        assert_eq!(verdict.compensation, Compensation::Partial);
        let note = verdict.qualifier.unwrap();
        assert!(
            note.contains("background metabolic acidosis"),
            "note: {}",
            note
        );
        assert!(note.contains("expected pH 7.24"), "note: {}", note);
    }

    #[test]
    fn test_idempotent() {
        let a = classify(7.31, kpa(48.0));
        let b = classify(7.31, kpa(48.0));
        assert_eq!(a, b);
    }
}

//! Measurement panel and derived-quantity evaluation.
//!
//! A [`MeasurementPanel`] is one analyzer printout: arterial pH and pCO2
//! always, electrolytes and the rest when the lab ran them. Evaluation is a
//! pure pass over the panel that fills in every derived quantity the present
//! fields allow and nothing else. The panel is never retained or mutated.
//!
//! Out-of-range but computable inputs are not errors. A pH outside the
//! survivable band still evaluates; the caller gets an [`Advisory`] and a
//! warning in the log, because a typo and an agonal sample look identical
//! from here.

use serde::{Deserialize, Serialize};

use crate::config::reference::ReferenceRanges;
use crate::formulas::{
    anion_gap, anion_gap_with_potassium, albumin_correction, base_excess_approx,
    base_excess_nomogram, bicarbonate_plasma, egfr_ckd_epi, egfr_mdrd, egfr_schwartz, hematocrit,
    hemoglobin_mmol_l, osmolarity, pco2_at_temperature, ph_at_temperature, SBE_CTHB_MMOL_L,
};

/// Subject sex for equation selection. `Child` routes renal estimates to the
/// pediatric equation and is rejected by the adult ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    Child,
}

/// Demographic record consumed by the renal equations. Produced upstream by
/// whatever registered the patient; only read here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub sex: Sex,
    /// Age in years, adult equations only
    pub age_years: Option<f64>,
    /// Height in meters, pediatric equation only
    pub height_m: Option<f64>,
    pub weight_kg: Option<f64>,
    /// Selects the ethnicity coefficient in MDRD and CKD-EPI
    pub black_skin: bool,
}

impl Default for Subject {
    fn default() -> Self {
        Self {
            sex: Sex::Male,
            age_years: None,
            height_m: None,
            weight_kg: None,
            black_skin: false,
        }
    }
}

/// One arterial blood gas printout plus optional chemistry.
///
/// `ph` and `pco2_kpa` are the only required fields; everything else is
/// `Option` and missing values simply leave the dependent derived quantities
/// unset. Units follow the analyzer: kPa, mmol/L, g/dL for hemoglobin and
/// albumin, Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPanel {
    /// Arterial pH
    pub ph: f64,
    /// CO2 partial pressure, kPa
    pub pco2_kpa: f64,
    /// Measured actual bicarbonate, mmol/L. When present it overrides the
    /// Henderson-Hasselbalch estimate.
    #[serde(default)]
    pub hco3_mmol_l: Option<f64>,
    #[serde(default)]
    pub na_mmol_l: Option<f64>,
    #[serde(default)]
    pub cl_mmol_l: Option<f64>,
    #[serde(default)]
    pub k_mmol_l: Option<f64>,
    /// Serum creatinine, umol/L
    #[serde(default)]
    pub ccrea_umol_l: Option<f64>,
    #[serde(default)]
    pub albumin_g_dl: Option<f64>,
    #[serde(default)]
    pub glucose_mmol_l: Option<f64>,
    /// Total hemoglobin, g/dL
    #[serde(default)]
    pub cthb_g_dl: Option<f64>,
    /// Oxygen saturation as a fraction of 1
    #[serde(default)]
    pub so2_fraction: Option<f64>,
    /// Patient temperature for the 37 C electrode corrections
    #[serde(default)]
    pub body_temp_c: Option<f64>,
}

impl MeasurementPanel {
    /// Minimal panel: a bare blood gas with no chemistry attached.
    pub fn blood_gas(ph: f64, pco2_kpa: f64) -> Self {
        Self {
            ph,
            pco2_kpa,
            hco3_mmol_l: None,
            na_mmol_l: None,
            cl_mmol_l: None,
            k_mmol_l: None,
            ccrea_umol_l: None,
            albumin_g_dl: None,
            glucose_mmol_l: None,
            cthb_g_dl: None,
            so2_fraction: None,
            body_temp_c: None,
        }
    }
}

/// Data-quality advisories attached to an evaluation. Advisories never stop
/// computation; they travel with the result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Advisory {
    /// pH outside the survivable 6.8-7.8 band. Either a pre-analytic error
    /// or an agonal sample.
    NonPhysiologicPh { ph: f64 },
}

/// Everything computable from one panel.
///
/// `hco3_actual`, the base excess pair and the approximation need only pH and
/// pCO2 and are always present. The rest mirror the optional panel fields
/// they derive from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedQuantities {
    /// Actual bicarbonate, mmol/L (measured when supplied)
    pub hco3_actual: f64,
    /// Standard base excess, nomogram at ctHb 3 mmol/L
    pub base_excess_standard: f64,
    /// Linear base excess approximation
    pub base_excess_approx: f64,
    /// Actual base excess, nomogram at measured ctHb
    pub base_excess_actual: Option<f64>,
    /// Anion gap, albumin-corrected when albumin is supplied
    pub anion_gap: Option<f64>,
    /// Anion gap including potassium
    pub anion_gap_k: Option<f64>,
    pub osmolarity: Option<f64>,
    /// Hematocrit fraction regressed from ctHb
    pub hematocrit: Option<f64>,
    /// pH corrected to patient temperature
    pub ph_at_temp: Option<f64>,
    /// pCO2 corrected to patient temperature, kPa
    pub pco2_at_temp: Option<f64>,
    /// eGFR by MDRD, adults with creatinine and age supplied
    pub egfr_mdrd: Option<f64>,
    /// eGFR by CKD-EPI, adults with creatinine and age supplied
    pub egfr_ckd_epi: Option<f64>,
    /// eGFR by revised Schwartz, children with creatinine and height supplied
    pub egfr_schwartz: Option<f64>,
    pub advisories: Vec<Advisory>,
}

impl DerivedQuantities {
    /// Evaluate a panel with no demographics; the renal estimates stay unset.
    pub fn evaluate(panel: &MeasurementPanel) -> Self {
        Self::evaluate_for(panel, None)
    }

    /// Evaluate one panel. Pure and synchronous; re-evaluating the same
    /// panel yields an identical result.
    pub fn evaluate_for(panel: &MeasurementPanel, subject: Option<&Subject>) -> Self {
        let ranges = ReferenceRanges::default();
        let mut advisories = Vec::new();
        if !ranges.ph_is_physiologic(panel.ph) {
            log::warn!(
                "pH {:.3} outside the physiologic band {:?}; computing anyway",
                panel.ph,
                ranges.ph_alive
            );
            advisories.push(Advisory::NonPhysiologicPh { ph: panel.ph });
        }

        let hco3_actual = panel
            .hco3_mmol_l
            .unwrap_or_else(|| bicarbonate_plasma(panel.ph, panel.pco2_kpa));

        let cthb_mmol_l = panel.cthb_g_dl.map(hemoglobin_mmol_l);

        let gap = match (panel.na_mmol_l, panel.cl_mmol_l) {
            (Some(na), Some(cl)) => {
                let mut ag = anion_gap(na, cl, hco3_actual);
                if let Some(alb) = panel.albumin_g_dl {
                    ag += albumin_correction(alb);
                }
                Some(ag)
            }
            _ => None,
        };
        let gap_k = match (panel.na_mmol_l, panel.k_mmol_l, panel.cl_mmol_l) {
            (Some(na), Some(k), Some(cl)) => Some(anion_gap_with_potassium(na, k, cl, hco3_actual)),
            _ => None,
        };

        // Renal estimates route by population: Schwartz for children (needs
        // height), MDRD and CKD-EPI for adults (need age). The adult
        // equations cannot fail once the Child arm is excluded.
        let mut renal_mdrd = None;
        let mut renal_ckd_epi = None;
        let mut renal_schwartz = None;
        if let (Some(subject), Some(ccrea)) = (subject, panel.ccrea_umol_l) {
            match subject.sex {
                Sex::Child => match subject.height_m {
                    Some(height_m) => renal_schwartz = Some(egfr_schwartz(ccrea, height_m)),
                    None => log::debug!("pediatric eGFR skipped: no height supplied"),
                },
                Sex::Male | Sex::Female => match subject.age_years {
                    Some(age) => {
                        renal_mdrd = egfr_mdrd(subject.sex, ccrea, age, subject.black_skin).ok();
                        renal_ckd_epi =
                            egfr_ckd_epi(subject.sex, ccrea, age, subject.black_skin).ok();
                    }
                    None => log::debug!("adult eGFR skipped: no age supplied"),
                },
            }
        }

        Self {
            hco3_actual,
            base_excess_standard: base_excess_nomogram(panel.ph, panel.pco2_kpa, SBE_CTHB_MMOL_L),
            base_excess_approx: base_excess_approx(panel.ph, hco3_actual),
            base_excess_actual: cthb_mmol_l
                .map(|cthb| base_excess_nomogram(panel.ph, panel.pco2_kpa, cthb)),
            anion_gap: gap,
            anion_gap_k: gap_k,
            osmolarity: match (panel.na_mmol_l, panel.glucose_mmol_l) {
                (Some(na), Some(glu)) => Some(osmolarity(na, glu)),
                _ => None,
            },
            hematocrit: cthb_mmol_l.map(hematocrit),
            ph_at_temp: panel.body_temp_c.map(|t| ph_at_temperature(panel.ph, t)),
            pco2_at_temp: panel
                .body_temp_c
                .map(|t| pco2_at_temperature(panel.pco2_kpa, t)),
            egfr_mdrd: renal_mdrd,
            egfr_ckd_epi: renal_ckd_epi,
            egfr_schwartz: renal_schwartz,
            advisories,
        }
    }
}

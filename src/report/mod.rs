//! Narrative report assembly.
//!
//! Turns a verdict plus derived quantities into an ordered list of labeled
//! lines the way a clinician reads a gas: verdict first, then bicarbonate and
//! base excess, then the gap story, then electrolytes, then kidneys. The
//! assembler only formats and flags; every number passes through unaltered
//! from the evaluation step.

use serde::Serialize;

use crate::classifier::{
    estimated_sbe_ryabov, expected_ph, winters_pco2_acidosis, winters_pco2_alkalosis,
    DiagnosisVerdict, PrimaryDisorder, RespiratoryTempo,
};
use crate::config::{ReferenceRanges, KPA_PER_MMHG};
use crate::formulas::{ckd_stage, corrected_sodium, delta_ratio, DeltaRatioBand};
use crate::panel::{DerivedQuantities, MeasurementPanel};

/// Flag for a value against a reference band. Bounds count as normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RangeFlag {
    Low,
    Normal,
    High,
}

impl RangeFlag {
    /// Flag a value against a `(lo, hi)` band.
    pub fn from_value(value: f64, band: (f64, f64)) -> Self {
        if value < band.0 {
            RangeFlag::Low
        } else if value > band.1 {
            RangeFlag::High
        } else {
            RangeFlag::Normal
        }
    }

    fn word(self) -> &'static str {
        match self {
            RangeFlag::Low => "low",
            RangeFlag::Normal => "normal",
            RangeFlag::High => "high",
        }
    }
}

/// One labeled line of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub label: &'static str,
    pub text: String,
}

/// Ordered narrative report. Render with [`Report::to_text`] or serialize
/// the whole structure to JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub lines: Vec<ReportLine>,
}

impl Report {
    /// Assemble the narrative for one evaluated panel.
    ///
    /// The renal section appears only when the evaluation carried
    /// demographics and creatinine; absent derived values simply drop their
    /// lines.
    pub fn assemble(
        panel: &MeasurementPanel,
        derived: &DerivedQuantities,
        verdict: &DiagnosisVerdict,
    ) -> Self {
        let ranges = ReferenceRanges::default();
        let mut lines = Vec::new();

        let verdict_text = match &verdict.qualifier {
            Some(q) => format!("{} ({})", verdict.summary, q),
            None => verdict.summary.to_string(),
        };
        lines.push(ReportLine {
            label: "Verdict",
            text: verdict_text,
        });

        lines.push(ReportLine {
            label: "HCO3(P)",
            text: format!(
                "{:.1} mmol/L ({})",
                derived.hco3_actual,
                RangeFlag::from_value(derived.hco3_actual, ranges.hco3).word()
            ),
        });
        lines.push(ReportLine {
            label: "SBE",
            text: format!(
                "{:.1} mEq/L ({})",
                derived.base_excess_standard,
                RangeFlag::from_value(derived.base_excess_standard, ranges.sbe).word()
            ),
        });

        if let Some(ag) = derived.anion_gap {
            lines.push(Self::anion_gap_line(ag, derived.hco3_actual, verdict, &ranges));
        }

        if let Some(k) = panel.k_mmol_l {
            lines.push(ReportLine {
                label: "K+",
                text: format!(
                    "{:.1} mmol/L ({})",
                    k,
                    RangeFlag::from_value(k, ranges.potassium).word()
                ),
            });
        }
        if let Some(na) = panel.na_mmol_l {
            let mut text = format!(
                "{:.0} mmol/L ({})",
                na,
                RangeFlag::from_value(na, ranges.sodium).word()
            );
            if let Some(glu) = panel.glucose_mmol_l {
                let corrected = corrected_sodium(na, glu);
                if corrected - na > 5.0 {
                    text.push_str(&format!(
                        "; corrected for glucose {:.0} mmol/L, treat hypernatremia targets against this",
                        corrected
                    ));
                }
            }
            lines.push(ReportLine {
                label: "Na+",
                text,
            });
        }
        if let Some(cl) = panel.cl_mmol_l {
            lines.push(ReportLine {
                label: "Cl-",
                text: format!(
                    "{:.0} mmol/L ({})",
                    cl,
                    RangeFlag::from_value(cl, ranges.chloride).word()
                ),
            });
        }

        if let Some(osm) = derived.osmolarity {
            lines.push(ReportLine {
                label: "Osmolarity",
                text: Self::osmolarity_text(osm, &ranges),
            });
        }

        lines.extend(Self::renal_lines(derived));

        lines.push(ReportLine {
            label: "SBE (Ryabov est.)",
            text: format!(
                "{:.1} mEq/L",
                estimated_sbe_ryabov(panel.ph, panel.pco2_kpa)
            ),
        });
        // Both compensation tempos for comparison; branch selection upstream
        // always used the acute one
        lines.push(ReportLine {
            label: "Expected pH by pCO2",
            text: format!(
                "acute {:.2}, chronic {:.2}",
                expected_ph(panel.pco2_kpa, RespiratoryTempo::Acute),
                expected_ph(panel.pco2_kpa, RespiratoryTempo::Chronic)
            ),
        });
        match verdict.disorder {
            PrimaryDisorder::MetabolicAcidosis => {
                let expected = winters_pco2_acidosis(derived.hco3_actual);
                lines.push(ReportLine {
                    label: "Expected pCO2 (Winters)",
                    text: format!(
                        "{:.1}-{:.1} mmHg (measured {:.1})",
                        expected - 2.0,
                        expected + 2.0,
                        panel.pco2_kpa / KPA_PER_MMHG
                    ),
                });
            }
            PrimaryDisorder::MetabolicAlkalosis => {
                let expected = winters_pco2_alkalosis(derived.hco3_actual);
                lines.push(ReportLine {
                    label: "Expected pCO2 (Winters)",
                    text: format!(
                        "{:.1}-{:.1} mmHg (measured {:.1})",
                        expected - 1.5,
                        expected + 1.5,
                        panel.pco2_kpa / KPA_PER_MMHG
                    ),
                });
            }
            _ => {}
        }

        Report { lines }
    }

    fn anion_gap_line(
        ag: f64,
        hco3: f64,
        verdict: &DiagnosisVerdict,
        ranges: &ReferenceRanges,
    ) -> ReportLine {
        let flag = RangeFlag::from_value(ag, ranges.anion_gap);
        let text = match (verdict.disorder, flag) {
            (PrimaryDisorder::MetabolicAcidosis, RangeFlag::High) => {
                let mut text = format!("{:.1} mEq/L, high anion gap metabolic acidosis", ag);
                if let Some(ratio) = delta_ratio(ag, hco3) {
                    let band = DeltaRatioBand::from_ratio(ratio);
                    text.push_str(&format!(
                        "; delta ratio {:.2}: {}",
                        ratio,
                        band.description()
                    ));
                }
                text
            }
            (PrimaryDisorder::MetabolicAcidosis, _) => format!(
                "{:.1} mEq/L ({}), normal anion gap acidosis: suspect GI or renal bicarbonate loss",
                ag,
                flag.word()
            ),
            (_, RangeFlag::Normal) => format!("{:.1} mEq/L (normal)", ag),
            (_, _) => format!(
                "{:.1} mEq/L, unexpectedly {} for this verdict",
                ag,
                flag.word()
            ),
        };
        ReportLine {
            label: "Anion gap",
            text,
        }
    }

    fn osmolarity_text(osm: f64, ranges: &ReferenceRanges) -> String {
        if osm > 330.0 {
            format!("{:.1} mOsm/L, coma risk", osm)
        } else if osm > 320.0 {
            format!("{:.1} mOsm/L, acute kidney injury risk", osm)
        } else if osm > 290.0 {
            format!("{:.1} mOsm/L, thirst expected", osm)
        } else {
            format!(
                "{:.1} mOsm/L ({})",
                osm,
                RangeFlag::from_value(osm, ranges.osmolarity).word()
            )
        }
    }

    fn renal_lines(derived: &DerivedQuantities) -> Vec<ReportLine> {
        let mut lines = Vec::new();
        if let Some(gfr) = derived.egfr_mdrd {
            lines.push(ReportLine {
                label: "eGFR (MDRD)",
                text: format!("{:.0} mL/min/1.73 m2", gfr),
            });
        }
        if let Some(gfr) = derived.egfr_ckd_epi {
            lines.push(ReportLine {
                label: "eGFR (CKD-EPI)",
                text: format!("{:.0} mL/min/1.73 m2", gfr),
            });
        }
        if let Some(gfr) = derived.egfr_schwartz {
            lines.push(ReportLine {
                label: "eGFR (Schwartz)",
                text: format!("{:.0} mL/min/1.73 m2", gfr),
            });
        }
        // CKD conclusion prefers CKD-EPI for adults, Schwartz for children
        if let Some(gfr) = derived.egfr_ckd_epi.or(derived.egfr_schwartz) {
            lines.push(ReportLine {
                label: "Kidneys",
                text: ckd_stage(gfr).description().to_string(),
            });
        }
        lines
    }

    /// Plain-text rendering, one `label: text` line per entry.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line.label);
            out.push_str(": ");
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }

    /// Pretty JSON rendering of the full line list.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

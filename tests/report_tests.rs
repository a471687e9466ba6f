//! End-to-end pipeline tests: panel in, narrative out.
//!
//! Each case is one analyzer printout evaluated, classified, and assembled,
//! checking that the narrative carries the verdict and the flags a clinician
//! would read off the same numbers.

use abg_engine::{
    classify, DerivedQuantities, MeasurementPanel, PrimaryDisorder, Report, Sex, Subject,
    KPA_PER_MMHG,
};

fn evaluate(panel: &MeasurementPanel, subject: Option<&Subject>) -> Report {
    let derived = DerivedQuantities::evaluate_for(panel, subject);
    let verdict = classify(panel.ph, panel.pco2_kpa);
    Report::assemble(panel, &derived, &verdict)
}

#[test]
fn test_normal_gas_narrative() {
    let report = evaluate(&MeasurementPanel::blood_gas(7.40, 5.33), None);
    let text = report.to_text();
    assert!(text.starts_with("Verdict: Normal ABG\n"), "text:\n{}", text);
    assert!(text.contains("HCO3(P):"), "text:\n{}", text);
    assert!(text.contains("(normal)"), "text:\n{}", text);
}

#[test]
fn test_dka_narrative() {
    // Ketoacidosis pattern: acidemia, hyperventilation, wide gap,
    // hyperglycemia with dilutional hyponatremia
    let mut panel = MeasurementPanel::blood_gas(7.12, 18.0 * KPA_PER_MMHG);
    panel.na_mmol_l = Some(128.0);
    panel.cl_mmol_l = Some(97.0);
    panel.k_mmol_l = Some(5.6);
    panel.glucose_mmol_l = Some(35.0);

    let verdict = classify(panel.ph, panel.pco2_kpa);
    assert_eq!(verdict.disorder, PrimaryDisorder::MetabolicAcidosis);

    let report = evaluate(&panel, None);
    let text = report.to_text();
    assert!(
        text.contains("high anion gap metabolic acidosis"),
        "text:\n{}",
        text
    );
    assert!(text.contains("delta ratio"), "text:\n{}", text);
    assert!(text.contains("K+: 5.6 mmol/L (high)"), "text:\n{}", text);
    // Glucose 35 mmol/L shifts sodium by >5 mmol/L
    assert!(text.contains("corrected for glucose"), "text:\n{}", text);
    assert!(text.contains("Expected pCO2 (Winters)"), "text:\n{}", text);
}

#[test]
fn test_hyperosmolar_banding() {
    let mut panel = MeasurementPanel::blood_gas(7.33, 5.0);
    panel.na_mmol_l = Some(155.0);
    panel.cl_mmol_l = Some(110.0);
    panel.glucose_mmol_l = Some(25.0);

    // 2*155 + 25 = 335 mOsm/L
    let report = evaluate(&panel, None);
    let text = report.to_text();
    assert!(text.contains("coma risk"), "text:\n{}", text);
}

#[test]
fn test_renal_narrative_for_adult() {
    let mut panel = MeasurementPanel::blood_gas(7.40, 5.33);
    panel.ccrea_umol_l = Some(350.0);
    let subject = Subject {
        sex: Sex::Female,
        age_years: Some(62.0),
        ..Subject::default()
    };
    let report = evaluate(&panel, Some(&subject));
    let text = report.to_text();
    assert!(text.contains("eGFR (MDRD)"), "text:\n{}", text);
    assert!(text.contains("eGFR (CKD-EPI)"), "text:\n{}", text);
    // Creatinine 350 umol/L in an elderly woman is deep CKD
    assert!(text.contains("Kidneys: CKD"), "text:\n{}", text);
}

#[test]
fn test_renal_section_absent_without_subject() {
    let mut panel = MeasurementPanel::blood_gas(7.40, 5.33);
    panel.ccrea_umol_l = Some(350.0);
    let report = evaluate(&panel, None);
    assert!(!report.to_text().contains("eGFR"));
}

#[test]
fn test_expected_ph_reports_both_tempos() {
    // Compensated CO2 retainer at 58 mmHg: acute expectation 7.26, chronic
    // 7.35. Both projections belong in the research lines even though only
    // the acute one drives classification.
    let report = evaluate(&MeasurementPanel::blood_gas(7.37, 58.0 * KPA_PER_MMHG), None);
    let text = report.to_text();
    assert!(
        text.contains("Expected pH by pCO2: acute 7.26, chronic 7.35"),
        "text:\n{}",
        text
    );
}

#[test]
fn test_compensation_lines_share_label() {
    // Acidosis and alkalosis compensation checks carry the same label
    let mut acidotic = MeasurementPanel::blood_gas(7.30, 35.0 * KPA_PER_MMHG);
    acidotic.na_mmol_l = Some(140.0);
    acidotic.cl_mmol_l = Some(102.0);
    let text = evaluate(&acidotic, None).to_text();
    assert!(text.contains("Expected pCO2 (Winters)"), "text:\n{}", text);

    let mut alkalotic = MeasurementPanel::blood_gas(7.46, 40.0 * KPA_PER_MMHG);
    alkalotic.hco3_mmol_l = Some(30.0);
    let text = evaluate(&alkalotic, None).to_text();
    assert!(text.contains("Expected pCO2 (Winters)"), "text:\n{}", text);
}

#[test]
fn test_json_round_trips_labels() {
    let report = evaluate(&MeasurementPanel::blood_gas(7.40, 5.33), None);
    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["lines"][0]["label"], "Verdict");
    assert_eq!(value["lines"][0]["text"], "Normal ABG");
}

#[test]
fn test_panel_from_json_to_narrative() {
    let panel: MeasurementPanel = serde_json::from_str(
        r#"{"ph": 7.46, "pco2_kpa": 4.6663, "hco3_mmol_l": 27.0}"#,
    )
    .unwrap();
    let derived = DerivedQuantities::evaluate(&panel);
    assert_eq!(derived.hco3_actual, 27.0);
    let verdict = classify(panel.ph, panel.pco2_kpa);
    let report = Report::assemble(&panel, &derived, &verdict);
    assert!(report
        .to_text()
        .contains("Metabolic alkalosis, no respiratory comp."));
}

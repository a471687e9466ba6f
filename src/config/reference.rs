//! Physical constants and normal reference bands.
//!
//! Constants are fixed magic numbers from the reference equations; the exact
//! values matter for bit-exact compatibility with historical analyzer data
//! and must not be "improved" or re-derived.

use serde::Serialize;

/// kPa per mmHg: 1 mmHg = 0.133322368 kPa.
///
/// This exact constant is shared with the reference analyzer equations;
/// round-tripping mmHg -> kPa -> mmHg through it is exact to floating-point
/// precision.
pub const KPA_PER_MMHG: f64 = 0.133322368;

/// Hemoglobin mass-to-molar factor: ctHb (g/dL) / 1.61140 = ctHb (mmol/L).
///
/// Reference: Radiometer ABL800 Flex Reference Manual, p. 6-14.
pub const HB_GDL_PER_MMOL: f64 = 1.61140;

/// Creatinine molar mass factor: cCrea (umol/L) = 88.40 * cCrea (mg/dL).
pub const CREA_UMOL_PER_MGDL: f64 = 88.40;

/// Normal reference bands for measured and derived blood quantities.
///
/// Band semantics are inclusive on both ends: a value exactly on a bound is
/// normal. Sources per field; mixed-population bands follow the analyzer
/// manual rather than any single paper.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReferenceRanges {
    /// Arterial pH, dimensionless
    pub ph: (f64, f64),
    /// pH survivable ("alive") borders; outside is flagged non-physiologic
    pub ph_alive: (f64, f64),
    /// pCO2 band, mmHg (classifier contract operates in mmHg)
    pub pco2_mmhg: (f64, f64),
    /// Actual bicarbonate, mmol/L
    pub hco3: (f64, f64),
    /// Standard base excess, mEq/L
    pub sbe: (f64, f64),
    /// Anion gap without potassium, mEq/L
    pub anion_gap: (f64, f64),
    /// Serum osmolarity, mOsm/L
    pub osmolarity: (f64, f64),
    /// Serum potassium, mmol/L
    pub potassium: (f64, f64),
    /// Serum sodium, mmol/L
    pub sodium: (f64, f64),
    /// Serum chloride, mmol/L
    pub chloride: (f64, f64),
    /// Serum albumin, g/dL
    pub albumin: (f64, f64),
    /// Fasting glucose, mmol/L
    pub glucose: (f64, f64),
}

/// Mean albumin level, g/dL. Normalizes anion gap in hypoalbuminemia
/// (Figge 1998).
pub const ALBUMIN_MEAN_GDL: f64 = 4.4;

/// Mean normal pCO2, mmHg, anchor of the expected-pH compensation lines.
pub const PCO2_MEAN_MMHG: f64 = 40.0;

/// Mean normal pH.
pub const PH_MEAN: f64 = 7.40;

impl Default for ReferenceRanges {
    fn default() -> Self {
        Self {
            ph: (7.35, 7.45),
            ph_alive: (6.8, 7.8),
            pco2_mmhg: (35.0, 45.0),
            hco3: (22.0, 26.0),
            sbe: (-2.0, 2.0),
            // Without potassium; changing this would skew the delta-ratio
            // interpretation, which assumes a normal AG of 12
            anion_gap: (7.0, 16.0),
            osmolarity: (275.0, 295.0),
            potassium: (3.5, 5.3),
            sodium: (135.0, 145.0),
            chloride: (98.0, 115.0),
            albumin: (3.5, 5.0),
            glucose: (4.1, 6.1),
        }
    }
}

impl ReferenceRanges {
    /// Is the pH inside the survivable window [6.8, 7.8]?
    pub fn ph_is_physiologic(&self, ph: f64) -> bool {
        self.ph_alive.0 <= ph && ph <= self.ph_alive.1
    }
}

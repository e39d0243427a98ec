use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{round_to, Document};

// ═══════════════════════════════════════════════════════════
// Physiological bounds
// ═══════════════════════════════════════════════════════════

/// Inclusive clamp range for one vital sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalBounds {
    pub min: f64,
    pub max: f64,
}

impl VitalBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const HEART_RATE_BOUNDS: VitalBounds = VitalBounds::new(30.0, 200.0);
pub const SYSTOLIC_BP_BOUNDS: VitalBounds = VitalBounds::new(60.0, 250.0);
pub const DIASTOLIC_BP_BOUNDS: VitalBounds = VitalBounds::new(30.0, 150.0);
pub const OXYGEN_SATURATION_BOUNDS: VitalBounds = VitalBounds::new(50.0, 100.0);
pub const TEMPERATURE_BOUNDS: VitalBounds = VitalBounds::new(35.0, 42.0);
pub const RESPIRATORY_RATE_BOUNDS: VitalBounds = VitalBounds::new(8.0, 45.0);
pub const PAIN_SCORE_BOUNDS: VitalBounds = VitalBounds::new(0.0, 10.0);

// ═══════════════════════════════════════════════════════════
// Samples and readings
// ═══════════════════════════════════════════════════════════

/// Unclamped vital values, one per measured sign.
///
/// Also used for per-vital targets and noise scales in the generator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VitalSample {
    pub heart_rate: f64,
    pub systolic_bp: f64,
    pub diastolic_bp: f64,
    pub oxygen_saturation: f64,
    pub temperature: f64,
    pub respiratory_rate: f64,
    pub pain_score: f64,
}

/// A single vitals document in the `metrics-patient-vitals` data stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsReading {
    #[serde(rename = "@timestamp")]
    pub timestamp: DateTime<Utc>,
    pub patient_id: String,
    pub ward: String,
    pub heart_rate: f64,
    pub systolic_bp: f64,
    pub diastolic_bp: f64,
    pub oxygen_saturation: f64,
    pub temperature: f64,
    pub respiratory_rate: f64,
    pub pain_score: u8,
}

impl VitalsReading {
    /// Build a reading from raw values.
    ///
    /// Every value is clamped to its bound before rounding to one decimal;
    /// pain is truncated to an integer after clamping.
    pub fn from_sample(
        timestamp: DateTime<Utc>,
        patient_id: &str,
        ward: &str,
        raw: &VitalSample,
    ) -> Self {
        let tenth = |bounds: VitalBounds, v: f64| round_to(bounds.clamp(v), 1);
        Self {
            timestamp,
            patient_id: patient_id.to_string(),
            ward: ward.to_string(),
            heart_rate: tenth(HEART_RATE_BOUNDS, raw.heart_rate),
            systolic_bp: tenth(SYSTOLIC_BP_BOUNDS, raw.systolic_bp),
            diastolic_bp: tenth(DIASTOLIC_BP_BOUNDS, raw.diastolic_bp),
            oxygen_saturation: tenth(OXYGEN_SATURATION_BOUNDS, raw.oxygen_saturation),
            temperature: tenth(TEMPERATURE_BOUNDS, raw.temperature),
            respiratory_rate: tenth(RESPIRATORY_RATE_BOUNDS, raw.respiratory_rate),
            pain_score: PAIN_SCORE_BOUNDS.clamp(raw.pain_score).trunc() as u8,
        }
    }

    /// True when every field lies inside its declared bound.
    pub fn within_bounds(&self) -> bool {
        HEART_RATE_BOUNDS.contains(self.heart_rate)
            && SYSTOLIC_BP_BOUNDS.contains(self.systolic_bp)
            && DIASTOLIC_BP_BOUNDS.contains(self.diastolic_bp)
            && OXYGEN_SATURATION_BOUNDS.contains(self.oxygen_saturation)
            && TEMPERATURE_BOUNDS.contains(self.temperature)
            && RESPIRATORY_RATE_BOUNDS.contains(self.respiratory_rate)
            && PAIN_SCORE_BOUNDS.contains(f64::from(self.pain_score))
    }
}

impl Document for VitalsReading {}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let raw = VitalSample {
            heart_rate: 260.0,
            systolic_bp: 20.0,
            diastolic_bp: 200.0,
            oxygen_saturation: 101.7,
            temperature: 30.0,
            respiratory_rate: 60.0,
            pain_score: 12.9,
        };
        let r = VitalsReading::from_sample(ts(), "PAT-001", "ICU", &raw);
        assert_eq!(r.heart_rate, 200.0);
        assert_eq!(r.systolic_bp, 60.0);
        assert_eq!(r.diastolic_bp, 150.0);
        assert_eq!(r.oxygen_saturation, 100.0);
        assert_eq!(r.temperature, 35.0);
        assert_eq!(r.respiratory_rate, 45.0);
        assert_eq!(r.pain_score, 10);
        assert!(r.within_bounds());
    }

    #[test]
    fn pain_truncates_after_clamp() {
        let raw = VitalSample {
            pain_score: 3.97,
            ..sample_in_range()
        };
        assert_eq!(VitalsReading::from_sample(ts(), "PAT-001", "ICU", &raw).pain_score, 3);

        let raw = VitalSample {
            pain_score: -0.4,
            ..sample_in_range()
        };
        assert_eq!(VitalsReading::from_sample(ts(), "PAT-001", "ICU", &raw).pain_score, 0);
    }

    #[test]
    fn values_round_to_one_decimal() {
        let raw = VitalSample {
            heart_rate: 88.2649,
            ..sample_in_range()
        };
        let r = VitalsReading::from_sample(ts(), "PAT-001", "ICU", &raw);
        assert_eq!(r.heart_rate, 88.3);
    }

    #[test]
    fn timestamp_serializes_with_at_sign() {
        let r = VitalsReading::from_sample(ts(), "PAT-005", "maternity", &sample_in_range());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["@timestamp"], "2026-03-01T12:00:00Z");
        assert!(json.get("timestamp").is_none());
        assert!(r.doc_id().is_none());
    }

    fn sample_in_range() -> VitalSample {
        VitalSample {
            heart_rate: 76.0,
            systolic_bp: 115.0,
            diastolic_bp: 72.0,
            oxygen_saturation: 98.0,
            temperature: 36.7,
            respiratory_rate: 15.0,
            pain_score: 1.0,
        }
    }
}

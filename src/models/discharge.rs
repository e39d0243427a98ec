use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::DischargeStatus;
use super::Document;

/// Number of independent readiness checks in a discharge plan.
pub const DISCHARGE_CRITERIA_TOTAL: u8 = 7;

/// The 7-point discharge readiness checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DischargeCriteria {
    pub vitals_stable: bool,
    pub no_fever_24h: bool,
    pub pain_controlled: bool,
    pub mobility_adequate: bool,
    pub oral_medication_tolerated: bool,
    pub follow_up_scheduled: bool,
    pub patient_educated: bool,
}

impl DischargeCriteria {
    fn as_array(&self) -> [bool; DISCHARGE_CRITERIA_TOTAL as usize] {
        [
            self.vitals_stable,
            self.no_fever_24h,
            self.pain_controlled,
            self.mobility_adequate,
            self.oral_medication_tolerated,
            self.follow_up_scheduled,
            self.patient_educated,
        ]
    }

    pub fn met_count(&self) -> u8 {
        self.as_array().iter().filter(|met| **met).count() as u8
    }
}

/// A `discharge-plans` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DischargePlan {
    pub patient_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: DischargeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_discharge_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub criteria: DischargeCriteria,
    pub criteria_met_count: u8,
    pub criteria_total: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharge_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
}

impl DischargePlan {
    pub fn new(
        patient_id: &str,
        criteria: DischargeCriteria,
        status: DischargeStatus,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            created_at: now,
            updated_at: now,
            status,
            target_discharge_date: None,
            criteria,
            criteria_met_count: criteria.met_count(),
            criteria_total: DISCHARGE_CRITERIA_TOTAL,
            discharge_notes: None,
            approved_by: None,
        }
    }
}

impl Document for DischargePlan {
    fn doc_id(&self) -> Option<String> {
        Some(self.patient_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_met() -> DischargeCriteria {
        DischargeCriteria {
            vitals_stable: true,
            no_fever_24h: true,
            pain_controlled: true,
            mobility_adequate: true,
            oral_medication_tolerated: true,
            follow_up_scheduled: true,
            patient_educated: true,
        }
    }

    #[test]
    fn met_count_counts_true_flags() {
        assert_eq!(DischargeCriteria::default().met_count(), 0);
        assert_eq!(all_met().met_count(), 7);
        let partial = DischargeCriteria {
            follow_up_scheduled: false,
            patient_educated: false,
            ..all_met()
        };
        assert_eq!(partial.met_count(), 5);
    }

    #[test]
    fn plan_flattens_criteria_into_document() {
        let plan = DischargePlan::new("PAT-002", all_met(), DischargeStatus::Approved, Utc::now());
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["vitals_stable"], true);
        assert_eq!(json["criteria_met_count"], 7);
        assert_eq!(json["criteria_total"], 7);
        assert_eq!(json["status"], "approved");
        assert!(json.get("criteria").is_none());
        assert!(json.get("approved_by").is_none());
    }
}

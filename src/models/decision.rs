use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{DecisionType, RiskLevel};
use super::Document;

/// Append-only audit entry in `agent-decisions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    #[serde(skip)]
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub agent_name: String,
    pub patient_id: String,
    pub decision_type: DecisionType,
    pub action: String,
    pub reasoning: String,
    /// Clamped to [0.0, 1.0] on construction.
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub requires_review: bool,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl DecisionRecord {
    pub fn new(
        agent_name: &str,
        patient_id: &str,
        decision_type: DecisionType,
        action: &str,
        reasoning: &str,
        confidence: f64,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            agent_name: agent_name.to_string(),
            patient_id: patient_id.to_string(),
            decision_type,
            action: action.to_string(),
            reasoning: reasoning.to_string(),
            confidence: confidence.clamp(0.0, 1.0),
            risk_level,
            // Critical risk always goes to a human.
            requires_review: risk_level == RiskLevel::Critical,
            metadata: serde_json::Value::Object(Default::default()),
        }
    }
}

impl Document for DecisionRecord {
    fn doc_id(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_risk_requires_review() {
        let r = DecisionRecord::new(
            "guardian-agent",
            "PAT-008",
            DecisionType::SafetyAlert,
            "escalate",
            "O2 trending down over 3h window",
            0.9,
            RiskLevel::Critical,
        );
        assert!(r.requires_review);
        let low = DecisionRecord::new(
            "recovery-agent",
            "PAT-002",
            DecisionType::RecoveryAssessment,
            "continue monitoring",
            "on track",
            0.8,
            RiskLevel::Low,
        );
        assert!(!low.requires_review);
    }

    #[test]
    fn confidence_clamped() {
        let r = DecisionRecord::new(
            "triage-agent",
            "PAT-007",
            DecisionType::Triage,
            "admit",
            "MEWS 6",
            1.7,
            RiskLevel::High,
        );
        assert_eq!(r.confidence, 1.0);
    }

    #[test]
    fn id_not_serialized_into_document() {
        let r = DecisionRecord::new(
            "capacity-agent",
            "PAT-004",
            DecisionType::CapacityCheck,
            "step down",
            "ICU at 92%",
            0.7,
            RiskLevel::Moderate,
        );
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["decision_type"], "capacity_check");
        assert_eq!(json["risk_level"], "moderate");
        assert_eq!(r.doc_id(), Some(r.id.to_string()));
    }
}

use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Severity {
    Critical => "critical",
    High => "high",
    Moderate => "moderate",
    Low => "low",
});

str_enum!(PatientStatus {
    Admitted => "admitted",
    Discharged => "discharged",
    Transferred => "transferred",
});

str_enum!(DischargeStatus {
    Pending => "pending",
    Approved => "approved",
    Discharged => "discharged",
    Deferred => "deferred",
});

str_enum!(RiskLevel {
    Low => "low",
    Moderate => "moderate",
    High => "high",
    Critical => "critical",
});

str_enum!(DecisionType {
    Triage => "triage",
    RecoveryAssessment => "recovery_assessment",
    CapacityCheck => "capacity_check",
    DischargeEvaluation => "discharge_evaluation",
    SafetyAlert => "safety_alert",
});

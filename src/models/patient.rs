use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::enums::{PatientStatus, Severity};
use super::Document;

static PATIENT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^PAT-\d{3}$").expect("valid patient id regex"));

/// Whether `id` has the `PAT-NNN` shape.
pub fn is_valid_patient_id(id: &str) -> bool {
    PATIENT_ID_PATTERN.is_match(id)
}

/// An admitted patient as stored in the `patients` index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub patient_id: String,
    pub name: String,
    pub age: u32,
    pub diagnosis: String,
    pub severity: Severity,
    pub ward: String,
    pub admitted_at: DateTime<Utc>,
    pub comorbidities: Vec<String>,
    pub status: PatientStatus,
    pub attending_physician: String,
    pub notes: String,
}

impl Document for Patient {
    fn doc_id(&self) -> Option<String> {
        Some(self.patient_id.clone())
    }
}

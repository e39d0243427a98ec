//! Fixed demo roster: eight patients with distinct clinical arcs and the
//! seven wards they occupy.

use chrono::{DateTime, Duration, Utc};

use super::arc::{vitals, ArcKind, DipPattern, Trajectory};
use super::ONSET_WINDOW;
use crate::models::{Patient, PatientStatus, Severity, WardCapacity, WardCounts};

/// Static description of one demo patient and how their vitals evolve.
#[derive(Debug, Clone)]
pub struct PatientProfile {
    pub patient_id: &'static str,
    pub name: &'static str,
    pub age: u32,
    pub diagnosis: &'static str,
    pub severity: Severity,
    pub ward: &'static str,
    pub hours_since_admission: i64,
    pub comorbidities: &'static [&'static str],
    pub attending_physician: &'static str,
    pub notes: &'static str,
    pub arc: ArcKind,
}

impl PatientProfile {
    pub fn to_patient(&self, now: DateTime<Utc>) -> Patient {
        Patient {
            patient_id: self.patient_id.to_string(),
            name: self.name.to_string(),
            age: self.age,
            diagnosis: self.diagnosis.to_string(),
            severity: self.severity,
            ward: self.ward.to_string(),
            admitted_at: now - Duration::hours(self.hours_since_admission),
            comorbidities: self.comorbidities.iter().map(|c| c.to_string()).collect(),
            status: PatientStatus::Admitted,
            attending_physician: self.attending_physician.to_string(),
            notes: self.notes.to_string(),
        }
    }
}

/// The eight demo patients, in seeding order.
pub fn roster() -> Vec<PatientProfile> {
    vec![
        PatientProfile {
            patient_id: "PAT-001",
            name: "Rajesh Kumar",
            age: 67,
            diagnosis: "Pneumonia with COPD exacerbation",
            severity: Severity::Critical,
            ward: "ICU",
            hours_since_admission: 72,
            comorbidities: &["COPD", "hypertension", "type-2 diabetes"],
            attending_physician: "Dr. Anil Mehta",
            notes: "Deteriorating course. Increasing oxygen requirements and rising \
                    inflammatory markers. Expected to trip a guardian alert.",
            arc: ArcKind::Steady(Trajectory::new(
                vitals(88.0, 130.0, 82.0, 93.0, 37.8, 20.0, 4.0),
                vitals(115.0, 145.0, 90.0, 86.0, 39.5, 30.0, 8.0),
                vitals(3.0, 5.0, 3.0, 1.0, 0.15, 1.5, 0.5),
            )),
        },
        PatientProfile {
            patient_id: "PAT-002",
            name: "Ananya Sharma",
            age: 34,
            diagnosis: "Post-appendectomy recovery",
            severity: Severity::Low,
            ward: "surgical",
            hours_since_admission: 60,
            comorbidities: &[],
            attending_physician: "Dr. Sneha Kulkarni",
            notes: "Uncomplicated laparoscopic appendectomy. Recovering well and \
                    tolerating oral feeds. Clean discharge candidate.",
            arc: ArcKind::Steady(Trajectory::new(
                vitals(95.0, 125.0, 80.0, 94.0, 37.6, 18.0, 5.0),
                vitals(75.0, 118.0, 75.0, 98.0, 36.8, 15.0, 1.0),
                vitals(2.0, 4.0, 3.0, 0.5, 0.1, 1.0, 0.4),
            )),
        },
        PatientProfile {
            patient_id: "PAT-003",
            name: "Vikram Patel",
            age: 72,
            diagnosis: "Congestive heart failure (NYHA Class III)",
            severity: Severity::High,
            ward: "cardiac",
            hours_since_admission: 96,
            comorbidities: &["atrial fibrillation", "chronic kidney disease", "hypertension"],
            attending_physician: "Dr. Ravi Shankar",
            notes: "Slowly improving on IV diuretics. Still needs supplemental oxygen. \
                    Not ready for discharge.",
            arc: ArcKind::Fluctuating {
                trajectory: Trajectory::new(
                    vitals(100.0, 140.0, 88.0, 90.0, 37.4, 22.0, 3.0),
                    vitals(90.0, 132.0, 82.0, 94.0, 37.0, 19.0, 2.0),
                    vitals(4.0, 6.0, 4.0, 1.2, 0.15, 1.5, 0.5),
                ),
                dips: DipPattern {
                    period: 24,
                    width: 3,
                    heart_rate: (5.0, 10.0),
                    oxygen_drop: (1.0, 3.0),
                    respiratory_rate: (1.0, 3.0),
                },
            },
        },
        PatientProfile {
            patient_id: "PAT-004",
            name: "Meera Reddy",
            age: 45,
            diagnosis: "Diabetic Ketoacidosis (DKA)",
            severity: Severity::High,
            ward: "ICU",
            hours_since_admission: 50,
            comorbidities: &["type-1 diabetes", "hypothyroidism"],
            attending_physician: "Dr. Priya Venkatesh",
            notes: "Rapid recovery from DKA. Anion gap closed, glucose stabilising on \
                    subcutaneous insulin. ICU transfer-out candidate.",
            arc: ArcKind::FrontLoaded {
                trajectory: Trajectory::new(
                    vitals(120.0, 100.0, 60.0, 90.0, 38.5, 28.0, 6.0),
                    vitals(78.0, 120.0, 76.0, 98.0, 36.9, 16.0, 1.0),
                    vitals(2.5, 4.0, 3.0, 0.6, 0.12, 1.2, 0.4),
                ),
                exponent: 0.5,
            },
        },
        PatientProfile {
            patient_id: "PAT-005",
            name: "Priya Nair",
            age: 28,
            diagnosis: "Normal vaginal delivery",
            severity: Severity::Low,
            ward: "maternity",
            hours_since_admission: 36,
            comorbidities: &[],
            attending_physician: "Dr. Kavitha Menon",
            notes: "Uncomplicated delivery, mother and baby doing well. Normal vitals \
                    throughout. Easy discharge.",
            arc: ArcKind::Steady(Trajectory::steady(
                vitals(76.0, 115.0, 72.0, 98.0, 36.7, 15.0, 1.0),
                vitals(4.0, 5.0, 3.0, 0.5, 0.15, 1.0, 0.5),
            )),
        },
        PatientProfile {
            patient_id: "PAT-006",
            name: "Suresh Iyer",
            age: 78,
            diagnosis: "Right hip fracture (intertrochanteric)",
            severity: Severity::Moderate,
            ward: "orthopedic",
            hours_since_admission: 80,
            comorbidities: &["osteoporosis", "benign prostatic hyperplasia"],
            attending_physician: "Dr. Ashok Nair",
            notes: "Post-operative day 3 after hip hemiarthroplasty. Vitals stable but \
                    mobility severely limited. Discharge deferred until physiotherapy \
                    goals are met.",
            arc: ArcKind::Steady(Trajectory::new(
                vitals(74.0, 135.0, 80.0, 96.0, 36.9, 16.0, 6.0),
                vitals(74.0, 135.0, 80.0, 96.0, 36.9, 16.0, 4.0),
                vitals(3.0, 5.0, 3.0, 0.5, 0.1, 1.0, 0.6),
            )),
        },
        PatientProfile {
            patient_id: "PAT-007",
            name: "Amit Joshi",
            age: 55,
            diagnosis: "Acute ST-elevation myocardial infarction (STEMI)",
            severity: Severity::Critical,
            ward: "emergency",
            hours_since_admission: 4,
            comorbidities: &["smoking", "hyperlipidemia", "family history of CAD"],
            attending_physician: "Dr. Sanjay Gupta",
            notes: "Arrived by ambulance 4 hours ago with crushing chest pain. Emergency \
                    PCI performed, stent deployed to LAD. Hemodynamically unstable. \
                    Emergency triage.",
            arc: ArcKind::LateOnset {
                trajectory: Trajectory::new(
                    vitals(118.0, 90.0, 55.0, 89.0, 37.2, 24.0, 9.0),
                    vitals(105.0, 105.0, 65.0, 93.0, 37.2, 21.0, 7.0),
                    vitals(6.0, 12.0, 8.0, 1.5, 0.2, 2.0, 0.5),
                ),
                window: ONSET_WINDOW,
            },
        },
        PatientProfile {
            patient_id: "PAT-008",
            name: "Lakshmi Devi",
            age: 62,
            diagnosis: "Severe persistent asthma with acute exacerbation",
            severity: Severity::Moderate,
            ward: "respiratory",
            hours_since_admission: 52,
            comorbidities: &["GERD", "obesity", "allergic rhinitis"],
            attending_physician: "Dr. Mohan Rao",
            notes: "Admitted for acute asthma exacerbation. Appeared to improve on \
                    nebulisation and steroids. Subtle hidden deterioration in the last \
                    few hours.",
            arc: ArcKind::HiddenDeterioration {
                baseline: Trajectory::new(
                    vitals(82.0, 122.0, 76.0, 95.0, 37.3, 17.0, 2.0),
                    vitals(78.0, 122.0, 76.0, 96.0, 37.0, 16.0, 2.0),
                    vitals(3.0, 5.0, 3.0, 0.5, 0.1, 1.0, 0.4),
                ),
                onset: Trajectory::new(
                    vitals(78.0, 122.0, 76.0, 96.0, 37.0, 16.0, 2.0),
                    vitals(88.0, 122.0, 76.0, 91.0, 37.4, 22.0, 4.0),
                    vitals(2.0, 5.0, 3.0, 0.4, 0.1, 0.8, 0.4),
                ),
                window: ONSET_WINDOW,
            },
        },
    ]
}

// ward, name, beds total/occupied, ventilators total/in use, nurses, doctors
type WardRow = (&'static str, &'static str, u32, u32, u32, u32, u32, u32);

const WARDS: [WardRow; 7] = [
    ("ICU", "Intensive Care Unit", 12, 11, 8, 6, 14, 4),
    ("surgical", "General Surgical Ward", 30, 22, 0, 0, 10, 3),
    ("cardiac", "Cardiac Care Unit", 20, 16, 4, 2, 8, 3),
    ("emergency", "Emergency Department", 15, 12, 3, 1, 12, 5),
    ("maternity", "Maternity Ward", 10, 4, 0, 0, 6, 2),
    ("orthopedic", "Orthopedic Ward", 16, 10, 0, 0, 6, 2),
    ("respiratory", "Respiratory Medicine Ward", 14, 9, 3, 1, 6, 2),
];

/// Raw counts for the seven wards.
pub fn ward_counts() -> Vec<WardCounts> {
    WARDS
        .iter()
        .map(
            |&(ward, ward_name, total, occupied, vent_total, vent_used, nurses, doctors)| {
                WardCounts {
                    ward,
                    ward_name,
                    total_beds: total,
                    occupied_beds: occupied,
                    ventilators_total: vent_total,
                    ventilators_in_use: vent_used,
                    nurses_on_duty: nurses,
                    doctors_on_duty: doctors,
                }
            },
        )
        .collect()
}

/// Patient documents with admission times relative to `now`.
pub fn patients(now: DateTime<Utc>) -> Vec<Patient> {
    roster().iter().map(|p| p.to_patient(now)).collect()
}

/// Capacity documents stamped with `now`.
pub fn capacity(now: DateTime<Utc>) -> Vec<WardCapacity> {
    ward_counts()
        .iter()
        .map(|w| WardCapacity::from_counts(w, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::is_valid_patient_id;
    use std::collections::HashSet;

    #[test]
    fn eight_patients_seven_wards() {
        let now = Utc::now();
        let patients = patients(now);
        assert_eq!(patients.len(), 8);
        assert_eq!(capacity(now).len(), 7);

        let ids: HashSet<_> = patients.iter().map(|p| p.patient_id.as_str()).collect();
        assert_eq!(ids.len(), 8);
        assert!(patients.iter().all(|p| is_valid_patient_id(&p.patient_id)));
        assert!(patients.iter().all(|p| p.status == PatientStatus::Admitted));
    }

    #[test]
    fn every_patient_ward_has_capacity() {
        let wards: HashSet<_> = ward_counts().iter().map(|w| w.ward).collect();
        for profile in roster() {
            assert!(wards.contains(profile.ward), "{} has no ward", profile.patient_id);
        }
    }

    #[test]
    fn admission_offsets() {
        let now = Utc::now();
        let stemi = roster()
            .into_iter()
            .find(|p| p.patient_id == "PAT-007")
            .unwrap()
            .to_patient(now);
        assert_eq!(now - stemi.admitted_at, Duration::hours(4));
        assert_eq!(stemi.severity, Severity::Critical);
    }

    #[test]
    fn arcs_cover_every_story() {
        let labels: HashSet<_> = roster().iter().map(|p| p.arc.label()).collect();
        for expected in [
            "steady",
            "fluctuating",
            "front_loaded",
            "late_onset",
            "hidden_deterioration",
        ] {
            assert!(labels.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn icu_capacity_derived() {
        let icu = capacity(Utc::now())
            .into_iter()
            .find(|w| w.ward == "ICU")
            .unwrap();
        assert_eq!(icu.available_beds, 1);
        assert_eq!(icu.occupancy_rate, 0.917);
    }
}

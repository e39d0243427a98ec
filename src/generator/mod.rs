//! Synthetic hospital dataset.
//!
//! Eight patients, seven wards, and 48 hours of vitals at 15-minute spacing.
//! A fixed seed makes the vitals reproducible for a fixed clock.

pub mod arc;
pub mod roster;
pub mod timeline;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::models::{Patient, VitalsReading, WardCapacity};

pub use arc::{ArcKind, DipPattern, Trajectory};
pub use roster::{capacity, patients, roster, ward_counts, PatientProfile};
pub use timeline::{aligned_now, reading_timestamps};

/// 48 hours at 15-minute spacing.
pub const READINGS_PER_PATIENT: usize = 192;
pub const READING_INTERVAL_MINUTES: i64 = 15;
/// Trailing samples (4 hours) used by late-onset and hidden-deterioration arcs.
pub const ONSET_WINDOW: usize = 16;
pub const DEFAULT_SEED: u64 = 42;

/// Everything the seeder writes, generated against one clock reading.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub patients: Vec<Patient>,
    pub capacity: Vec<WardCapacity>,
    pub vitals: Vec<VitalsReading>,
}

impl Dataset {
    pub fn generate(now: DateTime<Utc>, seed: u64) -> Self {
        let profiles = roster();
        let timestamps = reading_timestamps(now, READINGS_PER_PATIENT, READING_INTERVAL_MINUTES);
        Self {
            patients: profiles.iter().map(|p| p.to_patient(now)).collect(),
            capacity: capacity(now),
            vitals: generate_vitals(&profiles, &timestamps, seed),
        }
    }
}

/// Vitals for every profile over `timestamps`, in roster order.
///
/// One generator is shared across patients, so output depends on roster
/// order as well as the seed.
pub fn generate_vitals(
    profiles: &[PatientProfile],
    timestamps: &[DateTime<Utc>],
    seed: u64,
) -> Vec<VitalsReading> {
    let mut rng = StdRng::seed_from_u64(seed);
    let len = timestamps.len();
    let mut readings = Vec::with_capacity(profiles.len() * len);

    for profile in profiles {
        let before = readings.len();
        for (i, ts) in timestamps.iter().enumerate() {
            if let Some(raw) = profile.arc.sample(i, len, &mut rng) {
                readings.push(VitalsReading::from_sample(
                    *ts,
                    profile.patient_id,
                    profile.ward,
                    &raw,
                ));
            }
        }
        tracing::debug!(
            patient_id = profile.patient_id,
            arc = profile.arc.label(),
            readings = readings.len() - before,
            "Generated vitals"
        );
    }

    readings
}

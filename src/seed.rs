//! Populate the remote store with the synthetic dataset.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::{ClientError, SearchClient, WriteMode};
use crate::config::{INDEX_CAPACITY, INDEX_PATIENTS, INDEX_VITALS};
use crate::generator::{Dataset, DEFAULT_SEED};

/// Vitals documents per `_bulk` request.
pub const VITALS_BATCH_SIZE: usize = 500;

/// Documents written per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub patients: usize,
    pub capacity: usize,
    pub vitals: usize,
}

/// Generate the dataset against `now` and write it: patients, capacity,
/// then vitals in batches.
///
/// Patients and capacity carry natural ids and overwrite on re-run. Vitals
/// are create-only, so re-seeding the same timeline fails on the first
/// batch. Nothing is rolled back on failure.
pub fn seed_all(client: &SearchClient, now: DateTime<Utc>) -> Result<SeedReport, ClientError> {
    let data = Dataset::generate(now, DEFAULT_SEED);
    seed_dataset(client, &data)
}

pub fn seed_dataset(client: &SearchClient, data: &Dataset) -> Result<SeedReport, ClientError> {
    tracing::info!(count = data.patients.len(), index = INDEX_PATIENTS, "Seeding patients");
    let patients = client.bulk(INDEX_PATIENTS, &data.patients, WriteMode::Index)?;

    tracing::info!(count = data.capacity.len(), index = INDEX_CAPACITY, "Seeding ward capacity");
    let capacity = client.bulk(INDEX_CAPACITY, &data.capacity, WriteMode::Index)?;

    let batches = data.vitals.len().div_ceil(VITALS_BATCH_SIZE);
    tracing::info!(
        count = data.vitals.len(),
        batches,
        index = INDEX_VITALS,
        "Seeding vitals"
    );
    let mut vitals = 0;
    for (n, batch) in data.vitals.chunks(VITALS_BATCH_SIZE).enumerate() {
        vitals += client.bulk(INDEX_VITALS, batch, WriteMode::Create)?.indexed;
        tracing::info!(batch = n + 1, of = batches, written = vitals, "Vitals batch written");
    }

    Ok(SeedReport {
        patients: patients.indexed,
        capacity: capacity.indexed,
        vitals,
    })
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{round_to, Document};

/// Raw bed, staff and equipment counts for one ward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardCounts {
    pub ward: &'static str,
    pub ward_name: &'static str,
    pub total_beds: u32,
    pub occupied_beds: u32,
    pub ventilators_total: u32,
    pub ventilators_in_use: u32,
    pub nurses_on_duty: u32,
    pub doctors_on_duty: u32,
}

/// Fields derived from raw counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedCapacity {
    /// May go negative if a ward is over capacity; not enforced.
    pub available_beds: i64,
    /// `occupied / total`, 3 decimals. 0.0 for a ward with no beds.
    pub occupancy_rate: f64,
    /// Nurses per occupied bed, 2 decimals. An empty ward counts as one patient.
    pub staffing_ratio: f64,
}

pub fn derive_capacity(
    total_beds: u32,
    occupied_beds: u32,
    nurses_on_duty: u32,
) -> DerivedCapacity {
    let occupancy_rate = if total_beds == 0 {
        0.0
    } else {
        round_to(f64::from(occupied_beds) / f64::from(total_beds), 3)
    };
    DerivedCapacity {
        available_beds: i64::from(total_beds) - i64::from(occupied_beds),
        occupancy_rate,
        staffing_ratio: round_to(f64::from(nurses_on_duty) / f64::from(occupied_beds.max(1)), 2),
    }
}

/// A `hospital-capacity` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardCapacity {
    pub ward: String,
    pub ward_name: String,
    pub total_beds: u32,
    pub occupied_beds: u32,
    pub available_beds: i64,
    pub occupancy_rate: f64,
    pub ventilators_total: u32,
    pub ventilators_in_use: u32,
    pub nurses_on_duty: u32,
    pub doctors_on_duty: u32,
    pub staffing_ratio: f64,
    pub updated_at: DateTime<Utc>,
}

impl WardCapacity {
    pub fn from_counts(counts: &WardCounts, updated_at: DateTime<Utc>) -> Self {
        let derived =
            derive_capacity(counts.total_beds, counts.occupied_beds, counts.nurses_on_duty);
        Self {
            ward: counts.ward.to_string(),
            ward_name: counts.ward_name.to_string(),
            total_beds: counts.total_beds,
            occupied_beds: counts.occupied_beds,
            available_beds: derived.available_beds,
            occupancy_rate: derived.occupancy_rate,
            ventilators_total: counts.ventilators_total,
            ventilators_in_use: counts.ventilators_in_use,
            nurses_on_duty: counts.nurses_on_duty,
            doctors_on_duty: counts.doctors_on_duty,
            staffing_ratio: derived.staffing_ratio,
            updated_at,
        }
    }
}

impl Document for WardCapacity {
    fn doc_id(&self) -> Option<String> {
        Some(self.ward.clone())
    }
}

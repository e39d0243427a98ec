//! Record types for the documents this crate writes to the search engine.
//!
//! Everything here is plain data serialized with serde at the process
//! boundary. The remote store owns these documents after seeding.

pub mod capacity;
pub mod decision;
pub mod discharge;
pub mod enums;
pub mod patient;
pub mod vitals;

pub use capacity::*;
pub use decision::*;
pub use discharge::*;
pub use enums::*;
pub use patient::*;
pub use vitals::*;

use thiserror::Error;

/// A string did not name any variant of a domain enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} value: '{value}'")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
}

/// A record that can be bulk-written.
///
/// Records with a natural key return it from `doc_id` so that repeated
/// writes overwrite instead of duplicating. Time-series records return
/// `None` and let the store derive the id.
pub trait Document: serde::Serialize {
    fn doc_id(&self) -> Option<String> {
        None
    }
}

/// Round to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(0.916_666, 3), 0.917);
        assert_eq!(round_to(1.272_7, 2), 1.27);
        assert_eq!(round_to(98.04, 1), 98.0);
    }
}

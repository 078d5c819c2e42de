//! Data types for the Blood Bank server
//!
//! This module contains the documents stored by the server: the two
//! append-only event logs, the derived availability rows and donor records.

mod availability;
mod donation;
mod donor;
mod recipient;

pub use availability::{AvailabilityAggregate, AvailabilityKey};
pub use donation::{DonationEvent, DonationReceipt, NewDonation};
pub use donor::{Donor, LoginRequest, NewDonor};
pub use recipient::{NewRecipientRequest, RecipientEvent, RecipientReceipt};

/// Generate a fresh document id
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Equality filter on an optional field value (None matches everything)
pub fn matches_filter(value: &str, filter: Option<&str>) -> bool {
    filter.map_or(true, |f| value == f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_ids_are_unique() {
        let a = new_document_id();
        let b = new_document_id();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_matches_filter_is_exact() {
        assert!(matches_filter("O+", None));
        assert!(matches_filter("O+", Some("O+")));
        assert!(!matches_filter("O+", Some("o+")));
        assert!(!matches_filter("O+", Some("O-")));
    }
}

//! Document Store
//!
//! Collection storage behind the [`DocumentStore`] trait. Every method is a
//! single atomic operation on one document (or one append); there are no
//! multi-document transactions. The availability collection enforces a
//! uniqueness constraint on `(blood_type, location)` and the donor collection
//! on `email`.
//!
//! # Layout
//!
//! ```text
//! data/
//! ├── donations.jsonl      append-only, fsync per event
//! ├── recipients.jsonl     append-only, fsync per event
//! ├── availability.jsonl   rewritten atomically on every change
//! └── donors.jsonl         rewritten atomically on every change
//! ```
//!
//! # Revisions
//!
//! Every committed availability change takes the next store revision and
//! stamps it on the row. An [`AvailabilityObserver`] hears about the change
//! before the store releases its lock, so observers see changes in
//! revision order.

mod config;
mod file;
#[cfg(test)]
pub(crate) mod testing;

pub use config::StoreConfig;
pub use file::FileStore;

use thiserror::Error;

use crate::inventory::Delta;
use crate::types::{AvailabilityAggregate, AvailabilityKey, DonationEvent, Donor, RecipientEvent};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected an insert
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    /// The store contradicted itself (e.g. duplicate rejected, then not found)
    #[error("inconsistent store state: {0}")]
    Inconsistent(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a conditional decrement
#[derive(Debug, Clone, PartialEq)]
pub enum Decrement {
    /// One unit was taken; the row after the update
    Applied(AvailabilityAggregate),
    /// Row exists but holds no units; left untouched
    OutOfStock(AvailabilityAggregate),
    /// No row for the key
    Missing,
}

/// Receives committed availability changes, in revision order
///
/// Called with the store lock held; implementations must not call back
/// into the store.
pub trait AvailabilityObserver: Send + Sync {
    fn availability_committed(&self, row: &AvailabilityAggregate, cause: Delta);
}

/// Collection operations used by the bank service and the inventory engine
pub trait DocumentStore: Send + Sync {
    // availability (unique on blood_type + location)

    fn find_availability(&self, key: &AvailabilityKey) -> StoreResult<Option<AvailabilityAggregate>>;

    /// Insert a new row, failing with [`StoreError::DuplicateKey`] if the key exists
    fn insert_availability(&self, row: AvailabilityAggregate) -> StoreResult<AvailabilityAggregate>;

    /// Atomically add one unit; a non-empty `phone` replaces the stored one.
    /// Returns `None` when no row exists for the key.
    fn increment_availability(
        &self,
        key: &AvailabilityKey,
        phone: &str,
    ) -> StoreResult<Option<AvailabilityAggregate>>;

    /// Atomically take one unit only if the row holds more than zero
    fn decrement_availability(&self, key: &AvailabilityKey) -> StoreResult<Decrement>;

    fn list_availability(&self, blood_type: Option<&str>) -> StoreResult<Vec<AvailabilityAggregate>>;

    /// Revision of the last committed availability change, 0 when none
    fn availability_revision(&self) -> u64;

    // event logs

    fn append_donation(&self, event: &DonationEvent) -> StoreResult<()>;

    fn list_donations(&self, blood_group: Option<&str>) -> StoreResult<Vec<DonationEvent>>;

    fn append_recipient(&self, event: &RecipientEvent) -> StoreResult<()>;

    fn list_recipients(&self, blood_group: Option<&str>) -> StoreResult<Vec<RecipientEvent>>;

    // donors (unique on email)

    /// Insert a donor, failing with [`StoreError::DuplicateKey`] if the email exists
    fn insert_donor(&self, donor: Donor) -> StoreResult<Donor>;

    fn find_donor_by_email(&self, email: &str) -> StoreResult<Option<Donor>>;

    fn list_donors(&self) -> StoreResult<Vec<Donor>>;

    /// Returns false when no donor has the id
    fn delete_donor(&self, id: &str) -> StoreResult<bool>;
}

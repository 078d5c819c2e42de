//! Inventory Reconciliation Engine
//!
//! Keeps the availability rows in step with the donation and recipient
//! logs. It is the only writer of availability rows.
//!
//! # Donation path (+1)
//!
//! ```text
//! find(key) ──found──► increment ──────────────────────────► Incremented
//!    │
//!    └─missing─► insert(units = 1) ──ok──────────────────────► Created
//!                   │
//!                   └─DuplicateKey─► increment(key) ──found──► ConflictRecovered
//!                                          └─missing─► Err(Inconsistent)
//! ```
//!
//! Concurrent first donations for a new key race on the insert. The store's
//! unique constraint picks one winner; every loser re-reads by the same key
//! and adds its unit to the winner's row.
//!
//! # Recipient path (-1)
//!
//! A single conditional decrement in the store. Missing rows and rows at
//! zero are rejected as [`InventoryError::Unavailable`] and nothing changes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::store::{Decrement, DocumentStore, StoreError};
use crate::types::{AvailabilityAggregate, AvailabilityKey};

/// Signed unit change for one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delta {
    /// A donation adds one unit
    Increment,
    /// An admitted recipient request takes one unit
    Decrement,
}

impl Delta {
    pub fn value(self) -> i64 {
        match self {
            Delta::Increment => 1,
            Delta::Decrement => -1,
        }
    }
}

/// Successful reconciliation, with the row after the change
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// First donation for the key created the row
    Created(AvailabilityAggregate),
    /// Existing row gained a unit
    Incremented(AvailabilityAggregate),
    /// Lost the create race; unit added to the winner's row
    ConflictRecovered(AvailabilityAggregate),
    /// Row gave up a unit
    Decremented(AvailabilityAggregate),
}

impl Reconciliation {
    pub fn aggregate(&self) -> &AvailabilityAggregate {
        match self {
            Reconciliation::Created(row)
            | Reconciliation::Incremented(row)
            | Reconciliation::ConflictRecovered(row)
            | Reconciliation::Decremented(row) => row,
        }
    }

    pub fn into_aggregate(self) -> AvailabilityAggregate {
        match self {
            Reconciliation::Created(row)
            | Reconciliation::Incremented(row)
            | Reconciliation::ConflictRecovered(row)
            | Reconciliation::Decremented(row) => row,
        }
    }
}

/// Reconciliation failures
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("requested blood type not available at this location ({0})")]
    Unavailable(AvailabilityKey),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Applies unit deltas to availability rows
pub struct InventoryEngine<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for InventoryEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DocumentStore + ?Sized> InventoryEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Apply `delta` to the row for `key`
    ///
    /// `phone_hint` seeds the phone of a newly created row and replaces the
    /// stored one on later donations when non-empty. Decrements ignore it.
    pub fn apply_delta(
        &self,
        key: &AvailabilityKey,
        delta: Delta,
        phone_hint: &str,
    ) -> Result<Reconciliation, InventoryError> {
        let outcome = match delta {
            Delta::Increment => self.add_unit(key, phone_hint)?,
            Delta::Decrement => self.take_unit(key)?,
        };

        debug!(
            key = %key,
            delta = delta.value(),
            units = outcome.aggregate().available_units,
            "availability reconciled"
        );
        Ok(outcome)
    }

    fn add_unit(&self, key: &AvailabilityKey, phone: &str) -> Result<Reconciliation, InventoryError> {
        if self.store.find_availability(key)?.is_some() {
            // A row found here is never deleted, so the increment cannot miss.
            return match self.store.increment_availability(key, phone)? {
                Some(row) => Ok(Reconciliation::Incremented(row)),
                None => Err(inconsistent(key, "row disappeared before increment")),
            };
        }

        match self
            .store
            .insert_availability(AvailabilityAggregate::first_unit(key, phone))
        {
            Ok(row) => Ok(Reconciliation::Created(row)),
            Err(StoreError::DuplicateKey(_)) => {
                warn!(key = %key, "lost first-insert race, adding unit to existing row");
                match self.store.increment_availability(key, phone)? {
                    Some(row) => Ok(Reconciliation::ConflictRecovered(row)),
                    None => Err(inconsistent(key, "duplicate key reported but row not found")),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    fn take_unit(&self, key: &AvailabilityKey) -> Result<Reconciliation, InventoryError> {
        match self.store.decrement_availability(key)? {
            Decrement::Applied(row) => Ok(Reconciliation::Decremented(row)),
            Decrement::OutOfStock(_) | Decrement::Missing => {
                Err(InventoryError::Unavailable(key.clone()))
            }
        }
    }
}

fn inconsistent(key: &AvailabilityKey, detail: &str) -> InventoryError {
    InventoryError::Store(StoreError::Inconsistent(format!("availability {}: {}", key, detail)))
}

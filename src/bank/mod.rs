//! Blood Bank - service layer
//!
//! Event ingestion (donations, recipient requests), read-only queries and
//! the donor registry, on top of a [`DocumentStore`]. Inventory changes go
//! through the [`InventoryEngine`]; nothing here writes availability rows
//! directly.

mod accounts;
mod ingestion;
mod query;

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::inventory::{InventoryEngine, InventoryError};
use crate::store::{DocumentStore, FileStore, StoreError};
use crate::types::{
    AvailabilityAggregate, AvailabilityKey, DonationEvent, DonationReceipt, Donor, LoginRequest,
    NewDonation, NewDonor, NewRecipientRequest, RecipientEvent, RecipientReceipt,
};
use crate::validation::{validate_blood_group, ValidationError};

/// Errors surfaced to callers of the bank service
#[derive(Debug, Error)]
pub enum BankError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("requested blood type not available at this location ({0})")]
    Unavailable(AvailabilityKey),
    #[error("email already registered: {0}")]
    EmailTaken(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("donor not found: {0}")]
    NotFound(String),
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("persistence error: {0}")]
    Persistence(#[from] StoreError),
}

impl From<InventoryError> for BankError {
    fn from(e: InventoryError) -> Self {
        match e {
            InventoryError::Unavailable(key) => BankError::Unavailable(key),
            InventoryError::Store(e) => BankError::Persistence(e),
        }
    }
}

/// Result type for bank operations
pub type BankResult<T> = Result<T, BankError>;

/// Blood bank service shared by all request handlers
pub struct BloodBank {
    pub(crate) store: Arc<dyn DocumentStore>,
    pub(crate) inventory: InventoryEngine<dyn DocumentStore>,
    pub(crate) bcrypt_cost: u32,
}

impl BloodBank {
    /// Create a bank over an existing store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            inventory: InventoryEngine::new(Arc::clone(&store)),
            store,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Bank over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(FileStore::in_memory()))
    }

    /// Override the bcrypt cost used for new passwords
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

// Event ingestion (from ingestion.rs)
impl BloodBank {
    pub fn record_donation(&self, donation: NewDonation) -> BankResult<DonationReceipt> {
        ingestion::record_donation(self, donation)
    }

    pub fn record_recipient_request(
        &self,
        request: NewRecipientRequest,
    ) -> BankResult<RecipientReceipt> {
        ingestion::record_recipient_request(self, request)
    }
}

// Query operations (from query.rs)
impl BloodBank {
    pub fn list_availability(&self, blood_type: Option<&str>) -> BankResult<Vec<AvailabilityAggregate>> {
        query::list_availability(self, blood_type)
    }

    /// Store revision of the last availability change
    pub fn availability_revision(&self) -> u64 {
        self.store.availability_revision()
    }

    pub fn list_donations(&self, blood_group: Option<&str>) -> BankResult<Vec<DonationEvent>> {
        query::list_donations(self, blood_group)
    }

    pub fn list_recipients(&self, blood_group: Option<&str>) -> BankResult<Vec<RecipientEvent>> {
        query::list_recipients(self, blood_group)
    }
}

// Donor registry (from accounts.rs)
impl BloodBank {
    pub fn register_donor(&self, donor: NewDonor) -> BankResult<Donor> {
        accounts::register_donor(self, donor)
    }

    pub fn login(&self, login: LoginRequest) -> BankResult<Donor> {
        accounts::login(self, login)
    }

    pub fn list_donors(&self) -> BankResult<Vec<Donor>> {
        accounts::list_donors(self)
    }

    pub fn delete_donor(&self, id: &str) -> BankResult<()> {
        accounts::delete_donor(self, id)
    }
}

/// Log a soft-validation warning for unusual blood groups
pub(crate) fn warn_non_standard(blood_group: &str) {
    if let Some(warning) = validate_blood_group(blood_group) {
        warn!("{}", warning);
    }
}

//! Blood Bank Server
//!
//! Coordinates blood donations: a donor registry, an append-only log of
//! donations and admitted recipient requests, and per blood type, per
//! location availability derived from those logs.
//!
//! # Modules
//!
//! - `types`: Documents (donation/recipient events, availability rows, donors)
//! - `store`: Document store trait and the JSON Lines file store
//! - `inventory`: Reconciliation engine keeping availability in step with events
//! - `bank`: Service layer (ingestion, queries, donor registry)
//! - `validation`: Required-field and blood group checks
//! - `api`: Axum REST endpoints and the WebSocket availability feed
//! - `config`: Environment configuration
//! - `utils`: File helpers (atomic rewrites, JSON Lines)
//!
//! # Example
//!
//! ```no_run
//! use blood_bank::{BloodBank, NewDonation, NewRecipientRequest};
//!
//! let bank = BloodBank::in_memory();
//! bank.record_donation(NewDonation::new("Ravi", "O+", "CityA", "555-0101")).unwrap();
//!
//! let receipt = bank
//!     .record_recipient_request(NewRecipientRequest::new("Mina", "O+", "CityA"))
//!     .unwrap();
//! assert_eq!(receipt.availability.available_units, 0);
//! ```

pub mod api;
pub mod bank;
pub mod config;
pub mod inventory;
pub mod store;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used items at crate root
pub use bank::{BankError, BankResult, BloodBank};
pub use config::Config;
pub use inventory::{Delta, InventoryEngine, InventoryError, Reconciliation};
pub use store::{DocumentStore, FileStore, StoreConfig, StoreError};
pub use types::{
    AvailabilityAggregate, AvailabilityKey, DonationEvent, DonationReceipt, Donor, NewDonation,
    NewDonor, NewRecipientRequest, RecipientEvent, RecipientReceipt,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


//! Store double for unit tests: lookup races and injected write failures

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;

use super::{Decrement, DocumentStore, FileStore, StoreError, StoreResult};
use crate::types::{AvailabilityAggregate, AvailabilityKey, DonationEvent, Donor, RecipientEvent};

/// Store write that a [`ScriptedStore`] makes fail with an IO error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fault {
    Increment,
    AppendRecipient,
}

/// In-memory store with scripted misbehaviour
pub(crate) struct ScriptedStore {
    inner: FileStore,
    /// The first `racers` lookups all see the pre-insert state before any
    /// of them proceeds
    gate: Barrier,
    racers: usize,
    lookups: AtomicUsize,
    /// Pretend every insert collides and lookups never find a row
    phantom_duplicates: bool,
    fault: Option<Fault>,
}

impl ScriptedStore {
    pub(crate) fn racing(racers: usize) -> Self {
        Self {
            inner: FileStore::in_memory(),
            gate: Barrier::new(racers.max(1)),
            racers,
            lookups: AtomicUsize::new(0),
            phantom_duplicates: false,
            fault: None,
        }
    }

    pub(crate) fn phantom() -> Self {
        Self {
            phantom_duplicates: true,
            ..Self::racing(0)
        }
    }

    pub(crate) fn failing(fault: Fault) -> Self {
        Self {
            fault: Some(fault),
            ..Self::racing(0)
        }
    }

    fn check(&self, op: Fault) -> StoreResult<()> {
        if self.fault == Some(op) {
            return Err(StoreError::Io(io::Error::new(io::ErrorKind::Other, "disk full")));
        }
        Ok(())
    }
}

impl DocumentStore for ScriptedStore {
    fn find_availability(&self, key: &AvailabilityKey) -> StoreResult<Option<AvailabilityAggregate>> {
        if self.phantom_duplicates {
            return Ok(None);
        }
        let found = self.inner.find_availability(key)?;
        if self.lookups.fetch_add(1, Ordering::SeqCst) < self.racers {
            self.gate.wait();
        }
        Ok(found)
    }

    fn insert_availability(&self, row: AvailabilityAggregate) -> StoreResult<AvailabilityAggregate> {
        if self.phantom_duplicates {
            return Err(StoreError::DuplicateKey(row.key().to_string()));
        }
        self.inner.insert_availability(row)
    }

    fn increment_availability(
        &self,
        key: &AvailabilityKey,
        phone: &str,
    ) -> StoreResult<Option<AvailabilityAggregate>> {
        if self.phantom_duplicates {
            return Ok(None);
        }
        self.check(Fault::Increment)?;
        self.inner.increment_availability(key, phone)
    }

    fn decrement_availability(&self, key: &AvailabilityKey) -> StoreResult<Decrement> {
        self.inner.decrement_availability(key)
    }

    fn list_availability(&self, blood_type: Option<&str>) -> StoreResult<Vec<AvailabilityAggregate>> {
        self.inner.list_availability(blood_type)
    }

    fn availability_revision(&self) -> u64 {
        self.inner.availability_revision()
    }

    fn append_donation(&self, event: &DonationEvent) -> StoreResult<()> {
        self.inner.append_donation(event)
    }

    fn list_donations(&self, blood_group: Option<&str>) -> StoreResult<Vec<DonationEvent>> {
        self.inner.list_donations(blood_group)
    }

    fn append_recipient(&self, event: &RecipientEvent) -> StoreResult<()> {
        self.check(Fault::AppendRecipient)?;
        self.inner.append_recipient(event)
    }

    fn list_recipients(&self, blood_group: Option<&str>) -> StoreResult<Vec<RecipientEvent>> {
        self.inner.list_recipients(blood_group)
    }

    fn insert_donor(&self, donor: Donor) -> StoreResult<Donor> {
        self.inner.insert_donor(donor)
    }

    fn find_donor_by_email(&self, email: &str) -> StoreResult<Option<Donor>> {
        self.inner.find_donor_by_email(email)
    }

    fn list_donors(&self) -> StoreResult<Vec<Donor>> {
        self.inner.list_donors()
    }

    fn delete_donor(&self, id: &str) -> StoreResult<bool> {
        self.inner.delete_donor(id)
    }
}

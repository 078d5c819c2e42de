//! File-backed document store
//!
//! All collections live in memory behind one mutex; each trait method holds
//! the lock for its whole read-check-write, which is what makes the unique
//! constraints and the increment/decrement updates atomic. With a data
//! directory, every change is written through before it becomes visible.
//!
//! The event logs load tolerantly (a torn final append is skipped). The
//! availability and donor files are only ever replaced whole, so a
//! malformed line there fails [`FileStore::open`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, info};

use super::{AvailabilityObserver, Decrement, DocumentStore, StoreConfig, StoreError, StoreResult};
use crate::inventory::Delta;
use crate::types::{
    matches_filter, AvailabilityAggregate, AvailabilityKey, DonationEvent, Donor, RecipientEvent,
};
use crate::utils::{
    append_jsonl, atomic_write_jsonl, cleanup_temp_files, read_jsonl, read_jsonl_strict,
};

#[derive(Debug, Default)]
struct Collections {
    availability: Vec<AvailabilityAggregate>,
    donations: Vec<DonationEvent>,
    recipients: Vec<RecipientEvent>,
    donors: Vec<Donor>,
}

/// Document store persisted as JSON Lines files (or memory only)
pub struct FileStore {
    config: Option<StoreConfig>,
    collections: Mutex<Collections>,
    /// Only advanced while `collections` is locked
    revision: AtomicU64,
    observer: Option<Arc<dyn AvailabilityObserver>>,
}

impl FileStore {
    /// Open (or create) a store in the configured data directory
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        std::fs::create_dir_all(config.data_dir())?;

        let cleaned = cleanup_temp_files(config.data_dir())?;
        if cleaned > 0 {
            info!(cleaned, "removed leftover temp files");
        }

        let collections = Collections {
            availability: read_jsonl_strict(config.availability_path())?,
            donations: read_jsonl(config.donations_path())?,
            recipients: read_jsonl(config.recipients_path())?,
            donors: read_jsonl_strict(config.donors_path())?,
        };
        let revision = collections
            .availability
            .iter()
            .map(|row| row.revision)
            .max()
            .unwrap_or(0);

        info!(
            data_dir = %config.data_dir().display(),
            availability = collections.availability.len(),
            donations = collections.donations.len(),
            recipients = collections.recipients.len(),
            donors = collections.donors.len(),
            revision,
            "store opened"
        );

        Ok(Self {
            config: Some(config),
            collections: Mutex::new(collections),
            revision: AtomicU64::new(revision),
            observer: None,
        })
    }

    /// Store without persistence, for tests and throwaway servers
    pub fn in_memory() -> Self {
        Self {
            config: None,
            collections: Mutex::new(Collections::default()),
            revision: AtomicU64::new(0),
            observer: None,
        }
    }

    /// Report every committed availability change to `observer`
    pub fn with_observer(mut self, observer: Arc<dyn AvailabilityObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Data directory, if persistent
    pub fn config(&self) -> Option<&StoreConfig> {
        self.config.as_ref()
    }

    /// Persist the availability collection as it would look after a change
    fn write_availability(&self, rows: &[AvailabilityAggregate]) -> StoreResult<()> {
        if let Some(config) = &self.config {
            atomic_write_jsonl(config.availability_path(), rows)?;
        }
        Ok(())
    }

    fn write_donors(&self, donors: &[Donor]) -> StoreResult<()> {
        if let Some(config) = &self.config {
            atomic_write_jsonl(config.donors_path(), donors)?;
        }
        Ok(())
    }

    fn next_revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire) + 1
    }

    /// Publish a committed row; the caller still holds the collections lock
    fn commit_revision(&self, row: &AvailabilityAggregate, cause: Delta) {
        self.revision.store(row.revision, Ordering::Release);
        if let Some(observer) = &self.observer {
            observer.availability_committed(row, cause);
        }
    }

    /// Apply `update` to the row for `key`, persisting before committing
    ///
    /// Returns the updated row, or `None` when there is no row for the key.
    fn update_availability<F>(
        &self,
        collections: &mut Collections,
        key: &AvailabilityKey,
        cause: Delta,
        update: F,
    ) -> StoreResult<Option<AvailabilityAggregate>>
    where
        F: FnOnce(&mut AvailabilityAggregate),
    {
        let Some(index) = collections.availability.iter().position(|r| r.has_key(key)) else {
            return Ok(None);
        };

        let mut row = collections.availability[index].clone();
        update(&mut row);
        row.updated_at = Utc::now();
        row.revision = self.next_revision();

        if self.config.is_some() {
            let mut next = collections.availability.clone();
            next[index] = row.clone();
            self.write_availability(&next)?;
        }

        collections.availability[index] = row.clone();
        self.commit_revision(&row, cause);
        Ok(Some(row))
    }
}

impl DocumentStore for FileStore {
    fn find_availability(&self, key: &AvailabilityKey) -> StoreResult<Option<AvailabilityAggregate>> {
        let collections = self.collections.lock();
        Ok(collections.availability.iter().find(|r| r.has_key(key)).cloned())
    }

    fn insert_availability(&self, mut row: AvailabilityAggregate) -> StoreResult<AvailabilityAggregate> {
        let mut collections = self.collections.lock();

        let key = row.key();
        if collections.availability.iter().any(|r| r.has_key(&key)) {
            return Err(StoreError::DuplicateKey(format!("availability {}", key)));
        }
        row.revision = self.next_revision();

        if self.config.is_some() {
            let mut next = collections.availability.clone();
            next.push(row.clone());
            self.write_availability(&next)?;
        }

        collections.availability.push(row.clone());
        self.commit_revision(&row, Delta::Increment);
        debug!(key = %key, revision = row.revision, "availability row created");
        Ok(row)
    }

    fn increment_availability(
        &self,
        key: &AvailabilityKey,
        phone: &str,
    ) -> StoreResult<Option<AvailabilityAggregate>> {
        let mut collections = self.collections.lock();
        self.update_availability(&mut collections, key, Delta::Increment, |row| {
            row.available_units += 1;
            if !phone.is_empty() {
                row.phone = phone.to_string();
            }
        })
    }

    fn decrement_availability(&self, key: &AvailabilityKey) -> StoreResult<Decrement> {
        let mut collections = self.collections.lock();

        let current = match collections.availability.iter().find(|r| r.has_key(key)) {
            Some(row) => row.clone(),
            None => return Ok(Decrement::Missing),
        };
        if current.available_units == 0 {
            return Ok(Decrement::OutOfStock(current));
        }

        let updated = self.update_availability(&mut collections, key, Delta::Decrement, |row| {
            row.available_units -= 1;
        })?;

        match updated {
            Some(row) => Ok(Decrement::Applied(row)),
            None => Err(StoreError::Inconsistent(format!(
                "availability {} vanished during decrement",
                key
            ))),
        }
    }

    fn list_availability(&self, blood_type: Option<&str>) -> StoreResult<Vec<AvailabilityAggregate>> {
        let collections = self.collections.lock();
        Ok(collections
            .availability
            .iter()
            .filter(|r| matches_filter(&r.blood_type, blood_type))
            .cloned()
            .collect())
    }

    fn availability_revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    fn append_donation(&self, event: &DonationEvent) -> StoreResult<()> {
        let mut collections = self.collections.lock();
        if let Some(config) = &self.config {
            append_jsonl(config.donations_path(), event)?;
        }
        collections.donations.push(event.clone());
        Ok(())
    }

    fn list_donations(&self, blood_group: Option<&str>) -> StoreResult<Vec<DonationEvent>> {
        let collections = self.collections.lock();
        Ok(collections
            .donations
            .iter()
            .filter(|e| matches_filter(&e.blood_group, blood_group))
            .cloned()
            .collect())
    }

    fn append_recipient(&self, event: &RecipientEvent) -> StoreResult<()> {
        let mut collections = self.collections.lock();
        if let Some(config) = &self.config {
            append_jsonl(config.recipients_path(), event)?;
        }
        collections.recipients.push(event.clone());
        Ok(())
    }

    fn list_recipients(&self, blood_group: Option<&str>) -> StoreResult<Vec<RecipientEvent>> {
        let collections = self.collections.lock();
        Ok(collections
            .recipients
            .iter()
            .filter(|e| matches_filter(&e.blood_group, blood_group))
            .cloned()
            .collect())
    }

    fn insert_donor(&self, donor: Donor) -> StoreResult<Donor> {
        let mut collections = self.collections.lock();

        if collections.donors.iter().any(|d| d.email == donor.email) {
            return Err(StoreError::DuplicateKey(format!("donor email {}", donor.email)));
        }

        let mut next = collections.donors.clone();
        next.push(donor.clone());
        self.write_donors(&next)?;
        collections.donors = next;

        Ok(donor)
    }

    fn find_donor_by_email(&self, email: &str) -> StoreResult<Option<Donor>> {
        let collections = self.collections.lock();
        Ok(collections.donors.iter().find(|d| d.email == email).cloned())
    }

    fn list_donors(&self) -> StoreResult<Vec<Donor>> {
        Ok(self.collections.lock().donors.clone())
    }

    fn delete_donor(&self, id: &str) -> StoreResult<bool> {
        let mut collections = self.collections.lock();

        let next: Vec<Donor> = collections.donors.iter().filter(|d| d.id != id).cloned().collect();
        if next.len() == collections.donors.len() {
            return Ok(false);
        }

        self.write_donors(&next)?;
        collections.donors = next;
        Ok(true)
    }
}

//! Integration tests for the Blood Bank service

use std::sync::{Arc, Barrier};
use std::thread;

use blood_bank::{
    AvailabilityKey, BankError, BloodBank, DocumentStore, FileStore, NewDonation,
    NewRecipientRequest, StoreConfig,
};
use tempfile::TempDir;

fn setup_test_bank() -> (Arc<BloodBank>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open(StoreConfig::new(temp_dir.path())).unwrap();
    let bank = Arc::new(BloodBank::new(Arc::new(store)).with_bcrypt_cost(4));
    (bank, temp_dir)
}

fn donation(blood_group: &str, location: &str) -> NewDonation {
    NewDonation::new("Donor", blood_group, location, "555-0100")
}

fn request(blood_group: &str, location: &str) -> NewRecipientRequest {
    NewRecipientRequest::new("Recipient", blood_group, location)
}

fn units(bank: &BloodBank, blood_type: &str, location: &str) -> Option<u64> {
    bank.store()
        .find_availability(&AvailabilityKey::new(blood_type, location))
        .unwrap()
        .map(|row| row.available_units)
}

#[test]
fn test_first_donation_creates_single_unit() {
    let (bank, _dir) = setup_test_bank();

    let receipt = bank.record_donation(donation("O+", "CityA")).unwrap();

    assert_eq!(receipt.availability.available_units, 1);
    assert_eq!(units(&bank, "O+", "CityA"), Some(1));
}

#[test]
fn test_sequential_donations_accumulate() {
    let (bank, _dir) = setup_test_bank();

    for _ in 0..7 {
        bank.record_donation(donation("A+", "CityA")).unwrap();
    }

    assert_eq!(units(&bank, "A+", "CityA"), Some(7));
    assert_eq!(bank.list_donations(Some("A+")).unwrap().len(), 7);
}

#[test]
fn test_concurrent_first_donations_yield_one_row() {
    let (bank, _dir) = setup_test_bank();
    let start = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let bank = Arc::clone(&bank);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                bank.record_donation(NewDonation::new(
                    format!("Donor {}", i),
                    "B-",
                    "NewTown",
                    format!("555-01{:02}", i),
                ))
                .unwrap()
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let rows = bank.list_availability(Some("B-")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].available_units, 8);
}

#[test]
fn test_request_without_stock_rejected() {
    let (bank, _dir) = setup_test_bank();

    let result = bank.record_recipient_request(request("AB+", "CityA"));
    assert!(matches!(result, Err(BankError::Unavailable(_))));
    assert!(bank.list_recipients(None).unwrap().is_empty());
    assert_eq!(units(&bank, "AB+", "CityA"), None);
}

#[test]
fn test_single_unit_admits_exactly_one_request() {
    let (bank, _dir) = setup_test_bank();
    bank.record_donation(donation("O-", "CityA")).unwrap();

    let receipt = bank.record_recipient_request(request("O-", "CityA")).unwrap();
    assert_eq!(receipt.availability.available_units, 0);

    let second = bank.record_recipient_request(request("O-", "CityA"));
    assert!(matches!(second, Err(BankError::Unavailable(_))));

    assert_eq!(units(&bank, "O-", "CityA"), Some(0));
    assert_eq!(bank.list_recipients(Some("O-")).unwrap().len(), 1);
}

#[test]
fn test_keys_do_not_interfere() {
    let (bank, _dir) = setup_test_bank();

    bank.record_donation(donation("O+", "CityA")).unwrap();
    bank.record_donation(donation("O+", "CityB")).unwrap();
    bank.record_donation(donation("O+", "CityB")).unwrap();
    bank.record_donation(donation("A+", "CityA")).unwrap();
    bank.record_recipient_request(request("O+", "CityB")).unwrap();

    assert_eq!(units(&bank, "O+", "CityA"), Some(1));
    assert_eq!(units(&bank, "O+", "CityB"), Some(1));
    assert_eq!(units(&bank, "A+", "CityA"), Some(1));
}

#[test]
fn test_location_match_is_case_sensitive() {
    let (bank, _dir) = setup_test_bank();
    bank.record_donation(donation("O+", "CityA")).unwrap();

    let result = bank.record_recipient_request(request("O+", "citya"));
    assert!(matches!(result, Err(BankError::Unavailable(_))));
}

#[test]
fn test_donation_round_trip_through_listing() {
    let (bank, _dir) = setup_test_bank();

    bank.record_donation(donation("A-", "Harbor")).unwrap();
    bank.record_donation(donation("A-", "Harbor")).unwrap();
    let listed = bank.list_availability(None).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].available_units, 2);

    bank.record_donation(donation("A-", "Hilltop")).unwrap();
    let listed = bank.list_availability(Some("A-")).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].location, "Harbor");
    assert_eq!(listed[0].available_units, 2);
    assert_eq!(listed[1].location, "Hilltop");
    assert_eq!(listed[1].available_units, 1);
}

#[test]
fn test_concurrent_requests_never_oversell() {
    let (bank, _dir) = setup_test_bank();
    for _ in 0..4 {
        bank.record_donation(donation("AB-", "Clinic")).unwrap();
    }

    let start = Arc::new(Barrier::new(12));
    let handles: Vec<_> = (0..12)
        .map(|_| {
            let bank = Arc::clone(&bank);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                bank.record_recipient_request(request("AB-", "Clinic")).is_ok()
            })
        })
        .collect();

    let admitted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(admitted, 4);
    assert_eq!(units(&bank, "AB-", "Clinic"), Some(0));
    assert_eq!(bank.list_recipients(Some("AB-")).unwrap().len(), 4);
}

#[test]
fn test_state_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig::new(temp_dir.path());

    {
        let bank = BloodBank::new(Arc::new(FileStore::open(config.clone()).unwrap()));
        bank.record_donation(donation("O+", "CityA")).unwrap();
        bank.record_donation(donation("O+", "CityA")).unwrap();
        bank.record_recipient_request(request("O+", "CityA")).unwrap();
    }

    let bank = BloodBank::new(Arc::new(FileStore::open(config).unwrap()));
    assert_eq!(units(&bank, "O+", "CityA"), Some(1));
    assert_eq!(bank.list_donations(None).unwrap().len(), 2);
    assert_eq!(bank.list_recipients(None).unwrap().len(), 1);

    // Reopened store keeps enforcing the unique key
    bank.record_donation(donation("O+", "CityA")).unwrap();
    assert_eq!(bank.list_availability(None).unwrap().len(), 1);
    assert_eq!(units(&bank, "O+", "CityA"), Some(2));
}

#[test]
fn test_phone_is_last_writer_wins() {
    let (bank, _dir) = setup_test_bank();

    bank.record_donation(NewDonation::new("A", "B+", "CityA", "111")).unwrap();
    let receipt = bank
        .record_donation(NewDonation::new("B", "B+", "CityA", "222"))
        .unwrap();

    assert_eq!(receipt.availability.phone, "222");
    assert_eq!(receipt.availability.available_units, 2);
}

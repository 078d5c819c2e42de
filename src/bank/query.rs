//! Read-only listings

use crate::types::{AvailabilityAggregate, DonationEvent, RecipientEvent};

use super::{BankResult, BloodBank};

/// Availability rows, optionally for one blood type, ordered by key
pub fn list_availability(
    bank: &BloodBank,
    blood_type: Option<&str>,
) -> BankResult<Vec<AvailabilityAggregate>> {
    let mut rows = bank.store.list_availability(blood_type)?;
    rows.sort_by(|a, b| {
        a.blood_type
            .cmp(&b.blood_type)
            .then_with(|| a.location.cmp(&b.location))
    });
    Ok(rows)
}

/// Donation log in arrival order
pub fn list_donations(bank: &BloodBank, blood_group: Option<&str>) -> BankResult<Vec<DonationEvent>> {
    Ok(bank.store.list_donations(blood_group)?)
}

/// Admitted recipient requests in arrival order
pub fn list_recipients(
    bank: &BloodBank,
    blood_group: Option<&str>,
) -> BankResult<Vec<RecipientEvent>> {
    Ok(bank.store.list_recipients(blood_group)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewDonation;

    #[test]
    fn test_availability_sorted_by_key() {
        let bank = BloodBank::in_memory();
        bank.record_donation(NewDonation::new("a", "O+", "Zeta", "1")).unwrap();
        bank.record_donation(NewDonation::new("b", "A+", "Beta", "2")).unwrap();
        bank.record_donation(NewDonation::new("c", "O+", "Alpha", "3")).unwrap();

        let rows = bank.list_availability(None).unwrap();
        let keys: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.blood_type.as_str(), r.location.as_str()))
            .collect();
        assert_eq!(keys, vec![("A+", "Beta"), ("O+", "Alpha"), ("O+", "Zeta")]);
    }
}

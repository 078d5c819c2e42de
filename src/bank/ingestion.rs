//! Event ingestion: donations and recipient requests

use tracing::{error, info, warn};

use crate::inventory::Delta;
use crate::types::{
    DonationEvent, DonationReceipt, NewDonation, NewRecipientRequest, RecipientEvent,
    RecipientReceipt,
};
use crate::validation::{validate_donation, validate_recipient_request};

use super::{warn_non_standard, BankError, BankResult, BloodBank};

/// Log the donation, then add its unit to the availability row
///
/// If the log write succeeds and reconciliation fails, the event stays in
/// the log without a matching unit.
pub fn record_donation(bank: &BloodBank, donation: NewDonation) -> BankResult<DonationReceipt> {
    validate_donation(&donation)?;
    warn_non_standard(&donation.blood_group);

    let key = donation.key();
    let event = DonationEvent::from(donation);

    bank.store.append_donation(&event).map_err(|e| {
        error!(key = %key, error = %e, "failed to log donation");
        e
    })?;

    let reconciliation = bank
        .inventory
        .apply_delta(&key, Delta::Increment, &event.phone)
        .map_err(|e| {
            error!(
                key = %key,
                event_id = %event.id,
                error = %e,
                "donation logged but availability not updated"
            );
            e
        })?;

    let availability = reconciliation.into_aggregate();
    info!(
        key = %key,
        event_id = %event.id,
        units = availability.available_units,
        "donation recorded"
    );

    Ok(DonationReceipt { event, availability })
}

/// Take a unit first; only an admitted request is logged
///
/// Rejected requests leave no trace. If the decrement commits and the log
/// write fails, the unit stays taken with no matching event.
pub fn record_recipient_request(
    bank: &BloodBank,
    request: NewRecipientRequest,
) -> BankResult<RecipientReceipt> {
    validate_recipient_request(&request)?;
    warn_non_standard(&request.blood_group);

    let key = request.key();

    let availability = match bank.inventory.apply_delta(&key, Delta::Decrement, "") {
        Ok(reconciliation) => reconciliation.into_aggregate(),
        Err(e) => {
            let e = BankError::from(e);
            match &e {
                BankError::Unavailable(_) => info!(key = %key, "recipient request rejected"),
                _ => error!(key = %key, error = %e, "failed to take unit"),
            }
            return Err(e);
        }
    };

    let event = RecipientEvent::from(request);
    if let Err(e) = bank.store.append_recipient(&event) {
        warn!(
            key = %key,
            units = availability.available_units,
            error = %e,
            "availability decremented without a matching recipient event"
        );
        return Err(e.into());
    }

    info!(
        key = %key,
        event_id = %event.id,
        units = availability.available_units,
        "recipient request admitted"
    );

    Ok(RecipientReceipt { event, availability })
}

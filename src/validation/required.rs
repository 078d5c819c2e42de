//! Required-field checks for inbound requests

use thiserror::Error;

use crate::types::{LoginRequest, NewDonation, NewDonor, NewRecipientRequest};

/// Validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Fail on the first field that is empty or whitespace-only
fn require(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(ValidationError::MissingField(*name)),
        None => Ok(()),
    }
}

pub fn validate_donation(donation: &NewDonation) -> Result<(), ValidationError> {
    require(&[
        ("name", donation.name.as_str()),
        ("bloodGroup", donation.blood_group.as_str()),
        ("location", donation.location.as_str()),
        ("phone", donation.phone.as_str()),
    ])
}

pub fn validate_recipient_request(request: &NewRecipientRequest) -> Result<(), ValidationError> {
    require(&[
        ("name", request.name.as_str()),
        ("bloodGroup", request.blood_group.as_str()),
        ("location", request.location.as_str()),
    ])
}

pub fn validate_new_donor(donor: &NewDonor) -> Result<(), ValidationError> {
    require(&[
        ("name", donor.name.as_str()),
        ("email", donor.email.as_str()),
        ("bloodGroup", donor.blood_group.as_str()),
        ("contact", donor.contact.as_str()),
    ])
}

pub fn validate_login(login: &LoginRequest) -> Result<(), ValidationError> {
    require(&[("email", login.email.as_str()), ("password", login.password.as_str())])
}

//! Request validation
//!
//! Hard validation is limited to required-field presence. Blood groups get a
//! soft check that only produces a warning.

mod blood_group;
mod required;

pub use blood_group::{validate_blood_group, STANDARD_BLOOD_GROUPS};
pub use required::{
    validate_donation, validate_login, validate_new_donor, validate_recipient_request,
    ValidationError,
};

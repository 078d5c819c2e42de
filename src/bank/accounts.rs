//! Donor registry: registration, login, listing and removal
//!
//! Login only checks credentials; it issues no token or session. A donor
//! registered without a password has no hash and never logs in.

use bcrypt::{hash, verify};
use chrono::Utc;
use tracing::info;

use crate::store::StoreError;
use crate::types::{new_document_id, Donor, LoginRequest, NewDonor};
use crate::validation::{validate_login, validate_new_donor};

use super::{warn_non_standard, BankError, BankResult, BloodBank};

pub fn register_donor(bank: &BloodBank, form: NewDonor) -> BankResult<Donor> {
    validate_new_donor(&form)?;
    warn_non_standard(&form.blood_group);

    let password_hash = match form.password.as_deref() {
        Some(password) if !password.is_empty() => hash(password, bank.bcrypt_cost)?,
        _ => String::new(),
    };
    let email = form.email.clone();
    let donor = Donor {
        id: new_document_id(),
        name: form.name,
        email: form.email,
        blood_group: form.blood_group,
        contact: form.contact,
        password_hash,
        created_at: Utc::now(),
    };

    match bank.store.insert_donor(donor) {
        Ok(donor) => {
            info!(donor_id = %donor.id, "donor registered");
            Ok(donor.public())
        }
        Err(StoreError::DuplicateKey(_)) => Err(BankError::EmailTaken(email)),
        Err(e) => Err(e.into()),
    }
}

/// Check credentials; unknown email and wrong password are indistinguishable
pub fn login(bank: &BloodBank, login: LoginRequest) -> BankResult<Donor> {
    validate_login(&login)?;

    let donor = bank
        .store
        .find_donor_by_email(&login.email)?
        .ok_or(BankError::InvalidCredentials)?;

    if donor.password_hash.is_empty() {
        return Err(BankError::InvalidCredentials);
    }

    if verify(&login.password, &donor.password_hash).unwrap_or(false) {
        Ok(donor.public())
    } else {
        Err(BankError::InvalidCredentials)
    }
}

pub fn list_donors(bank: &BloodBank) -> BankResult<Vec<Donor>> {
    Ok(bank.store.list_donors()?.iter().map(Donor::public).collect())
}

pub fn delete_donor(bank: &BloodBank, id: &str) -> BankResult<()> {
    if bank.store.delete_donor(id)? {
        info!(donor_id = %id, "donor deleted");
        Ok(())
    } else {
        Err(BankError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DocumentStore;

    fn create_test_bank() -> BloodBank {
        // Minimum bcrypt cost keeps the tests fast
        BloodBank::in_memory().with_bcrypt_cost(4)
    }

    fn form(email: &str, password: &str) -> NewDonor {
        NewDonor {
            name: "Asha".to_string(),
            email: email.to_string(),
            password: Some(password.to_string()),
            blood_group: "O-".to_string(),
            contact: "555-0199".to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_register_hides_hash() {
        let bank = create_test_bank();
        let donor = bank.register_donor(form("asha@example.com", "pw123")).unwrap();

        assert!(donor.password_hash.is_empty());
        let stored = bank.store().find_donor_by_email("asha@example.com").unwrap().unwrap();
        assert!(stored.password_hash.starts_with("$2"));
        assert_ne!(stored.password_hash, "pw123");
    }

    #[test]
    fn test_register_duplicate_email() {
        let bank = create_test_bank();
        bank.register_donor(form("asha@example.com", "pw")).unwrap();

        let result = bank.register_donor(form("asha@example.com", "other"));
        assert!(matches!(result, Err(BankError::EmailTaken(email)) if email == "asha@example.com"));
    }

    #[test]
    fn test_login_valid_credentials() {
        let bank = create_test_bank();
        bank.register_donor(form("asha@example.com", "pw123")).unwrap();

        let donor = bank.login(login_request("asha@example.com", "pw123")).unwrap();
        assert_eq!(donor.name, "Asha");
        assert!(donor.password_hash.is_empty());
    }

    #[test]
    fn test_login_invalid_password() {
        let bank = create_test_bank();
        bank.register_donor(form("asha@example.com", "pw123")).unwrap();

        let result = bank.login(login_request("asha@example.com", "wrong"));
        assert!(matches!(result, Err(BankError::InvalidCredentials)));
    }

    #[test]
    fn test_login_unknown_email() {
        let bank = create_test_bank();
        let result = bank.login(login_request("nobody@example.com", "pw"));
        assert!(matches!(result, Err(BankError::InvalidCredentials)));
    }

    #[test]
    fn test_register_without_password_cannot_login() {
        let bank = create_test_bank();
        let form = NewDonor {
            password: None,
            ..form("nopw@example.com", "")
        };

        let donor = bank.register_donor(form).unwrap();
        assert_eq!(donor.email, "nopw@example.com");

        let stored = bank.store().find_donor_by_email("nopw@example.com").unwrap().unwrap();
        assert!(stored.password_hash.is_empty());

        let result = bank.login(login_request("nopw@example.com", "anything"));
        assert!(matches!(result, Err(BankError::InvalidCredentials)));
    }

    #[test]
    fn test_delete_donor() {
        let bank = create_test_bank();
        let donor = bank.register_donor(form("asha@example.com", "pw")).unwrap();

        bank.delete_donor(&donor.id).unwrap();
        assert!(bank.list_donors().unwrap().is_empty());
        assert!(matches!(bank.delete_donor(&donor.id), Err(BankError::NotFound(_))));
    }
}

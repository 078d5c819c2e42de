//! Standard blood groups with soft validation

/// ABO/Rh groups recognised without a warning
pub const STANDARD_BLOOD_GROUPS: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

/// Check if blood group is standard, return warning if not
///
/// Stock is keyed case-sensitively, so `o+` is reported as non-standard
/// even though it is accepted.
pub fn validate_blood_group(blood_group: &str) -> Option<String> {
    if STANDARD_BLOOD_GROUPS.contains(&blood_group) {
        None
    } else {
        Some(format!(
            "Non-standard bloodGroup '{}'. Recommended: {:?}",
            blood_group, STANDARD_BLOOD_GROUPS
        ))
    }
}

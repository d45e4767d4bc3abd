//! Phone number normalization.

/// Normalizes a phone number to international format with Brazil (+55) as
/// the default country code.
///
/// All non-digit characters are stripped; numbers that do not already start
/// with the country code get `55` prepended.
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.starts_with("55") {
        format!("+{digits}")
    } else {
        format!("+55{digits}")
    }
}

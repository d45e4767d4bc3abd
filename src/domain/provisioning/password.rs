//! One-time password generation for newly provisioned accounts.

use rand::distributions::Alphanumeric;
use rand::Rng;

const PASSWORD_LENGTH: usize = 10;

/// Generates a random alphanumeric one-time password.
///
/// The password is emailed to the user on account creation and is expected
/// to be changed on first login.
pub fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_expected_length() {
        assert_eq!(generate_password().len(), PASSWORD_LENGTH);
    }

    #[test]
    fn is_alphanumeric() {
        assert!(generate_password().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn successive_passwords_differ() {
        // Collision over 10 alphanumeric chars is vanishingly unlikely.
        assert_ne!(generate_password(), generate_password());
    }
}

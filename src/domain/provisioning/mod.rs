//! Pure helpers used when provisioning user accounts.

pub mod password;
pub mod phone;

pub use password::generate_password;
pub use phone::normalize_phone;

//! Email adapter: SMTP delivery of credential messages.

pub mod smtp_notifier;

pub use smtp_notifier::SmtpNotifier;

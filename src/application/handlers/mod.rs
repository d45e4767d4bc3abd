//! Command handlers orchestrating domain logic over the ports.

pub mod generate_credentials;
pub mod process_webhook;
pub mod provision_user;

pub use generate_credentials::{
    CredentialsError, GenerateCredentialsCommand, GenerateCredentialsHandler,
    GeneratedCredentials,
};
pub use process_webhook::{ProcessOutcome, ProcessWebhookHandler};
pub use provision_user::{EmailDelivery, ProvisionError, ProvisionOutcome, UserProvisioner};

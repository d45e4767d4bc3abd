//! SMTP implementation of the CredentialNotifier port, using lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::EmailConfig;
use crate::ports::{CredentialNotifier, CredentialsEmail, NotifyError};

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    login_url: String,
}

impl SmtpNotifier {
    /// Builds the transport from the email config. Port 465 is implicit TLS
    /// (`relay`); anything else uses STARTTLS.
    pub fn new(config: &EmailConfig) -> Result<Self, NotifyError> {
        let builder = if config.smtp_port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        }
        .map_err(|e| NotifyError(format!("failed to create SMTP transport: {e}")))?;

        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_user.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        let from: Mailbox = config
            .from_header()
            .parse()
            .map_err(|e| NotifyError(format!("invalid from address: {e}")))?;

        Ok(Self {
            transport,
            from,
            login_url: config.login_url.clone(),
        })
    }

    fn credentials_body(&self, message: &CredentialsEmail) -> String {
        format!(
            "Olá, {name}!\n\n\
             Bem-vindo ao App Queima! Seu acesso está liberado.\n\n\
             Use as credenciais abaixo para entrar no aplicativo:\n\n\
             Usuário/E-mail: {email}\n\
             Senha: {password}\n\n\
             Acesse: {login_url}\n\n\
             Recomendamos alterar sua senha no primeiro acesso.\n\n\
             Bons treinos!\n\
             Equipe App Queima",
            name = message.to_name,
            email = message.to_email,
            password = message.password,
            login_url = self.login_url,
        )
    }
}

#[async_trait]
impl CredentialNotifier for SmtpNotifier {
    async fn send_credentials(&self, message: &CredentialsEmail) -> Result<(), NotifyError> {
        let to: Mailbox = format!("{} <{}>", message.to_name, message.to_email)
            .parse()
            .or_else(|_| message.to_email.parse())
            .map_err(|e| NotifyError(format!("invalid recipient address: {e}")))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("Suas credenciais de acesso - App Queima")
            .header(ContentType::TEXT_PLAIN)
            .body(self.credentials_body(message))
            .map_err(|e| NotifyError(format!("failed to build message: {e}")))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| NotifyError(format!("smtp send failed: {e}")))?;

        tracing::info!(to = %message.to_email, "credentials email sent");
        Ok(())
    }
}

use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};

use crate::{config::Config, error::ApiError, models::email::Email};

/// Cliente SMTP (STARTTLS) para el formulario de contacto y los códigos de
/// restablecimiento de contraseña.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.mail_host)?
            .port(config.mail_port)
            .credentials(Credentials::new(
                config.mail_email.clone(),
                config.mail_password.clone(),
            ))
            .build();

        let from = format!("{} <{}>", config.mail_display_name, config.mail_email)
            .parse()
            .map_err(|_| ApiError::Internal("Dirección de remitente inválida".to_string()))?;

        Ok(Self { transport, from })
    }

    pub async fn send(&self, email: &Email) -> Result<(), ApiError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(email
                .to
                .parse()
                .map_err(|_| ApiError::Validation("Invalid email address".to_string()))?)
            .subject(email.subject.clone())
            .body(email.body.clone())
            .map_err(|_| ApiError::Internal("No se pudo construir el correo".to_string()))?;

        self.transport.send(message).await?;
        Ok(())
    }
}

use crate::config::toml_config::{EmailConfig, SmtpSecurity};
use crate::domain::model::OutgoingMail;
use crate::domain::ports::Mailer;
use crate::utils::error::{MorningError, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// SMTP delivery through lettre's tokio transport.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpMailer {
    pub fn from_config(config: &EmailConfig) -> Result<Self> {
        let builder = match config.security {
            SmtpSecurity::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?,
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            }
            SmtpSecurity::None => {
                tracing::warn!("SMTP security is disabled; credentials travel in plaintext");
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            }
        };

        let mut builder = builder.port(config.smtp_port);
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            host: format!("{}:{}", config.smtp_host, config.smtp_port),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<()> {
        let message = build_message(&mail)?;
        tracing::debug!("Sending mail via {} to {:?}", self.host, mail.to);
        let response = self.transport.send(message).await?;
        tracing::debug!("SMTP server replied with code {}", response.code());
        Ok(())
    }
}

/// Builds a multipart/mixed message: the text body, then the image if one was saved.
pub fn build_message(mail: &OutgoingMail) -> Result<Message> {
    let mut builder = Message::builder()
        .from(mail.from.parse::<Mailbox>()?)
        .subject(mail.subject.clone());

    for recipient in &mail.to {
        builder = builder.to(recipient.parse::<Mailbox>()?);
    }

    let mut parts = MultiPart::mixed().singlepart(SinglePart::plain(mail.body.clone()));

    if let Some(attachment) = &mail.attachment {
        let content_type = ContentType::parse(&attachment.content_type).map_err(|e| {
            MorningError::ValidationError {
                message: format!(
                    "invalid attachment content type '{}': {}",
                    attachment.content_type, e
                ),
            }
        })?;
        parts = parts.singlepart(
            Attachment::new(attachment.file_name.clone()).body(attachment.data.clone(), content_type),
        );
    }

    Ok(builder.multipart(parts)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MailAttachment;

    fn mail(attachment: Option<MailAttachment>) -> OutgoingMail {
        OutgoingMail {
            from: "sender@example.com".to_string(),
            to: vec!["first@example.com".to_string(), "second@example.com".to_string()],
            subject: "Good Morning".to_string(),
            body: "Meet Biscuit the pug.".to_string(),
            attachment,
        }
    }

    #[test]
    fn test_build_message_with_attachment() {
        let message = build_message(&mail(Some(MailAttachment {
            file_name: "random_dog.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: vec![0xFF, 0xD8, 0xFF, 0xE0],
        })))
        .unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Good Morning"));
        assert!(raw.contains("first@example.com"));
        assert!(raw.contains("second@example.com"));
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("Meet Biscuit the pug."));
        assert!(raw.contains("image/jpeg"));
        assert!(raw.contains("filename=\"random_dog.jpg\""));
    }

    #[test]
    fn test_build_message_without_attachment() {
        let raw = String::from_utf8(build_message(&mail(None)).unwrap().formatted()).unwrap();
        assert!(raw.contains("Meet Biscuit the pug."));
        assert!(!raw.contains("Content-Disposition: attachment"));
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let mut outgoing = mail(None);
        outgoing.to = vec!["nobody".to_string()];
        let err = build_message(&outgoing).unwrap_err();
        assert!(matches!(err, MorningError::AddressError(_)));
    }

    #[tokio::test]
    async fn test_plaintext_transport_builds_without_connecting() {
        let config = EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 2525,
            security: SmtpSecurity::None,
            ..EmailConfig::default()
        };

        let mailer = SmtpMailer::from_config(&config).unwrap();
        assert_eq!(mailer.host(), "localhost:2525");
    }
}

//! Mail Sender Port

use crate::domain::errors::MailError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Contact message submitted through the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(alias = "nome")]
    pub name: String,
    pub email: String,
    #[serde(default, alias = "assunto")]
    pub subject: Option<String>,
    #[serde(alias = "mensagem")]
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), MailError> {
        if self.name.trim().is_empty() {
            return Err(MailError::Invalid("name is required".to_string()));
        }
        if self.message.trim().is_empty() {
            return Err(MailError::Invalid("message is required".to_string()));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((user, domain)) if !user.is_empty() && domain.contains('.') => Ok(()),
            _ => Err(MailError::Invalid(format!("invalid email: {}", email))),
        }
    }
}

/// Outbound mail delivery.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, message: &ContactMessage) -> Result<(), MailError>;
}

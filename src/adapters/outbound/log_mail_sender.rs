//! Log Mail Sender
//!
//! Records contact messages in the log instead of delivering them.
//! Used until an SMTP relay is configured.

use crate::domain::errors::MailError;
use crate::domain::ports::{ContactMessage, MailSender};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Mail sender that logs and keeps the messages it was given.
pub struct LogMailSender {
    outbox: Mutex<Vec<ContactMessage>>,
}

impl LogMailSender {
    pub fn new() -> Self {
        Self {
            outbox: Mutex::new(Vec::new()),
        }
    }

    /// Messages accepted so far.
    pub fn sent(&self) -> Vec<ContactMessage> {
        self.outbox.lock().clone()
    }
}

impl Default for LogMailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, message: &ContactMessage) -> Result<(), MailError> {
        message.validate()?;
        tracing::info!(
            from = %message.email,
            subject = message.subject.as_deref().unwrap_or("(sem assunto)"),
            "contact message received from {}",
            message.name
        );
        self.outbox.lock().push(message.clone());
        Ok(())
    }
}

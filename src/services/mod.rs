pub mod mail;
pub mod trade;

use crate::api;
use async_trait::async_trait;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

/// Ticket email delivery. Constructed once in `main` and injected through
/// the app state; `is_configured` tells handlers whether sends are real or
/// must be simulated.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MailService: Send + Sync {
    fn is_configured(&self) -> bool;

    async fn send_ticket<'a>(
        &self,
        to: &str,
        ticket_code: &str,
        summary: Option<&'a api::ticket::PaymentSummary>,
    ) -> anyhow::Result<()>;
}

pub type ImplMailService = Arc<dyn MailService>;

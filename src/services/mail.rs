//! SMTP ticket delivery on lettre, plus the simulated fallback.

use anyhow::Context;
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::api::ticket::PaymentSummary;
use crate::config;
use crate::services::{ImplMailService, MailService};

/// Real SMTP delivery; constructed only when both credentials are present
#[derive(Clone)]
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(
        smtp_server: &str,
        smtp_user: String,
        smtp_pass: String,
        mail_from: &str,
    ) -> anyhow::Result<Self> {
        let transport = SmtpTransport::relay(smtp_server)
            .with_context(|| format!("smtp relay {smtp_server} is not reachable as configured"))?
            .credentials(Credentials::new(smtp_user, smtp_pass))
            .build();

        Ok(Self {
            transport,
            from: mail_from
                .parse()
                .with_context(|| format!("MAIL_FROM '{mail_from}' is not a valid mailbox"))?,
        })
    }
}

#[async_trait]
impl MailService for SmtpMailer {
    fn is_configured(&self) -> bool {
        true
    }

    async fn send_ticket<'a>(
        &self,
        to: &str,
        ticket_code: &str,
        summary: Option<&'a PaymentSummary>,
    ) -> anyhow::Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .with_context(|| format!("destination '{to}' is not a valid mailbox"))?)
            .subject("🎫 Seu Ingresso SafeSwap")
            .header(ContentType::TEXT_HTML)
            .body(render_ticket_email(ticket_code, summary))
            .context("failed to build the ticket email")?;

        let mailer = self.transport.clone();
        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .context("email task failed")?
            .context("smtp send failed")?;

        Ok(())
    }
}

/// Stand-in when SMTP is not configured; handlers check `is_configured`
/// and take the simulated path instead of calling `send_ticket`
pub struct NullMailer;

#[async_trait]
impl MailService for NullMailer {
    fn is_configured(&self) -> bool {
        false
    }

    async fn send_ticket<'a>(
        &self,
        _to: &str,
        _ticket_code: &str,
        _summary: Option<&'a PaymentSummary>,
    ) -> anyhow::Result<()> {
        anyhow::bail!("mail transport is not configured")
    }
}

pub fn build_mail_service(app_config: &config::AppConfig) -> anyhow::Result<ImplMailService> {
    match (&app_config.smtp_user, &app_config.smtp_pass) {
        (Some(user), Some(pass)) => Ok(std::sync::Arc::new(SmtpMailer::new(
            &app_config.smtp_server,
            user.clone(),
            pass.clone(),
            &app_config.mail_from,
        )?)),
        _ => Ok(std::sync::Arc::new(NullMailer)),
    }
}

fn render_ticket_email(ticket_code: &str, summary: Option<&PaymentSummary>) -> String {
    let payment_block = summary
        .map(|data| {
            let festa = data
                .festa
                .as_ref()
                .and_then(|f| f.nome.clone())
                .unwrap_or_else(|| "SafeSwap Event".to_string());
            let valor = data
                .valor
                .map(|v| format!("{v:.2}"))
                .unwrap_or_else(|| "0,00".to_string());
            let payment_id = data.payment_id.clone().unwrap_or_else(|| "N/A".to_string());

            format!(
                r#"
            <div style="background-color: #e8f5e8; padding: 15px; border-radius: 8px; margin: 20px 0;">
              <h4>Detalhes do Pagamento:</h4>
              <p><strong>Evento:</strong> {festa}</p>
              <p><strong>Valor:</strong> R$ {valor}</p>
              <p><strong>ID Pagamento:</strong> {payment_id}</p>
            </div>
            "#
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
        <html>
        <head>
          <meta charset="UTF-8">
          <title>Seu Ingresso SafeSwap</title>
        </head>
        <body style="font-family: Arial, sans-serif; background-color: #f4f4f4; margin: 0; padding: 20px;">
          <div style="max-width: 600px; margin: 0 auto; background-color: white; padding: 30px; border-radius: 10px;">
            <h1 style="color: #14b8a6; text-align: center;">SafeSwap</h1>
            <h2 style="color: #333;">🎫 Seu Ingresso Chegou!</h2>
            <p>Parabéns! Seu ingresso SafeSwap foi gerado com sucesso.</p>

            <div style="background-color: #f8f9fa; padding: 20px; border-radius: 8px; text-align: center; margin: 20px 0;">
              <h3 style="color: #14b8a6;">Código do Ingresso</h3>
              <p style="font-family: monospace; font-size: 20px; font-weight: bold; color: #333;">{ticket_code}</p>
            </div>
            {payment_block}
            <div style="border-top: 1px solid #eee; padding-top: 20px; margin-top: 30px;">
              <p><strong>Informações Importantes:</strong></p>
              <ul>
                <li>Este ingresso é único e intransferível</li>
                <li>Apresente este e-mail na entrada do evento</li>
                <li>Guarde bem este comprovante</li>
              </ul>
            </div>

            <p style="text-align: center; color: #666; font-size: 12px; margin-top: 30px;">
              SafeSwap - Ingressos Seguros<br>
              Dúvidas: suporte@safeswap.com
            </p>
          </div>
        </body>
        </html>"#
    )
}

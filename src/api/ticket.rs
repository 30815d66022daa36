//! Ticket delivery after a confirmed payment.
//!
//! WhatsApp delivery is always simulated. Email delivery goes through the
//! injected mail service when SMTP is configured, otherwise it reports a
//! simulated success with a generated code so the flow can complete in
//! development.

use chrono::Utc;
use derive_more::Display;
use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::services;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    #[display("email")]
    Email,
    #[display("whatsapp")]
    Whatsapp,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct FestaRef {
    pub nome: Option<String>,
}

/// Loosely-attached payment summary echoed into the ticket email
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PaymentSummary {
    #[serde(default)]
    pub festa: Option<FestaRef>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub valor: Option<Decimal>,
    #[serde(rename = "paymentId", default)]
    pub payment_id: Option<String>,
}

#[derive(Debug, Display, derive_more::Error)]
pub enum DeliveryError {
    #[display("Dados incompletos")]
    MissingDestination,
    #[display("E-mail inválido")]
    InvalidEmail,
    #[display("Número de WhatsApp inválido")]
    InvalidWhatsapp,
    #[display("falha no envio do ingresso: {_0}")]
    Transport(#[error(not(source))] anyhow::Error),
}

#[derive(Debug)]
pub struct TicketDelivery {
    pub message: String,
    pub ticket_id: Option<String>,
}

/// Ticket codes are `SAFE-` plus the millisecond timestamp in base36
pub fn generate_ticket_code() -> String {
    format!("SAFE-{}", to_base36_upper(Utc::now().timestamp_millis() as u64))
}

fn to_base36_upper(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".into();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

/// Simple `local@domain.tld` shape check; the mail transport does the real
/// address validation when a send is attempted
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Brazilian mobile numbers: DDD plus 9 digits, exactly 11 after stripping
/// formatting
pub fn normalize_whatsapp(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.len() == 11).then_some(digits)
}

fn mask_destination(value: &str) -> String {
    let prefix: String = value.chars().take(3).collect();
    format!("{prefix}***")
}

pub async fn send_ticket(
    mail_service: &services::ImplMailService,
    method: ContactMethod,
    email: Option<&str>,
    whatsapp: Option<&str>,
    summary: Option<&PaymentSummary>,
) -> Result<TicketDelivery, DeliveryError> {
    match method {
        ContactMethod::Whatsapp => {
            let destination = whatsapp.ok_or(DeliveryError::MissingDestination)?;
            let digits =
                normalize_whatsapp(destination).ok_or(DeliveryError::InvalidWhatsapp)?;

            // no real integration exists
            info!("WhatsApp ticket simulado para: {}", mask_destination(&digits));
            Ok(TicketDelivery {
                message: "Ticket enviado via WhatsApp (simulado)".into(),
                ticket_id: None,
            })
        }
        ContactMethod::Email => {
            let destination = email.ok_or(DeliveryError::MissingDestination)?;
            if !is_valid_email(destination) {
                return Err(DeliveryError::InvalidEmail);
            }

            let ticket_code = generate_ticket_code();

            if !mail_service.is_configured() {
                info!("Email simulado para: {}", mask_destination(destination));
                return Ok(TicketDelivery {
                    message: "Email enviado com sucesso! (simulado - configure SMTP_USER e \
                              SMTP_PASS para envio real)"
                        .into(),
                    ticket_id: Some(ticket_code),
                });
            }

            mail_service
                .send_ticket(destination, &ticket_code, summary)
                .await
                .map_err(DeliveryError::Transport)?;

            info!("Ingresso enviado para: {}", mask_destination(destination));
            Ok(TicketDelivery {
                message: "Ingresso enviado com sucesso!".into(),
                ticket_id: Some(ticket_code),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockMailService;
    use std::sync::Arc;

    fn null_mailer() -> services::ImplMailService {
        Arc::new(crate::services::mail::NullMailer)
    }

    #[test]
    fn ticket_codes_match_the_safe_format() {
        let code = generate_ticket_code();
        let suffix = code.strip_prefix("SAFE-").expect("SAFE- prefix");
        assert!(!suffix.is_empty());
        assert!(suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(to_base36_upper(0), "0");
        assert_eq!(to_base36_upper(35), "Z");
        assert_eq!(to_base36_upper(36), "10");
        assert_eq!(to_base36_upper(46655), "ZZZ");
    }

    #[test]
    fn email_shape_validation() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("maria.silva@sub.dominio.br"));

        assert!(!is_valid_email("sem-arroba.com"));
        assert!(!is_valid_email("@dominio.com"));
        assert!(!is_valid_email("a@semtld"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn whatsapp_numbers_normalize_to_eleven_digits() {
        assert_eq!(
            normalize_whatsapp("(11) 98765-4321").as_deref(),
            Some("11987654321")
        );
        assert_eq!(normalize_whatsapp("11987654321").as_deref(), Some("11987654321"));

        assert!(normalize_whatsapp("987654321").is_none());
        assert!(normalize_whatsapp("(11) 98765-43210").is_none());
        assert!(normalize_whatsapp("").is_none());
    }

    #[ntex::test]
    async fn email_without_transport_simulates_success() {
        let mailer = null_mailer();
        let delivery = send_ticket(&mailer, ContactMethod::Email, Some("a@b.com"), None, None)
            .await
            .unwrap();

        assert!(delivery.message.contains("simulado"));
        let ticket_id = delivery.ticket_id.expect("simulated path still issues a code");
        assert!(ticket_id.starts_with("SAFE-"));
    }

    #[ntex::test]
    async fn whatsapp_is_always_simulated() {
        let mailer = null_mailer();
        let delivery = send_ticket(
            &mailer,
            ContactMethod::Whatsapp,
            None,
            Some("(21) 99876-1234"),
            None,
        )
        .await
        .unwrap();

        assert_eq!(delivery.message, "Ticket enviado via WhatsApp (simulado)");
        assert!(delivery.ticket_id.is_none());
    }

    #[ntex::test]
    async fn invalid_destinations_are_rejected_before_any_send() {
        let mailer = null_mailer();

        let err = send_ticket(&mailer, ContactMethod::Email, Some("invalido"), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::InvalidEmail));

        let err = send_ticket(&mailer, ContactMethod::Whatsapp, None, Some("123"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::InvalidWhatsapp));

        let err = send_ticket(&mailer, ContactMethod::Email, None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::MissingDestination));
    }

    #[ntex::test]
    async fn configured_transport_sends_the_generated_code() {
        let mut mock = MockMailService::new();
        mock.expect_is_configured().return_const(true);
        mock.expect_send_ticket()
            .withf(|to, code, _| to == "a@b.com" && code.starts_with("SAFE-"))
            .times(1)
            .returning(|_, _, _| Ok(()));
        let mailer: services::ImplMailService = Arc::new(mock);

        let delivery = send_ticket(&mailer, ContactMethod::Email, Some("a@b.com"), None, None)
            .await
            .unwrap();

        assert_eq!(delivery.message, "Ingresso enviado com sucesso!");
        assert!(delivery.ticket_id.is_some());
    }

    #[ntex::test]
    async fn transport_failures_surface_as_delivery_errors() {
        let mut mock = MockMailService::new();
        mock.expect_is_configured().return_const(true);
        mock.expect_send_ticket()
            .returning(|_, _, _| Err(anyhow::anyhow!("smtp down")));
        let mailer: services::ImplMailService = Arc::new(mock);

        let err = send_ticket(&mailer, ContactMethod::Email, Some("a@b.com"), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::Transport(_)));
    }
}

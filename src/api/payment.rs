//! Stateless pass-through to the Mercado Pago payments API.
//!
//! The provider owns every charge; nothing is persisted here. Each create
//! call carries a fresh idempotency key so a client retry cannot double
//! charge.

use derive_more::Display;
use log::error;
use serde::Serialize;
use uuid::Uuid;

use crate::{config, consts, models::mp_paym, utils};

#[derive(Debug, Display, derive_more::Error)]
pub enum MercadoPagoError {
    /// Provider answered with a non-2xx status; body is relayed to the caller
    #[display("mercado pago returned status {status}")]
    Upstream {
        status: u16,
        #[error(not(source))]
        body: serde_json::Value,
    },
    #[display("mercado pago request failed: {_0}")]
    Transport(reqwest::Error),
}

async fn parse_response(
    response: reqwest::Response,
) -> Result<mp_paym::PaymentResponse, MercadoPagoError> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);
        error!("mercado pago error ({status}): {body:#?}");
        return Err(MercadoPagoError::Upstream { status, body });
    }

    response
        .json::<mp_paym::PaymentResponse>()
        .await
        .map_err(MercadoPagoError::Transport)
}

async fn post_payment<T: Serialize + ?Sized>(
    body: &T,
) -> Result<mp_paym::PaymentResponse, MercadoPagoError> {
    let response = utils::REQUEST_CLIENT
        .post(format!("{}/v1/payments", consts::MERCADO_PAGO_API_BASE))
        .header("accept", "application/json")
        .header("content-type", "application/json")
        .header("X-Idempotency-Key", Uuid::new_v4().to_string())
        .bearer_auth(&config::APP_CONFIG.mercado_token)
        .json(body)
        .send()
        .await
        .map_err(MercadoPagoError::Transport)?;

    parse_response(response).await
}

/// Creates a PIX charge; the response carries the QR payload to display
pub async fn create_pix_payment(
    request: &mp_paym::PixPaymentRequest,
) -> Result<mp_paym::PaymentResponse, MercadoPagoError> {
    post_payment(request).await
}

/// Charges a card token; brand is inferred by the provider from the token
pub async fn create_card_payment(
    request: &mp_paym::CardPaymentRequest,
) -> Result<mp_paym::PaymentResponse, MercadoPagoError> {
    post_payment(request).await
}

/// Looks up a charge by provider id
pub async fn get_payment(
    payment_id: &str,
) -> Result<mp_paym::PaymentResponse, MercadoPagoError> {
    let response = utils::REQUEST_CLIENT
        .get(format!(
            "{}/v1/payments/{payment_id}",
            consts::MERCADO_PAGO_API_BASE
        ))
        .header("accept", "application/json")
        .bearer_auth(&config::APP_CONFIG.mercado_token)
        .send()
        .await
        .map_err(MercadoPagoError::Transport)?;

    parse_response(response).await
}

/// Maps the provider's card rejection codes to user-facing pt-BR text
pub fn reject_message(status_detail: &str) -> &'static str {
    match status_detail {
        "cc_rejected_bad_filled_card_number" => "Número do cartão inválido",
        "cc_rejected_bad_filled_date" => "Data de validade inválida",
        "cc_rejected_bad_filled_other" => "Dados do cartão inválidos",
        "cc_rejected_bad_filled_security_code" => "Código de segurança inválido",
        "cc_rejected_blacklist" => "Cartão não autorizado",
        "cc_rejected_call_for_authorize" => "Entre em contato com seu banco",
        "cc_rejected_card_disabled" => "Cartão desabilitado",
        "cc_rejected_duplicated_payment" => "Pagamento duplicado",
        "cc_rejected_high_risk" => "Pagamento recusado por segurança",
        "cc_rejected_insufficient_amount" => "Saldo insuficiente",
        "cc_rejected_other_reason" => "Pagamento recusado",
        _ => "Pagamento não processado",
    }
}

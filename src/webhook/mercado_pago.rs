//! Mercado Pago payment notification receiver.
//!
//! The provider retries deliveries that do not get a 2xx back, so this
//! endpoint acknowledges every notification it can parse, even when the
//! follow-up payment lookup fails. Processing is logged, never surfaced.

use log::{info, warn};
use ntex::web;
use serde::Deserialize;

use crate::api;

#[derive(Debug, Deserialize)]
pub struct NotificationData {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NotificationBody {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub data: Option<NotificationData>,
}

fn payment_id(body: &NotificationBody) -> Option<&str> {
    if body.event_type.as_deref() != Some("payment") {
        return None;
    }
    body.data.as_ref()?.id.as_deref()
}

#[web::post("/mercadopago")]
pub async fn receive(
    request_body: web::types::Json<NotificationBody>,
) -> Result<impl web::Responder, web::Error> {
    match payment_id(&request_body) {
        Some(id) => match api::payment::get_payment(id).await {
            Ok(payment) => info!(
                "webhook: pagamento {} agora em {}",
                payment.id, payment.status
            ),
            Err(e) => warn!("webhook: consulta do pagamento {id} falhou: {e}"),
        },
        None => info!(
            "webhook: notificação ignorada (type={:?})",
            request_body.event_type
        ),
    }

    Ok(web::HttpResponse::Ok().body("OK"))
}

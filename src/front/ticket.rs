//! Ticket delivery endpoint.

use ntex::web;
use serde::{Deserialize, Serialize};

use crate::api::ticket::{self, ContactMethod, PaymentSummary};
use crate::front::{AppState, errors};

#[derive(Debug, Deserialize)]
pub struct SendTicketBody {
    #[serde(rename = "contactMethod")]
    pub contact_method: Option<ContactMethod>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    #[serde(rename = "paymentData")]
    pub payment_data: Option<PaymentSummary>,
}

#[derive(Debug, Serialize)]
pub struct SendTicketResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "ticketId", skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
}

fn validate_body(body: &SendTicketBody) -> Result<ContactMethod, errors::ApiError> {
    let method = body
        .contact_method
        .ok_or_else(|| errors::ApiError::InvalidInput("Dados incompletos".into()))?;

    let has_destination = match method {
        ContactMethod::Email => body.email.as_deref().is_some_and(|e| !e.is_empty()),
        ContactMethod::Whatsapp => body.whatsapp.as_deref().is_some_and(|w| !w.is_empty()),
    };
    if !has_destination {
        return Err(errors::ApiError::InvalidInput("Dados incompletos".into()));
    }

    Ok(method)
}

#[web::post("/send-ticket")]
pub async fn send_ticket(
    state: web::types::State<AppState>,
    request_body: web::types::Json<SendTicketBody>,
) -> Result<impl web::Responder, web::Error> {
    let body = request_body.0;
    let method = validate_body(&body)?;

    let delivery = ticket::send_ticket(
        &state.mail_service,
        method,
        body.email.as_deref(),
        body.whatsapp.as_deref(),
        body.payment_data.as_ref(),
    )
    .await
    .map_err(errors::ApiError::from)?;

    Ok(web::HttpResponse::Ok().json(&SendTicketResponse {
        success: true,
        message: delivery.message,
        ticket_id: delivery.ticket_id,
    }))
}

//! Payment endpoints: thin translation between the frontend and the
//! Mercado Pago API. Amounts are validated before any provider call.

use log::info;
use ntex::web;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::{
    api, consts,
    front::errors,
    models::{mp_paym, payment::PaymentStatus},
};

#[derive(Debug, Deserialize)]
pub struct PixPayerBody {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PixPaymentBody {
    #[serde(with = "rust_decimal::serde::float")]
    pub transaction_amount: Decimal,
    pub description: Option<String>,
    pub payer: Option<PixPayerBody>,
}

#[derive(Debug, Deserialize)]
pub struct CardPayerBody {
    pub email: Option<String>,
    pub identification: Option<mp_paym::PayerIdentification>,
}

#[derive(Debug, Deserialize)]
pub struct CardPaymentBody {
    pub token: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub transaction_amount: Decimal,
    pub installments: Option<u32>,
    pub payer: Option<CardPayerBody>,
}

fn ensure_positive_amount(amount: Decimal) -> Result<(), errors::ApiError> {
    if amount <= Decimal::ZERO {
        return Err(errors::ApiError::InvalidAmount);
    }
    Ok(())
}

fn build_pix_request(body: PixPaymentBody) -> mp_paym::PixPaymentRequest {
    mp_paym::PixPaymentRequest {
        transaction_amount: body.transaction_amount,
        description: body
            .description
            .unwrap_or_else(|| consts::DEFAULT_PAYMENT_DESCRIPTION.into()),
        payment_method_id: "pix".into(),
        payer: mp_paym::PayerInfo {
            email: body
                .payer
                .and_then(|p| p.email)
                .unwrap_or_else(|| consts::DEFAULT_PAYER_EMAIL.into()),
            identification: None,
        },
    }
}

fn build_card_request(body: CardPaymentBody, token: String) -> mp_paym::CardPaymentRequest {
    let (email, identification) = body
        .payer
        .map(|p| (p.email, p.identification))
        .unwrap_or((None, None));

    mp_paym::CardPaymentRequest {
        token,
        transaction_amount: body.transaction_amount,
        installments: body.installments.unwrap_or(1),
        payer: mp_paym::PayerInfo {
            email: email.unwrap_or_else(|| consts::DEFAULT_PAYER_EMAIL.into()),
            identification,
        },
    }
}

fn status_message(response: &mp_paym::PaymentResponse) -> String {
    match response.status {
        PaymentStatus::Approved => "Pagamento aprovado!".to_string(),
        PaymentStatus::Rejected => {
            api::payment::reject_message(response.status_detail.as_deref().unwrap_or(""))
                .to_string()
        }
        status => format!("Pagamento {status}"),
    }
}

#[web::post("/create-pix-payment")]
pub async fn create_pix_payment(
    request_body: web::types::Json<PixPaymentBody>,
) -> Result<impl web::Responder, web::Error> {
    let body = request_body.0;
    ensure_positive_amount(body.transaction_amount)?;

    let request = build_pix_request(body);
    let response = api::payment::create_pix_payment(&request)
        .await
        .map_err(errors::ApiError::from)?;

    info!("pix {} criado com status {}", response.id, response.status);

    Ok(web::HttpResponse::Ok().json(&json!({
        "id": response.id,
        "status": response.status,
        "status_detail": response.status_detail,
        "point_of_interaction": response.point_of_interaction,
    })))
}

#[web::post("/process-card-payment")]
pub async fn process_card_payment(
    request_body: web::types::Json<CardPaymentBody>,
) -> Result<impl web::Responder, web::Error> {
    let mut body = request_body.0;
    ensure_positive_amount(body.transaction_amount)?;

    let token = body
        .token
        .take()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| errors::ApiError::InvalidInput("Token não fornecido".into()))?;

    let request = build_card_request(body, token);
    let response = api::payment::create_card_payment(&request)
        .await
        .map_err(errors::ApiError::from)?;

    info!(
        "pagamento {} com status {} ({})",
        response.id,
        response.status,
        response.payment_method_id.as_deref().unwrap_or("?"),
    );

    let message = status_message(&response);
    Ok(web::HttpResponse::Ok().json(&json!({
        "id": response.id,
        "status": response.status,
        "status_detail": response.status_detail,
        "payment_method_id": response.payment_method_id,
        "message": message,
    })))
}

#[web::get("/payment-status/{payment_id}")]
pub async fn payment_status(
    payment_id: web::types::Path<String>,
) -> Result<impl web::Responder, web::Error> {
    let response = api::payment::get_payment(&payment_id)
        .await
        .map_err(|e| {
            log::warn!("consulta de pagamento {} falhou: {e}", payment_id.as_str());
            errors::ApiError::NotFound("Pagamento não encontrado".into())
        })?;

    Ok(web::HttpResponse::Ok().json(&json!({
        "id": response.id,
        "status": response.status,
        "status_detail": response.status_detail,
        "payment_method_id": response.payment_method_id,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_and_negative_amounts_are_rejected_before_any_provider_call() {
        assert!(matches!(
            ensure_positive_amount(dec!(0)),
            Err(errors::ApiError::InvalidAmount)
        ));
        assert!(matches!(
            ensure_positive_amount(dec!(-1)),
            Err(errors::ApiError::InvalidAmount)
        ));
        assert!(ensure_positive_amount(dec!(0.01)).is_ok());
    }

    #[ntex::test]
    async fn pix_create_with_zero_amount_answers_400_from_the_guard() {
        let srv =
            web::test::init_service(web::App::new().service(create_pix_payment)).await;

        let req = web::test::TestRequest::post()
            .uri("/create-pix-payment")
            .set_json(&serde_json::json!({ "transaction_amount": 0.0 }))
            .to_request();
        let resp = web::test::call_service(&srv, req).await;
        assert_eq!(resp.status(), ntex::http::StatusCode::BAD_REQUEST);

        // the guard's own body, proving no provider request was built
        let body = web::test::read_body(resp).await;
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Valor inválido");
        assert_eq!(
            body["message"],
            "O valor da transação deve ser maior que zero"
        );
    }

    #[test]
    fn pix_request_fills_defaults() {
        let request = build_pix_request(PixPaymentBody {
            transaction_amount: dec!(105),
            description: None,
            payer: None,
        });

        assert_eq!(request.payment_method_id, "pix");
        assert_eq!(request.description, consts::DEFAULT_PAYMENT_DESCRIPTION);
        assert_eq!(request.payer.email, consts::DEFAULT_PAYER_EMAIL);
    }

    #[test]
    fn card_request_defaults_to_single_installment() {
        let request = build_card_request(
            CardPaymentBody {
                token: None,
                transaction_amount: dec!(108),
                installments: None,
                payer: Some(CardPayerBody {
                    email: Some("a@b.com".into()),
                    identification: None,
                }),
            },
            "tok_123".into(),
        );

        assert_eq!(request.installments, 1);
        assert_eq!(request.token, "tok_123");
        assert_eq!(request.payer.email, "a@b.com");
    }

    #[test]
    fn status_messages_cover_the_outcomes() {
        let approved = mp_paym::PaymentResponse {
            id: 1,
            status: PaymentStatus::Approved,
            ..Default::default()
        };
        assert_eq!(status_message(&approved), "Pagamento aprovado!");

        let rejected = mp_paym::PaymentResponse {
            id: 2,
            status: PaymentStatus::Rejected,
            status_detail: Some("cc_rejected_insufficient_amount".into()),
            ..Default::default()
        };
        assert_eq!(status_message(&rejected), "Saldo insuficiente");

        let in_process = mp_paym::PaymentResponse {
            id: 3,
            status: PaymentStatus::InProcess,
            ..Default::default()
        };
        assert_eq!(status_message(&in_process), "Pagamento in_process");
    }
}

//! Peer-to-peer resale handshake endpoints.
//!
//! One party mints a link, the counterparty opens it and confirms or
//! rejects. The waiting party long-polls `wait/{trade_id}` until the hub
//! delivers an event or the window closes.

use log::{info, warn};
use ntex::web;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::consts;
use crate::front::{AppState, errors};
use crate::models::resale::{ResaleLink, TradeRole};
use crate::services::trade::{TradeEvent, TradeHub};

#[derive(Debug, Deserialize)]
pub struct CreateLinkBody {
    pub ingresso: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub valor: Decimal,
    pub role: TradeRole,
}

#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub trade_id: Uuid,
    pub link: String,
    pub ingresso: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub valor: Decimal,
    pub role: TradeRole,
}

/// Where the confirming party goes next
#[derive(Debug, Serialize, PartialEq)]
pub struct TradeOutcome {
    pub outcome: &'static str,
    pub target: String,
}

fn payment_target(valor: Decimal) -> String {
    format!("/pagamento?valor={valor}")
}

/// Link generators wrote their own role into `source`, so the branch reads
/// `source`: a seller-made link means the opener is the buyer and pays now;
/// a buyer-made link means the seller confirms and the buyer is notified.
async fn resolve_confirm(hub: &TradeHub, link: &ResaleLink) -> TradeOutcome {
    match link.source {
        TradeRole::Vendedor => {
            // nobody long-polls a seller link; the trade ends here
            hub.close(link.trade_id).await;
            TradeOutcome {
                outcome: "payment",
                target: payment_target(link.valor),
            }
        }
        TradeRole::Comprador => {
            let known = hub
                .publish(link.trade_id, TradeEvent::GoToPayment { valor: link.valor })
                .await;
            if !known {
                warn!(
                    "confirmação da negociação {} que o hub não conhece",
                    link.trade_id
                );
            }
            TradeOutcome {
                outcome: "waiting",
                target: "/aguardando".into(),
            }
        }
    }
}

#[web::post("/link")]
pub async fn create_link(
    state: web::types::State<AppState>,
    request_body: web::types::Json<CreateLinkBody>,
) -> Result<impl web::Responder, web::Error> {
    let body = request_body.0;
    let link = ResaleLink::new(&body.ingresso, body.valor, body.role)
        .map_err(|e| errors::ApiError::InvalidInput(e.to_string()))?;

    state.trade_hub.register(link.trade_id).await;
    info!("negociação {} criada ({})", link.trade_id, link.role);

    Ok(web::HttpResponse::Ok().json(&CreateLinkResponse {
        trade_id: link.trade_id,
        link: link.confirm_path(),
        ingresso: link.ingresso,
        valor: link.valor,
        role: link.role,
    }))
}

#[web::post("/confirm")]
pub async fn confirm_trade(
    state: web::types::State<AppState>,
    request_body: web::types::Json<HashMap<String, String>>,
) -> Result<impl web::Responder, web::Error> {
    let link = ResaleLink::from_params(&request_body)
        .map_err(|e| errors::ApiError::InvalidInput(e.to_string()))?;

    let outcome = resolve_confirm(&state.trade_hub, &link).await;
    info!(
        "negociação {} confirmada por {} -> {}",
        link.trade_id, link.source, outcome.outcome
    );
    Ok(web::HttpResponse::Ok().json(&outcome))
}

#[derive(Debug, Deserialize)]
pub struct RejectBody {
    pub trade: Uuid,
}

#[web::post("/reject")]
pub async fn reject_trade(
    state: web::types::State<AppState>,
    request_body: web::types::Json<RejectBody>,
) -> Result<impl web::Responder, web::Error> {
    let trade_id = request_body.trade;

    // latch the rejection; the waiting party's next poll observes it and
    // closes the trade
    state.trade_hub.publish(trade_id, TradeEvent::Rejected).await;
    info!("negociação {trade_id} recusada");

    Ok(web::HttpResponse::Ok().json(&TradeOutcome {
        outcome: "cancelled",
        target: "/cancelado".into(),
    }))
}

#[derive(Debug, Serialize, PartialEq)]
pub struct WaitResponse {
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

async fn wait_for_event(hub: &TradeHub, trade_id: Uuid) -> Result<WaitResponse, errors::ApiError> {
    let mut rx = hub
        .subscribe(trade_id)
        .await
        .ok_or_else(|| errors::ApiError::NotFound("Negociação não encontrada".into()))?;

    // an event latched before this poll resolves immediately
    let latched = rx.borrow_and_update().clone();
    let event = match latched {
        Some(event) => Some(event),
        None => match tokio::time::timeout(consts::TRADE_WAIT_WINDOW, rx.changed()).await {
            Ok(Ok(())) => rx.borrow_and_update().clone(),
            // channel closed or window elapsed: the caller re-polls
            Ok(Err(_)) | Err(_) => None,
        },
    };

    let response = match event {
        Some(TradeEvent::GoToPayment { valor }) => {
            hub.close(trade_id).await;
            WaitResponse {
                event: "go_to_payment",
                target: Some(payment_target(valor)),
            }
        }
        Some(TradeEvent::Rejected) => {
            hub.close(trade_id).await;
            WaitResponse {
                event: "rejected",
                target: Some("/cancelado".into()),
            }
        }
        None => WaitResponse {
            event: "timeout",
            target: None,
        },
    };
    Ok(response)
}

#[web::get("/wait/{trade_id}")]
pub async fn wait_trade(
    state: web::types::State<AppState>,
    trade_id: web::types::Path<Uuid>,
) -> Result<impl web::Responder, web::Error> {
    let response = wait_for_event(&state.trade_hub, *trade_id).await?;
    Ok(web::HttpResponse::Ok().json(&response))
}

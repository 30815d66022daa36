//! Checkout support endpoints: price quotes for a cart selection and the
//! advisory card-brand hint shown while the buyer types.

use ntex::web;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

use crate::front::errors;
use crate::models::card::detect_card_brand;
use crate::models::checkout::{CartSelection, PaymentMethod};
use crate::models::festa::{self, Festa};

#[derive(Debug, Deserialize)]
pub struct QuoteBody {
    pub festa: String,
    pub quantidades: BTreeMap<String, u32>,
    pub metodo: PaymentMethod,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxa: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Replays the selection through the cart so the order-wide cap applies
fn build_selection(
    quantidades: &BTreeMap<String, u32>,
) -> Result<CartSelection, errors::ApiError> {
    let mut cart = CartSelection::new();
    for (categoria, qty) in quantidades {
        for _ in 0..*qty {
            if !cart.increment(categoria) {
                return Err(errors::ApiError::InvalidInput(
                    "Máximo de 5 ingressos por pedido".into(),
                ));
            }
        }
    }
    Ok(cart)
}

fn quote_for(festa: &Festa, cart: &CartSelection, metodo: PaymentMethod) -> QuoteResponse {
    QuoteResponse {
        subtotal: cart.subtotal(&festa.categorias),
        taxa: cart.fee(&festa.categorias, metodo),
        total: cart.total(&festa.categorias, metodo),
    }
}

#[web::post("/quote")]
pub async fn quote(
    request_body: web::types::Json<QuoteBody>,
) -> Result<impl web::Responder, web::Error> {
    let body = request_body.0;
    let festa = festa::find_by_nome(&body.festa)
        .ok_or_else(|| errors::ApiError::NotFound("Festa não encontrada".into()))?;

    if let Some(categoria) = body
        .quantidades
        .keys()
        .find(|c| !festa.categorias.contains_key(*c))
    {
        return Err(errors::ApiError::InvalidInput(format!(
            "Categoria desconhecida: {categoria}"
        ))
        .into());
    }

    let cart = build_selection(&body.quantidades)?;
    Ok(web::HttpResponse::Ok().json(&quote_for(festa, &cart, body.metodo)))
}

#[derive(Debug, Deserialize)]
pub struct CardBrandBody {
    #[serde(rename = "cardNumber")]
    pub card_number: String,
}

#[web::post("/card-brand")]
pub async fn card_brand(
    request_body: web::types::Json<CardBrandBody>,
) -> Result<impl web::Responder, web::Error> {
    let brand = detect_card_brand(&request_body.card_number);
    Ok(web::HttpResponse::Ok().json(&json!({
        "brand": brand.map(|b| b.to_string()),
    })))
}

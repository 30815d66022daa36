//! Health and configuration diagnostics.

use chrono::Utc;
use ntex::web;
use serde_json::json;

use crate::config::{APP_CONFIG, AppConfig};
use crate::consts;
use crate::front::errors;

#[web::get("/")]
pub async fn index() -> Result<impl web::Responder, web::Error> {
    Ok(web::HttpResponse::Ok().json(&json!({
        "message": "API do Mercado Pago funcionando!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "festas": "GET /api/festas",
            "checkout": "POST /api/checkout/quote",
            "pix": "POST /api/create-pix-payment",
            "cartao": "POST /api/process-card-payment",
            "status": "GET /api/payment-status/{payment_id}",
            "ingresso": "POST /api/send-ticket",
            "revenda": "POST /api/revenda/link",
        },
    })))
}

#[web::get("/test")]
pub async fn api_test() -> Result<impl web::Responder, web::Error> {
    Ok(web::HttpResponse::Ok().json(&json!({
        "message": "API funcionando corretamente!",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": APP_CONFIG.env.as_str(),
    })))
}

fn token_preview(token: &str) -> Option<String> {
    (!token.is_empty()).then(|| {
        let prefix: String = token.chars().take(consts::TOKEN_PREVIEW_LEN).collect();
        format!("{prefix}...")
    })
}

fn config_report(app_config: &AppConfig) -> serde_json::Value {
    let configured = app_config.has_mercado_token();
    json!({
        "configured": configured,
        "accessToken": if configured { "Configurado" } else { "Não configurado" },
        "publicKey": if app_config.has_mercado_public_key() {
            "Configurado"
        } else {
            "Não configurado"
        },
        "tokenPreview": token_preview(&app_config.mercado_token),
        "message": if configured {
            "Credenciais do Mercado Pago configuradas"
        } else {
            "Configure MERCADO_TOKEN para processar pagamentos"
        },
    })
}

#[web::get("/config/check")]
pub async fn config_check() -> Result<impl web::Responder, web::Error> {
    Ok(web::HttpResponse::Ok().json(&config_report(&APP_CONFIG)))
}

pub async fn not_found() -> Result<web::HttpResponse, web::Error> {
    Err(errors::ApiError::NotFound("Rota não encontrada".into()).into())
}

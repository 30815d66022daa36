//! # SafeSwap Web Application
//!
//! Main entry point for the ticket marketplace backend. Configures SSL,
//! middleware, shared services, and route handling.

#![recursion_limit = "256"]

pub mod api;
pub mod config;
pub mod consts;
pub mod front;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod webhook;

use log::{info, warn};
use ntex::web;
use ntex_cors::Cors;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    logger::setup_simple_logger()?;

    let app_config = &*config::APP_CONFIG;

    if !app_config.has_mercado_token() {
        warn!("MERCADO_TOKEN não configurado; pagamentos serão recusados pelo provedor");
    }
    if app_config.has_mail_credentials() {
        info!("entrega de ingressos por email habilitada via {}", app_config.smtp_server);
    } else {
        info!("SMTP não configurado; entrega de ingressos em modo simulado");
    }

    let mail_service = services::mail::build_mail_service(app_config)?;
    let trade_hub = services::trade::TradeHub::default();

    info!("iniciando em {}", app_config.base_url());
    configure_and_run_server(mail_service, trade_hub).await
}

/// Configures SSL acceptor for production environments
fn setup_ssl_acceptor() -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    let mut ssl_acceptor = SslAcceptor::mozilla_intermediate(SslMethod::tls_server())
        .map_err(|e| anyhow::anyhow!("Failed to create SSL acceptor: {}", e))?;

    let app_config = &*config::APP_CONFIG;
    ssl_acceptor
        .set_private_key_file(&app_config.private_key_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load private key from {}: {}",
                app_config.private_key_path,
                e
            )
        })?;

    ssl_acceptor
        .set_certificate_file(&app_config.certificate_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load certificate from {}: {}",
                app_config.certificate_path,
                e
            )
        })?;

    Ok(ssl_acceptor)
}

/// Configures and starts the web server with appropriate SSL settings
async fn configure_and_run_server(
    mail_service: services::ImplMailService,
    trade_hub: services::trade::TradeHub,
) -> anyhow::Result<()> {
    let app_config = &*config::APP_CONFIG;
    let server_addr = ("0.0.0.0", app_config.web_server_port);

    let server = web::server(move || {
        web::App::new()
            .wrap(
                Cors::new()
                    .allowed_methods(vec!["GET", "HEAD", "POST", "OPTIONS"])
                    .allowed_origin("http://localhost:3000")
                    .allowed_origin("https://api.mercadopago.com")
                    .finish(),
            )
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(front::AppState {
                mail_service: mail_service.clone(),
                trade_hub: trade_hub.clone(),
            })
            .configure(webhook::routes::mercado_pago)
            .configure(front::routes::api)
            .service((front::diagnostics::index,))
            .default_service(web::route().to(front::diagnostics::not_found))
    });

    let bound_server = if app_config.is_prod() {
        let ssl_acceptor = setup_ssl_acceptor()?;
        server.bind_openssl(server_addr, ssl_acceptor)?
    } else {
        server.bind(server_addr)?
    };

    bound_server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}

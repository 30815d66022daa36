pub mod checkout;
pub mod diagnostics;
pub mod errors;
pub mod festa;
pub mod payment;
pub mod resale;
pub mod routes;
pub mod ticket;

use crate::services;

#[derive(Clone)]
pub struct AppState {
    pub mail_service: services::ImplMailService,
    pub trade_hub: services::trade::TradeHub,
}

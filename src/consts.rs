use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;

pub const MERCADO_PAGO_API_BASE: &str = "https://api.mercadopago.com";

/// Service fee applied on top of the cart subtotal, per payment method
pub const PIX_FEE_RATE: Decimal = dec!(0.05);
pub const CARD_FEE_RATE: Decimal = dec!(0.08);

/// Hard cap on tickets per order, across all categories
pub const MAX_TICKETS_PER_ORDER: u32 = 5;

pub const DEFAULT_PAYMENT_DESCRIPTION: &str = "Ingresso para festa";
pub const DEFAULT_PAYER_EMAIL: &str = "cliente@email.com";

/// How long a single long-poll on a resale trade stays open
pub const TRADE_WAIT_WINDOW: Duration = Duration::from_secs(25);

/// Trades with no terminal event within this window are dropped from the hub
pub const TRADE_TTL: Duration = Duration::from_secs(30 * 60);

/// Visible prefix length for the masked access token in /api/config/check
pub const TOKEN_PREVIEW_LEN: usize = 20;

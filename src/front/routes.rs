use ntex::web;

use super::{checkout, diagnostics, festa, payment, resale, ticket};

/// Configures the public API routes.
///
/// # Routes
/// - `GET /api/test` - Liveness check
/// - `GET /api/config/check` - Payment credential status
/// - `POST /api/create-pix-payment` - Create a PIX payment
/// - `POST /api/process-card-payment` - Process a card payment
/// - `GET /api/payment-status/{payment_id}` - Query a payment
/// - `POST /api/send-ticket` - Deliver a ticket by email or WhatsApp
///
/// # Festas Sub-routes (/api/festas)
/// - `GET /api/festas` - Event catalog
/// - `GET /api/festas/{nome}` - Event detail
///
/// # Checkout Sub-routes (/api/checkout)
/// - `POST /api/checkout/quote` - Price a cart selection
/// - `POST /api/checkout/card-brand` - Advisory card-brand hint
///
/// # Revenda Sub-routes (/api/revenda)
/// - `POST /api/revenda/link` - Mint a resale link
/// - `POST /api/revenda/confirm` - Confirm a trade
/// - `POST /api/revenda/reject` - Reject a trade
/// - `GET /api/revenda/wait/{trade_id}` - Long-poll for the trade outcome
pub fn api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").service((
        diagnostics::api_test,
        diagnostics::config_check,
        payment::create_pix_payment,
        payment::process_card_payment,
        payment::payment_status,
        ticket::send_ticket,
        web::scope("/festas").service((festa::list, festa::detail)),
        web::scope("/checkout").service((checkout::quote, checkout::card_brand)),
        web::scope("/revenda").service((
            resale::create_link,
            resale::confirm_trade,
            resale::reject_trade,
            resale::wait_trade,
        )),
    )));
}

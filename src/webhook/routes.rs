use ntex::web;

/// Configures payment provider webhook routes.
///
/// These are public endpoints called by Mercado Pago, not by the frontend.
///
/// # Routes
/// - `POST /api/webhooks/mercadopago` - Payment notification receiver
pub fn mercado_pago(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/webhooks").service((super::mercado_pago::receive,)));
}

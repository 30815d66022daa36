pub mod mercado_pago;
pub mod routes;

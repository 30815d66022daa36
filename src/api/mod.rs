//! Business logic behind the HTTP handlers.
//!
//! - [`payment`] - Mercado Pago charge creation and lookup
//! - [`ticket`] - ticket code generation and delivery orchestration

pub mod payment;
pub mod ticket;

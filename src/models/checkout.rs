//! Cart selection and pricing.
//!
//! Quantities are capped at [`consts::MAX_TICKETS_PER_ORDER`] across all
//! categories and floored at zero per category. Totals are always
//! `subtotal + subtotal * fee_rate` for the active payment method.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::consts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Pix,
    Cartao,
}

impl PaymentMethod {
    pub fn fee_rate(self) -> Decimal {
        match self {
            PaymentMethod::Pix => consts::PIX_FEE_RATE,
            PaymentMethod::Cartao => consts::CARD_FEE_RATE,
        }
    }
}

/// Page-local ticket selection for a single festa
#[derive(Debug, Clone, Default)]
pub struct CartSelection {
    quantidades: BTreeMap<String, u32>,
}

impl CartSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantidade(&self, categoria: &str) -> u32 {
        self.quantidades.get(categoria).copied().unwrap_or(0)
    }

    pub fn total_selecionado(&self) -> u32 {
        self.quantidades.values().sum()
    }

    /// Adds one ticket in the category. Refused once the order-wide cap is
    /// reached; returns whether the increment was applied.
    pub fn increment(&mut self, categoria: &str) -> bool {
        if self.total_selecionado() >= consts::MAX_TICKETS_PER_ORDER {
            return false;
        }

        *self.quantidades.entry(categoria.to_string()).or_insert(0) += 1;
        true
    }

    /// Removes one ticket in the category, flooring at zero
    pub fn decrement(&mut self, categoria: &str) -> bool {
        match self.quantidades.get_mut(categoria) {
            Some(qty) if *qty > 0 => {
                *qty -= 1;
                true
            }
            _ => false,
        }
    }

    /// Sums price * quantity over the festa's category price map. Categories
    /// missing from the map contribute nothing.
    pub fn subtotal(&self, precos: &BTreeMap<String, Decimal>) -> Decimal {
        self.quantidades
            .iter()
            .filter_map(|(categoria, qty)| {
                precos
                    .get(categoria)
                    .map(|preco| *preco * Decimal::from(*qty))
            })
            .sum()
    }

    pub fn fee(&self, precos: &BTreeMap<String, Decimal>, method: PaymentMethod) -> Decimal {
        self.subtotal(precos) * method.fee_rate()
    }

    pub fn total(&self, precos: &BTreeMap<String, Decimal>, method: PaymentMethod) -> Decimal {
        let subtotal = self.subtotal(precos);
        subtotal + subtotal * method.fee_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn precos() -> BTreeMap<String, Decimal> {
        BTreeMap::from([
            ("Pista".to_string(), dec!(50)),
            ("VIP".to_string(), dec!(100)),
        ])
    }

    #[test]
    fn increment_is_capped_across_categories() {
        let mut cart = CartSelection::new();

        for _ in 0..3 {
            assert!(cart.increment("Pista"));
        }
        assert!(cart.increment("VIP"));
        assert!(cart.increment("VIP"));

        // sixth ticket refused no matter the category
        assert!(!cart.increment("Pista"));
        assert!(!cart.increment("VIP"));
        assert_eq!(cart.total_selecionado(), 5);
    }

    #[test]
    fn decrement_floors_at_zero() {
        let mut cart = CartSelection::new();
        assert!(!cart.decrement("Pista"));

        cart.increment("Pista");
        assert!(cart.decrement("Pista"));
        assert!(!cart.decrement("Pista"));
        assert_eq!(cart.quantidade("Pista"), 0);
    }

    #[test]
    fn totals_follow_method_fee_rate() {
        let mut cart = CartSelection::new();
        cart.increment("Pista");
        cart.increment("Pista");
        // subtotal = 100

        assert_eq!(cart.subtotal(&precos()), dec!(100));
        assert_eq!(cart.fee(&precos(), PaymentMethod::Pix), dec!(5.00));
        assert_eq!(cart.total(&precos(), PaymentMethod::Pix), dec!(105.00));
        assert_eq!(cart.total(&precos(), PaymentMethod::Cartao), dec!(108.00));
    }

    #[test]
    fn only_two_fee_rates_exist() {
        assert_eq!(PaymentMethod::Pix.fee_rate(), dec!(0.05));
        assert_eq!(PaymentMethod::Cartao.fee_rate(), dec!(0.08));
    }

    #[test]
    fn unknown_categories_do_not_price() {
        let mut cart = CartSelection::new();
        cart.increment("Camarote");
        assert_eq!(cart.subtotal(&precos()), Decimal::ZERO);
    }
}

//! Card brand detection by BIN prefix.
//!
//! Advisory only: the result is shown as a hint while typing and is never
//! sent to the provider, which determines the real brand from the token.

use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CardBrand {
    #[display("visa")]
    Visa,
    #[display("master")]
    Master,
    #[display("amex")]
    Amex,
    #[display("diners")]
    Diners,
    #[display("elo")]
    Elo,
    #[display("hipercard")]
    Hipercard,
}

const ELO_PREFIXES: [&str; 8] = [
    "636368", "438935", "504175", "451416", "636297", "5067", "4576", "4011",
];

/// Tests prefixes in fixed priority order; `None` leaves detection to the
/// provider. Note the order means Elo BINs starting with 4 or 5 resolve to
/// Visa/Mastercard first, matching the checkout hint behavior.
pub fn detect_card_brand(card_number: &str) -> Option<CardBrand> {
    let clean: String = card_number.chars().filter(|c| !c.is_whitespace()).collect();

    if clean.starts_with('4') {
        return Some(CardBrand::Visa);
    }

    if clean.starts_with('5') || starts_with_mastercard_2_series(&clean) {
        return Some(CardBrand::Master);
    }

    if clean.starts_with("34") || clean.starts_with("37") {
        return Some(CardBrand::Amex);
    }

    if clean.starts_with("30") || clean.starts_with("36") || clean.starts_with("38") {
        return Some(CardBrand::Diners);
    }

    if ELO_PREFIXES.iter().any(|prefix| clean.starts_with(prefix)) {
        return Some(CardBrand::Elo);
    }

    if clean.starts_with("606282") {
        return Some(CardBrand::Hipercard);
    }

    None
}

/// Mastercard's newer 2-series: two-digit prefix between 22 and 27
fn starts_with_mastercard_2_series(clean: &str) -> bool {
    clean.starts_with('2') && matches!(clean.as_bytes().get(1), Some(b'2'..=b'7'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visa_for_any_number_starting_with_4() {
        assert_eq!(detect_card_brand("4111 1111 1111 1111"), Some(CardBrand::Visa));
        assert_eq!(detect_card_brand("4"), Some(CardBrand::Visa));
    }

    #[test]
    fn mastercard_5_and_2_series() {
        assert_eq!(detect_card_brand("5555666677778884"), Some(CardBrand::Master));
        assert_eq!(detect_card_brand("2221000000000009"), Some(CardBrand::Master));
        assert_eq!(detect_card_brand("2720999999999999"), Some(CardBrand::Master));
        // outside the 22-27 window
        assert_eq!(detect_card_brand("2121000000000000"), None);
        assert_eq!(detect_card_brand("2800000000000000"), None);
    }

    #[test]
    fn amex_and_diners_prefixes() {
        assert_eq!(detect_card_brand("341111111111111"), Some(CardBrand::Amex));
        assert_eq!(detect_card_brand("371111111111111"), Some(CardBrand::Amex));
        assert_eq!(detect_card_brand("30111111111111"), Some(CardBrand::Diners));
        assert_eq!(detect_card_brand("36111111111111"), Some(CardBrand::Diners));
        assert_eq!(detect_card_brand("38111111111111"), Some(CardBrand::Diners));
    }

    #[test]
    fn elo_and_hipercard_bins() {
        assert_eq!(detect_card_brand("6363680000000000"), Some(CardBrand::Elo));
        assert_eq!(detect_card_brand("6362970000000000"), Some(CardBrand::Elo));
        assert_eq!(detect_card_brand("6062820000000000"), Some(CardBrand::Hipercard));
    }

    #[test]
    fn priority_order_wins_over_elo_bins() {
        // 5067 and 4576 are Elo BINs but 5/4 prefixes match first
        assert_eq!(detect_card_brand("5067000000000000"), Some(CardBrand::Master));
        assert_eq!(detect_card_brand("4576000000000000"), Some(CardBrand::Visa));
    }

    #[test]
    fn unknown_prefix_returns_none() {
        assert_eq!(detect_card_brand("9999999999999999"), None);
        assert_eq!(detect_card_brand(""), None);
    }
}

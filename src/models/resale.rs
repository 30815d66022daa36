//! Resale link payload and query-string codec.
//!
//! A link encodes a proposed peer-to-peer trade entirely in its URL: there is
//! no server-side record of the trade besides the in-memory hub channel used
//! for the confirm handshake. The generator writes its own role into both
//! `role` and `source`; `source` is what the confirm branch reads.

use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum TradeRole {
    #[display("comprador")]
    Comprador,
    #[display("vendedor")]
    Vendedor,
}

impl TradeRole {
    /// The party on the other side of the trade
    pub fn counterpart(self) -> Self {
        match self {
            TradeRole::Comprador => TradeRole::Vendedor,
            TradeRole::Vendedor => TradeRole::Comprador,
        }
    }
}

impl FromStr for TradeRole {
    type Err = LinkError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "comprador" => Ok(TradeRole::Comprador),
            "vendedor" => Ok(TradeRole::Vendedor),
            other => Err(LinkError::InvalidRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Display, derive_more::Error)]
pub enum LinkError {
    #[display("parâmetro obrigatório ausente: {_0}")]
    MissingParam(#[error(not(source))] &'static str),
    #[display("o nome do ingresso não pode ser vazio")]
    EmptyTicket,
    #[display("o valor deve ser um número maior que zero")]
    InvalidPrice,
    #[display("papel desconhecido: {_0}")]
    InvalidRole(#[error(not(source))] String),
    #[display("query string malformada")]
    MalformedQuery,
}

/// A proposed trade, encoded entirely in a URL
#[derive(Debug, Clone, PartialEq)]
pub struct ResaleLink {
    pub trade_id: Uuid,
    pub ingresso: String,
    pub valor: Decimal,
    pub role: TradeRole,
    pub source: TradeRole,
}

#[derive(Deserialize)]
struct RawLinkParams {
    ingresso: Option<String>,
    valor: Option<String>,
    role: Option<String>,
    source: Option<String>,
    trade: Option<Uuid>,
}

impl ResaleLink {
    /// Builds a fresh link for party A. `source` mirrors `role` (original
    /// wire format); a v4 trade id scopes the handshake channel.
    pub fn new(ingresso: &str, valor: Decimal, role: TradeRole) -> Result<Self, LinkError> {
        let ingresso = ingresso.trim();
        if ingresso.is_empty() {
            return Err(LinkError::EmptyTicket);
        }
        if valor <= Decimal::ZERO {
            return Err(LinkError::InvalidPrice);
        }

        Ok(Self {
            trade_id: Uuid::new_v4(),
            ingresso: ingresso.to_string(),
            valor,
            role,
            source: role,
        })
    }

    /// Query-string rendition: `ingresso`, `valor`, `role`, `source` plus the
    /// hub-scoping `trade` id
    pub fn to_query(&self) -> String {
        format!(
            "ingresso={ingresso}&valor={valor}&role={role}&source={source}&trade={trade}",
            ingresso = urlencoding::encode(&self.ingresso),
            valor = self.valor,
            role = self.role,
            source = self.source,
            trade = self.trade_id,
        )
    }

    /// Relative confirmation URL the counterparty opens
    pub fn confirm_path(&self) -> String {
        format!("/confirmar?{}", self.to_query())
    }

    pub fn from_query(query: &str) -> Result<Self, LinkError> {
        let raw: RawLinkParams =
            serde_urlencoded::from_str(query).map_err(|_| LinkError::MalformedQuery)?;
        Self::from_raw(raw)
    }

    /// Rebuilds a link from already-decoded query parameters, failing with
    /// the first missing or invalid field
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, LinkError> {
        let raw = RawLinkParams {
            ingresso: params.get("ingresso").cloned(),
            valor: params.get("valor").cloned(),
            role: params.get("role").cloned(),
            source: params.get("source").cloned(),
            trade: params
                .get("trade")
                .map(|value| Uuid::parse_str(value).map_err(|_| LinkError::MalformedQuery))
                .transpose()?,
        };
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawLinkParams) -> Result<Self, LinkError> {
        let ingresso = raw.ingresso.ok_or(LinkError::MissingParam("ingresso"))?;
        let valor = raw.valor.ok_or(LinkError::MissingParam("valor"))?;
        let role = raw.role.ok_or(LinkError::MissingParam("role"))?;
        let source = raw.source.ok_or(LinkError::MissingParam("source"))?;
        let trade_id = raw.trade.ok_or(LinkError::MissingParam("trade"))?;

        if ingresso.trim().is_empty() {
            return Err(LinkError::EmptyTicket);
        }

        let valor = Decimal::from_str(&valor).map_err(|_| LinkError::InvalidPrice)?;
        if valor <= Decimal::ZERO {
            return Err(LinkError::InvalidPrice);
        }

        Ok(Self {
            trade_id,
            ingresso: ingresso.trim().to_string(),
            valor,
            role: role.parse()?,
            source: source.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn link_round_trips_through_its_query_string() {
        let link = ResaleLink::new("VIP Pass", dec!(150), TradeRole::Vendedor).unwrap();
        let decoded = ResaleLink::from_query(&link.to_query()).unwrap();

        assert_eq!(decoded, link);
        assert_eq!(decoded.ingresso, "VIP Pass");
        assert_eq!(decoded.valor, dec!(150));
        assert_eq!(decoded.role, TradeRole::Vendedor);
        assert_eq!(decoded.source, decoded.role);
    }

    #[test]
    fn round_trip_preserves_special_characters() {
        let link = ResaleLink::new("Réveillon & Cia 2027", dec!(99.90), TradeRole::Comprador)
            .unwrap();
        let decoded = ResaleLink::from_query(&link.to_query()).unwrap();
        assert_eq!(decoded, link);
    }

    #[test]
    fn confirm_path_has_exactly_the_expected_params() {
        let link = ResaleLink::new("Pista", dec!(80), TradeRole::Comprador).unwrap();
        let path = link.confirm_path();

        assert!(path.starts_with("/confirmar?ingresso=Pista&valor=80&role=comprador"));
        assert!(path.contains("&source=comprador"));
        assert!(path.contains(&format!("&trade={}", link.trade_id)));
    }

    #[test]
    fn missing_params_invalidate_the_link() {
        let err = ResaleLink::from_query("valor=150&role=vendedor&source=vendedor").unwrap_err();
        assert_eq!(err, LinkError::MissingParam("ingresso"));

        let err = ResaleLink::from_query("ingresso=VIP&role=vendedor&source=vendedor").unwrap_err();
        assert_eq!(err, LinkError::MissingParam("valor"));
    }

    #[test]
    fn malformed_or_non_positive_prices_are_rejected() {
        assert_eq!(
            ResaleLink::new("VIP", dec!(0), TradeRole::Vendedor).unwrap_err(),
            LinkError::InvalidPrice
        );
        assert_eq!(
            ResaleLink::new("VIP", dec!(-10), TradeRole::Comprador).unwrap_err(),
            LinkError::InvalidPrice
        );

        let trade = Uuid::new_v4();
        let query =
            format!("ingresso=VIP&valor=abc&role=vendedor&source=vendedor&trade={trade}");
        assert_eq!(
            ResaleLink::from_query(&query).unwrap_err(),
            LinkError::InvalidPrice
        );
    }

    #[test]
    fn empty_ticket_name_is_rejected() {
        assert_eq!(
            ResaleLink::new("   ", dec!(10), TradeRole::Vendedor).unwrap_err(),
            LinkError::EmptyTicket
        );
    }

    #[test]
    fn counterpart_flips_roles() {
        assert_eq!(TradeRole::Comprador.counterpart(), TradeRole::Vendedor);
        assert_eq!(TradeRole::Vendedor.counterpart(), TradeRole::Comprador);
    }
}

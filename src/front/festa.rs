//! Event catalog endpoints.

use ntex::web;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::front::errors;
use crate::models::festa::{self, Festa};

/// Listing card: enough to render the grid without the full detail payload
#[derive(Debug, Serialize)]
pub struct FestaCard {
    pub nome: String,
    pub data: chrono::NaiveDate,
    pub local: String,
    pub imagem: Option<String>,
    pub descricao: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub preco_min: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub preco_max: Option<Decimal>,
}

impl From<&Festa> for FestaCard {
    fn from(festa: &Festa) -> Self {
        Self {
            nome: festa.nome.clone(),
            data: festa.data,
            local: festa.local.clone(),
            imagem: festa.imagem.clone(),
            descricao: festa.descricao.clone(),
            preco_min: festa.preco_min(),
            preco_max: festa.preco_max(),
        }
    }
}

#[web::get("")]
pub async fn list() -> Result<impl web::Responder, web::Error> {
    let cards: Vec<FestaCard> = festa::all().iter().map(FestaCard::from).collect();
    Ok(web::HttpResponse::Ok().json(&cards))
}

#[web::get("/{nome}")]
pub async fn detail(
    nome: web::types::Path<String>,
) -> Result<impl web::Responder, web::Error> {
    let festa = festa::find_by_nome(&nome)
        .ok_or_else(|| errors::ApiError::NotFound("Festa não encontrada".into()))?;
    Ok(web::HttpResponse::Ok().json(festa))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_carry_the_category_price_range() {
        let festa = festa::all().first().expect("bundled catalog is not empty");
        let card = FestaCard::from(festa);

        assert_eq!(card.nome, festa.nome);
        assert!(card.preco_min <= card.preco_max);
        assert!(card.preco_min.is_some());
    }

    #[test]
    fn every_catalog_entry_is_found_by_its_own_name() {
        for festa in festa::all() {
            assert!(festa::find_by_nome(&festa.nome).is_some());
        }
    }
}

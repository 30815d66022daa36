//! Static event catalog.
//!
//! Festas are bundled with the binary and never mutated at runtime; prices
//! per category are the only data checkout needs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Festa {
    pub nome: String,
    pub data: NaiveDate,
    pub local: String,
    pub endereco: String,
    pub imagem: Option<String>,
    pub descricao: Option<String>,
    /// Category name -> ticket price
    pub categorias: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub lineup: Vec<String>,
    #[serde(rename = "dressCode", default)]
    pub dress_code: Vec<String>,
}

impl Festa {
    pub fn preco_min(&self) -> Option<Decimal> {
        self.categorias.values().min().copied()
    }

    pub fn preco_max(&self) -> Option<Decimal> {
        self.categorias.values().max().copied()
    }
}

static CATALOG: LazyLock<Vec<Festa>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../../data/festas.json"))
        .expect("bundled data/festas.json must parse")
});

pub fn all() -> &'static [Festa] {
    &CATALOG
}

pub fn find_by_nome(nome: &str) -> Option<&'static Festa> {
    CATALOG.iter().find(|f| f.nome == nome)
}

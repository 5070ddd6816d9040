// 🏷️ Category Entity - Closed set of expense categories
//
// Categories are persisted by their household label (Portuguese, as the
// `contas.categoria` column has always stored them). Unknown stored labels
// fall back to `Other` ("Outros").

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Alimentação")]
    Food,

    #[serde(rename = "Cartão de Crédito")]
    CreditCard,

    #[serde(rename = "Educação")]
    Education,

    #[serde(rename = "Impostos e Taxas")]
    TaxesAndFees,

    #[serde(rename = "Lazer")]
    Leisure,

    #[serde(rename = "Moradia")]
    Housing,

    #[serde(rename = "Serviços de Comunicação")]
    Communication,

    #[serde(rename = "Transporte")]
    Transport,

    /// Fallback for anything not covered above
    #[serde(rename = "Outros")]
    Other,
}

impl Category {
    /// All categories in the order the household form presents them
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::CreditCard,
        Category::Education,
        Category::TaxesAndFees,
        Category::Leisure,
        Category::Housing,
        Category::Communication,
        Category::Transport,
        Category::Other,
    ];

    /// Persisted/display label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Alimentação",
            Category::CreditCard => "Cartão de Crédito",
            Category::Education => "Educação",
            Category::TaxesAndFees => "Impostos e Taxas",
            Category::Leisure => "Lazer",
            Category::Housing => "Moradia",
            Category::Communication => "Serviços de Comunicação",
            Category::Transport => "Transporte",
            Category::Other => "Outros",
        }
    }

    /// Lenient decoding used when reading stored rows
    pub fn from_label_or_other(label: &str) -> Self {
        label.parse().unwrap_or(Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strict parsing: accepts the stored label or the variant name (case-insensitive)
impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label() == needle || format!("{:?}", c).eq_ignore_ascii_case(needle))
            .ok_or_else(|| LedgerError::validation(format!("unknown category '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_variant_name_accepted() {
        assert_eq!("creditcard".parse::<Category>().unwrap(), Category::CreditCard);
        assert_eq!("Transport".parse::<Category>().unwrap(), Category::Transport);
    }

    #[test]
    fn test_unknown_label_strict_vs_lenient() {
        let err = "Viagem".parse::<Category>().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(Category::from_label_or_other("Viagem"), Category::Other);
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Category::Housing).unwrap();
        assert_eq!(json, "\"Moradia\"");
    }
}

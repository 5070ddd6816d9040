// 👥 Owner Entity - Household members plus the shared tag

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// OWNER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Owner {
    Geovani,
    Amanda,

    /// Shared between members
    #[serde(rename = "Juntos", alias = "Together")]
    Together,
}

impl Owner {
    pub fn label(&self) -> &'static str {
        match self {
            Owner::Geovani => "Geovani",
            Owner::Amanda => "Amanda",
            Owner::Together => "Juntos",
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exact label match; "Together" is accepted as an alias of "Juntos"
impl FromStr for Owner {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Geovani" => Ok(Owner::Geovani),
            "Amanda" => Ok(Owner::Amanda),
            "Juntos" | "Together" => Ok(Owner::Together),
            other => Err(LedgerError::validation(format!("unknown owner '{}'", other))),
        }
    }
}

// ============================================================================
// OWNER FILTER
// ============================================================================

/// Owner selection for queries; `All` is the "Todos" sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OwnerFilter {
    #[default]
    All,
    Only(Owner),
}

impl OwnerFilter {
    pub fn matches(&self, owner: Owner) -> bool {
        match self {
            OwnerFilter::All => true,
            OwnerFilter::Only(wanted) => *wanted == owner,
        }
    }
}

impl From<Owner> for OwnerFilter {
    fn from(owner: Owner) -> Self {
        OwnerFilter::Only(owner)
    }
}

impl From<Option<Owner>> for OwnerFilter {
    fn from(owner: Option<Owner>) -> Self {
        owner.map_or(OwnerFilter::All, OwnerFilter::Only)
    }
}

impl fmt::Display for OwnerFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnerFilter::All => f.write_str("Todos"),
            OwnerFilter::Only(owner) => owner.fmt(f),
        }
    }
}

impl FromStr for OwnerFilter {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Todos" | "All" => Ok(OwnerFilter::All),
            other => other.parse().map(OwnerFilter::Only),
        }
    }
}

//! Target chain selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Chains a prompt can be synthesized for.
///
/// Only [`ChainId::Solana`] has a full template; the rest receive the echo
/// artifact until their templates land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainId {
    Solana,
    Ethereum,
    Polygon,
    Sui,
    Aptos,
}

impl ChainId {
    pub const ALL: &'static [ChainId] = &[
        Self::Solana,
        Self::Ethereum,
        Self::Polygon,
        Self::Sui,
        Self::Aptos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solana => "solana",
            Self::Ethereum => "ethereum",
            Self::Polygon => "polygon",
            Self::Sui => "sui",
            Self::Aptos => "aptos",
        }
    }

    /// Whether this chain has a full code template.
    pub fn has_template(&self) -> bool {
        matches!(self, Self::Solana)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                CoreError::UnknownChain(s.to_string(), known.join(", "))
            })
    }
}

//! Token identity.

use crate::chains::{ChainFamily, ChainId, ParseIdError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Tagged token identifier. The tag is the chain family the token lives on,
/// the payload its family-local symbol (ticker, rune id, contract name...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenId {
	Bitcoin(String),
	Stacks(String),
	Evm(String),
	Brc20(String),
	Runes(String),
	Solana(String),
	Tron(String),
}

impl TokenId {
	pub fn new(family: ChainFamily, symbol: impl Into<String>) -> Self {
		let symbol = symbol.into();
		match family {
			ChainFamily::Bitcoin => Self::Bitcoin(symbol),
			ChainFamily::Stacks => Self::Stacks(symbol),
			ChainFamily::Evm => Self::Evm(symbol),
			ChainFamily::Brc20 => Self::Brc20(symbol),
			ChainFamily::Runes => Self::Runes(symbol),
			ChainFamily::Solana => Self::Solana(symbol),
			ChainFamily::Tron => Self::Tron(symbol),
		}
	}

	/// Native bitcoin.
	pub fn btc() -> Self {
		Self::Bitcoin("BTC".to_string())
	}

	/// The hub representation of bitcoin.
	pub fn hub_btc() -> Self {
		Self::Stacks("aBTC".to_string())
	}

	pub fn family(&self) -> ChainFamily {
		match self {
			Self::Bitcoin(_) => ChainFamily::Bitcoin,
			Self::Stacks(_) => ChainFamily::Stacks,
			Self::Evm(_) => ChainFamily::Evm,
			Self::Brc20(_) => ChainFamily::Brc20,
			Self::Runes(_) => ChainFamily::Runes,
			Self::Solana(_) => ChainFamily::Solana,
			Self::Tron(_) => ChainFamily::Tron,
		}
	}

	pub fn symbol(&self) -> &str {
		match self {
			Self::Bitcoin(s)
			| Self::Stacks(s)
			| Self::Evm(s)
			| Self::Brc20(s)
			| Self::Runes(s)
			| Self::Solana(s)
			| Self::Tron(s) => s,
		}
	}

	/// Whether this token can exist on `chain` at all.
	pub fn belongs_to(&self, chain: &ChainId) -> bool {
		self.family() == chain.family()
	}

	pub fn is_hub_token(&self) -> bool {
		self.family().is_hub()
	}
}

impl fmt::Display for TokenId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.family(), self.symbol())
	}
}

impl FromStr for TokenId {
	type Err = ParseIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (family, symbol) = s
			.split_once(':')
			.ok_or_else(|| ParseIdError::new("token id", s))?;
		if symbol.is_empty() {
			return Err(ParseIdError::new("token id", s));
		}
		let family: ChainFamily = family.parse().map_err(|_| ParseIdError::new("token id", s))?;
		Ok(Self::new(family, symbol))
	}
}

impl Serialize for TokenId {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for TokenId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(serde::de::Error::custom)
	}
}

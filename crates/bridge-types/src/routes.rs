//! Route shapes: directed known routes, declared bidirectional edges, swaps.

use crate::chains::ChainId;
use crate::tokens::TokenId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed edge between two tokens on two chains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownRoute {
	pub from_chain: ChainId,
	pub from_token: TokenId,
	pub to_chain: ChainId,
	pub to_token: TokenId,
}

impl KnownRoute {
	pub fn new(from_chain: ChainId, from_token: TokenId, to_chain: ChainId, to_token: TokenId) -> Self {
		Self {
			from_chain,
			from_token,
			to_chain,
			to_token,
		}
	}

	/// Same chain and same token on both ends.
	pub fn is_self_loop(&self) -> bool {
		self.from_chain == self.to_chain && self.from_token == self.to_token
	}

	pub fn reversed(&self) -> Self {
		Self {
			from_chain: self.to_chain,
			from_token: self.to_token.clone(),
			to_chain: self.from_chain,
			to_token: self.from_token.clone(),
		}
	}

	/// Canonical signature used as a cache key.
	pub fn signature(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for KnownRoute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}/{}->{}/{}",
			self.from_chain, self.from_token, self.to_chain, self.to_token
		)
	}
}

/// A declared edge, usable in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedRoute {
	pub chain_left: ChainId,
	pub chain_right: ChainId,
	pub token_left: TokenId,
	pub token_right: TokenId,
}

impl SupportedRoute {
	pub fn new(chain_left: ChainId, token_left: TokenId, chain_right: ChainId, token_right: TokenId) -> Self {
		Self {
			chain_left,
			chain_right,
			token_left,
			token_right,
		}
	}

	pub fn left_to_right(&self) -> KnownRoute {
		KnownRoute::new(
			self.chain_left,
			self.token_left.clone(),
			self.chain_right,
			self.token_right.clone(),
		)
	}

	pub fn right_to_left(&self) -> KnownRoute {
		self.left_to_right().reversed()
	}

	/// Resolve the directed route starting on `from_chain`, if this edge
	/// touches it.
	pub fn directed_from(&self, from_chain: &ChainId) -> Option<KnownRoute> {
		if &self.chain_left == from_chain {
			Some(self.left_to_right())
		} else if &self.chain_right == from_chain {
			Some(self.right_to_left())
		} else {
			None
		}
	}

	/// Whether `route` is this edge walked in either direction.
	pub fn matches(&self, route: &KnownRoute) -> bool {
		&self.left_to_right() == route || &self.right_to_left() == route
	}
}

/// Venue an intermediate swap executes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwapVenue {
	/// Automated market maker pools on the hub chain.
	HubAmm,
	/// Instant swap desk that also re-prices the peg-out leg.
	InstantSwap,
}

impl SwapVenue {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::HubAmm => "hubAmm",
			Self::InstantSwap => "instantSwap",
		}
	}
}

/// An exchange between two hub tokens inserted between the peg-in and the
/// peg-out legs of a spoke-to-spoke transfer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRoute {
	pub via: SwapVenue,
	/// Hub token the origin leg settles into.
	pub from_token: TokenId,
	/// Hub token the destination leg withdraws.
	pub to_token: TokenId,
	/// Venue-specific pool path, opaque to routing.
	#[serde(default)]
	pub pools: Vec<String>,
}

impl SwapRoute {
	/// Suffix that namespaces cache keys of hops priced under this swap.
	pub fn discriminant(&self) -> String {
		format!(
			"swap:{}:{}->{}:{}",
			self.via.as_str(),
			self.from_token,
			self.to_token,
			self.pools.join(",")
		)
	}
}

/// Route as requested by a caller, with an optional intermediate swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
	pub from_chain: ChainId,
	pub from_token: TokenId,
	pub to_chain: ChainId,
	pub to_token: TokenId,
	#[serde(default)]
	pub swap_route: Option<SwapRoute>,
}

impl RouteRequest {
	pub fn new(route: KnownRoute) -> Self {
		Self {
			from_chain: route.from_chain,
			from_token: route.from_token,
			to_chain: route.to_chain,
			to_token: route.to_token,
			swap_route: None,
		}
	}

	pub fn with_swap(mut self, swap: SwapRoute) -> Self {
		self.swap_route = Some(swap);
		self
	}

	pub fn route(&self) -> KnownRoute {
		KnownRoute::new(
			self.from_chain,
			self.from_token.clone(),
			self.to_chain,
			self.to_token.clone(),
		)
	}
}

impl fmt::Display for RouteRequest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.route())?;
		if let Some(swap) = &self.swap_route {
			write!(f, " via {}", swap.discriminant())?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::chains::{EvmChain, NetworkType};

	fn bsc_usdt() -> SupportedRoute {
		SupportedRoute::new(
			ChainId::Evm(EvmChain::Bsc),
			TokenId::Evm("USDT".to_string()),
			ChainId::Stacks(NetworkType::Mainnet),
			TokenId::Stacks("sUSDT".to_string()),
		)
	}

	#[test]
	fn test_supported_route_resolves_both_directions() {
		let edge = bsc_usdt();
		let forward = edge.directed_from(&ChainId::Evm(EvmChain::Bsc)).unwrap();
		assert_eq!(forward.to_token, TokenId::Stacks("sUSDT".to_string()));

		let backward = edge
			.directed_from(&ChainId::Stacks(NetworkType::Mainnet))
			.unwrap();
		assert_eq!(backward, forward.reversed());
		assert!(edge.matches(&backward));
		assert!(edge.directed_from(&ChainId::Evm(EvmChain::Base)).is_none());
	}

	#[test]
	fn test_self_loop_detection() {
		let route = KnownRoute::new(
			ChainId::Bitcoin(NetworkType::Mainnet),
			TokenId::btc(),
			ChainId::Bitcoin(NetworkType::Mainnet),
			TokenId::btc(),
		);
		assert!(route.is_self_loop());
		assert!(!bsc_usdt().left_to_right().is_self_loop());
	}

	#[test]
	fn test_signature_is_stable() {
		assert_eq!(
			bsc_usdt().left_to_right().signature(),
			"evm-bsc/evm:USDT->stacks-mainnet/stacks:sUSDT"
		);
	}
}

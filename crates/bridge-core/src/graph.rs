//! Declared route graph.
//!
//! Static bidirectional edges between spoke tokens and hub tokens for the
//! families whose capabilities are fixed at build time (Bitcoin and the EVM
//! bridge endpoints), gated by an availability predicate that is consulted on
//! every lookup.

use bridge_types::{ChainFamily, ChainId, EvmChain, KnownRoute, NetworkType, SupportedRoute, TokenId};
use std::fmt;
use std::sync::Arc;

/// Runtime gate over declared edges.
pub type AvailabilityPredicate = Arc<dyn Fn(&KnownRoute) -> bool + Send + Sync>;

// (chain, EVM token symbol, hub token symbol)
const EVM_EDGES: &[(EvmChain, &str, &str)] = &[
	(EvmChain::Ethereum, "WBTC", "aBTC"),
	(EvmChain::Ethereum, "USDT", "sUSDT"),
	(EvmChain::Bsc, "BTCB", "aBTC"),
	(EvmChain::Bsc, "USDT", "sUSDT"),
	(EvmChain::CoreDao, "aBTC", "aBTC"),
	(EvmChain::CoreDao, "USDT", "sUSDT"),
	(EvmChain::Bsquared, "WBTC", "aBTC"),
	(EvmChain::Bob, "WBTC", "aBTC"),
	(EvmChain::Bitlayer, "WBTC", "aBTC"),
	(EvmChain::Lorenzo, "stBTC", "aBTC"),
	(EvmChain::Merlin, "MBTC", "aBTC"),
	(EvmChain::AiLayer, "aBTC", "aBTC"),
	(EvmChain::Mode, "WBTC", "aBTC"),
	(EvmChain::XLayer, "WBTC", "aBTC"),
	(EvmChain::Arbitrum, "WBTC", "aBTC"),
	(EvmChain::Arbitrum, "USDT", "sUSDT"),
	(EvmChain::Aurora, "WBTC", "aBTC"),
	(EvmChain::Manta, "WBTC", "aBTC"),
	(EvmChain::Linea, "WBTC", "aBTC"),
	(EvmChain::Base, "cbBTC", "aBTC"),
	(EvmChain::Sepolia, "WBTC", "aBTC"),
	(EvmChain::BscTestnet, "BTCB", "aBTC"),
	(EvmChain::BscTestnet, "USDT", "sUSDT"),
	(EvmChain::CoreDaoTestnet, "aBTC", "aBTC"),
];

#[derive(Clone)]
pub struct DeclaredRouteGraph {
	edges: Vec<SupportedRoute>,
	is_available: AvailabilityPredicate,
}

impl DeclaredRouteGraph {
	pub fn new(edges: Vec<SupportedRoute>) -> Self {
		Self {
			edges,
			is_available: Arc::new(|_| true),
		}
	}

	/// Bitcoin and EVM edges of both networks.
	pub fn builtin() -> Self {
		let mut edges = Vec::new();
		for network in NetworkType::ALL {
			edges.push(SupportedRoute::new(
				ChainId::Bitcoin(network),
				TokenId::btc(),
				ChainId::hub(network),
				TokenId::hub_btc(),
			));
		}
		for (chain, evm_symbol, hub_symbol) in EVM_EDGES {
			edges.push(SupportedRoute::new(
				ChainId::Evm(*chain),
				TokenId::Evm(evm_symbol.to_string()),
				ChainId::hub(chain.network()),
				TokenId::Stacks(hub_symbol.to_string()),
			));
		}
		Self::new(edges)
	}

	pub fn with_availability<F>(mut self, predicate: F) -> Self
	where
		F: Fn(&KnownRoute) -> bool + Send + Sync + 'static,
	{
		self.is_available = Arc::new(predicate);
		self
	}

	pub fn with_edge(mut self, edge: SupportedRoute) -> Self {
		self.edges.push(edge);
		self
	}

	pub fn edges(&self) -> &[SupportedRoute] {
		&self.edges
	}

	/// Whether the graph is the authority for a family's edges.
	pub fn declares_family(&self, family: ChainFamily) -> bool {
		self.edges
			.iter()
			.any(|edge| edge.chain_left.family() == family || edge.chain_right.family() == family)
	}

	/// Whether `route` is a declared edge, in either direction, and currently
	/// available.
	pub fn contains(&self, route: &KnownRoute) -> bool {
		self.edges.iter().any(|edge| edge.matches(route)) && (self.is_available)(route)
	}

	/// Available edges touching `chain`, directed away from it.
	pub fn routes_from(&self, chain: &ChainId) -> Vec<KnownRoute> {
		self.edges
			.iter()
			.filter_map(|edge| edge.directed_from(chain))
			.filter(|route| (self.is_available)(route))
			.collect()
	}
}

impl Default for DeclaredRouteGraph {
	fn default() -> Self {
		Self::builtin()
	}
}

impl fmt::Debug for DeclaredRouteGraph {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DeclaredRouteGraph")
			.field("edges", &self.edges.len())
			.finish()
	}
}

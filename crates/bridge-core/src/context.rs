//! SDK context: injected collaborators, the declared route graph and the
//! cache tables, shared behind one cheap-to-clone handle.

use crate::cache::CacheTable;
use crate::graph::DeclaredRouteGraph;
use crate::supported_routes::RouteEntry;
use crate::tokens::AddressBook;
use bridge_config::BridgeConfig;
use bridge_providers::HttpRouteProvider;
use bridge_types::{
	BridgeError, Decimal, KnownRoute, OnChainReader, Result, RouteProvider, RouteRow,
	SpecialFeeDetails, TokenResolver, TransferProphet,
};
use std::sync::Arc;
use tracing::info;

/// Cache tables owned by one context.
pub(crate) struct ContextCaches {
	/// Raw provider rows per family and network.
	pub provider_rows: CacheTable<Arc<Vec<RouteRow>>>,
	/// Resolved route entries per chain.
	pub supported_routes: CacheTable<Arc<Vec<RouteEntry>>>,
	/// Per-hop descriptors, keyed by hop signature and swap discriminant.
	pub fee_infos: CacheTable<Option<TransferProphet>>,
	pub special_fees: CacheTable<Option<SpecialFeeDetails>>,
	pub exchange_rates: CacheTable<Decimal>,
	/// Discovery results per network and swap flag.
	pub possible_routes: CacheTable<Arc<Vec<KnownRoute>>>,
}

impl ContextCaches {
	fn new() -> Self {
		Self {
			provider_rows: CacheTable::new("provider_rows"),
			supported_routes: CacheTable::new("supported_routes"),
			fee_infos: CacheTable::new("fee_infos"),
			special_fees: CacheTable::new("special_fees"),
			exchange_rates: CacheTable::new("exchange_rates"),
			possible_routes: CacheTable::new("possible_routes"),
		}
	}
}

struct ContextInner {
	route_provider: Arc<dyn RouteProvider>,
	on_chain_reader: Arc<dyn OnChainReader>,
	token_resolver: Arc<dyn TokenResolver>,
	declared_routes: DeclaredRouteGraph,
	caches: ContextCaches,
}

#[derive(Clone)]
pub struct BridgeContext {
	inner: Arc<ContextInner>,
}

impl BridgeContext {
	pub fn builder() -> BridgeContextBuilder {
		BridgeContextBuilder::default()
	}

	/// Wires the HTTP route provider and the configured address book.
	pub fn from_config(config: &BridgeConfig, on_chain_reader: Arc<dyn OnChainReader>) -> Result<Self> {
		let provider = HttpRouteProvider::from_backend_config(&config.backend)?;
		let context = Self::builder()
			.with_route_provider(Arc::new(provider))
			.with_on_chain_reader(on_chain_reader)
			.with_token_resolver(Arc::new(AddressBook::from_config(&config.tokens)))
			.build()?;

		info!(
			"Bridge context {} ready against {} ({} address book entries)",
			config.sdk.name,
			config.backend.base_url,
			config.tokens.len()
		);
		Ok(context)
	}

	pub fn route_provider(&self) -> &Arc<dyn RouteProvider> {
		&self.inner.route_provider
	}

	pub fn on_chain_reader(&self) -> &Arc<dyn OnChainReader> {
		&self.inner.on_chain_reader
	}

	pub fn token_resolver(&self) -> &Arc<dyn TokenResolver> {
		&self.inner.token_resolver
	}

	pub fn declared_routes(&self) -> &DeclaredRouteGraph {
		&self.inner.declared_routes
	}

	pub(crate) fn caches(&self) -> &ContextCaches {
		&self.inner.caches
	}
}

#[derive(Default)]
pub struct BridgeContextBuilder {
	route_provider: Option<Arc<dyn RouteProvider>>,
	on_chain_reader: Option<Arc<dyn OnChainReader>>,
	token_resolver: Option<Arc<dyn TokenResolver>>,
	declared_routes: Option<DeclaredRouteGraph>,
}

impl BridgeContextBuilder {
	pub fn with_route_provider(mut self, provider: Arc<dyn RouteProvider>) -> Self {
		self.route_provider = Some(provider);
		self
	}

	pub fn with_on_chain_reader(mut self, reader: Arc<dyn OnChainReader>) -> Self {
		self.on_chain_reader = Some(reader);
		self
	}

	pub fn with_token_resolver(mut self, resolver: Arc<dyn TokenResolver>) -> Self {
		self.token_resolver = Some(resolver);
		self
	}

	/// Replaces the built-in declared graph.
	pub fn with_declared_routes(mut self, graph: DeclaredRouteGraph) -> Self {
		self.declared_routes = Some(graph);
		self
	}

	pub fn build(self) -> Result<BridgeContext> {
		let route_provider = self
			.route_provider
			.ok_or_else(|| BridgeError::Internal("Route provider not provided".into()))?;
		let on_chain_reader = self
			.on_chain_reader
			.ok_or_else(|| BridgeError::Internal("On-chain reader not provided".into()))?;
		let token_resolver = self
			.token_resolver
			.ok_or_else(|| BridgeError::Internal("Token resolver not provided".into()))?;

		Ok(BridgeContext {
			inner: Arc::new(ContextInner {
				route_provider,
				on_chain_reader,
				token_resolver,
				declared_routes: self.declared_routes.unwrap_or_default(),
				caches: ContextCaches::new(),
			}),
		})
	}
}

//! Live paired-token lists per spoke chain.
//!
//! Bitcoin edges come from the declared graph alone. Families served by the
//! backend come from provider rows, with row addresses resolved to token
//! ids; for EVM chains a row only counts when the declared graph also has
//! the edge. Provider rows are fetched once per family and network and
//! shared by every chain of that family.

use crate::context::BridgeContext;
use bridge_types::{ChainFamily, ChainId, KnownRoute, NetworkType, Result, RouteRow, TokenId};
use std::sync::Arc;
use tracing::debug;

/// One spoke-token/hub-token pair live on a spoke chain.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
	pub chain: ChainId,
	pub spoke_token: TokenId,
	pub hub_token: TokenId,
	/// Backend row the pair came from, absent for declared-only pairs.
	pub row: Option<RouteRow>,
}

impl RouteEntry {
	pub fn peg_in(&self) -> KnownRoute {
		KnownRoute::new(
			self.chain,
			self.spoke_token.clone(),
			ChainId::hub(self.chain.network()),
			self.hub_token.clone(),
		)
	}

	pub fn peg_out(&self) -> KnownRoute {
		self.peg_in().reversed()
	}
}

/// Cached live entries of `chain`. The hub has none of its own.
pub async fn get_supported_routes(ctx: &BridgeContext, chain: &ChainId) -> Result<Arc<Vec<RouteEntry>>> {
	let task_ctx = ctx.clone();
	let chain = *chain;
	ctx.caches()
		.supported_routes
		.get_or_compute(chain.to_string(), move || async move {
			let entries = load_entries(&task_ctx, &chain).await?;
			debug!("{} live route entries on {}", entries.len(), chain);
			Ok(Arc::new(entries))
		})
		.await
}

/// Entries on `chain` pairing `spoke_token` with `hub_token`.
pub async fn find_entry(
	ctx: &BridgeContext,
	chain: &ChainId,
	spoke_token: &TokenId,
	hub_token: &TokenId,
) -> Result<Option<RouteEntry>> {
	let entries = get_supported_routes(ctx, chain).await?;
	Ok(entries
		.iter()
		.find(|entry| &entry.spoke_token == spoke_token && &entry.hub_token == hub_token)
		.cloned())
}

/// Hub tokens `spoke_token` on `chain` is paired with.
pub async fn hub_tokens_for(ctx: &BridgeContext, chain: &ChainId, spoke_token: &TokenId) -> Result<Vec<TokenId>> {
	let entries = get_supported_routes(ctx, chain).await?;
	Ok(entries
		.iter()
		.filter(|entry| &entry.spoke_token == spoke_token)
		.map(|entry| entry.hub_token.clone())
		.collect())
}

async fn load_entries(ctx: &BridgeContext, chain: &ChainId) -> Result<Vec<RouteEntry>> {
	match chain.family() {
		ChainFamily::Stacks => Ok(Vec::new()),
		ChainFamily::Bitcoin => Ok(declared_entries(ctx, chain)),
		ChainFamily::Evm => {
			let entries = row_entries(ctx, chain).await?;
			let graph = ctx.declared_routes();
			Ok(entries
				.into_iter()
				.filter(|entry| {
					let declared = graph.contains(&entry.peg_in());
					if !declared {
						debug!("Ignoring undeclared EVM pair {}", entry.peg_in());
					}
					declared
				})
				.collect())
		}
		ChainFamily::Brc20 | ChainFamily::Runes | ChainFamily::Solana | ChainFamily::Tron => {
			row_entries(ctx, chain).await
		}
	}
}

fn declared_entries(ctx: &BridgeContext, chain: &ChainId) -> Vec<RouteEntry> {
	ctx.declared_routes()
		.routes_from(chain)
		.into_iter()
		.filter(|route| route.to_chain.is_hub())
		.map(|route| RouteEntry {
			chain: *chain,
			spoke_token: route.from_token,
			hub_token: route.to_token,
			row: None,
		})
		.collect()
}

async fn family_rows(ctx: &BridgeContext, family: ChainFamily, network: NetworkType) -> Result<Arc<Vec<RouteRow>>> {
	let provider = ctx.route_provider().clone();
	ctx.caches()
		.provider_rows
		.get_or_compute(format!("{}:{}", family, network), move || async move {
			let rows = provider.supported_routes(family, network).await?;
			debug!("Provider reported {} {} rows on {}", rows.len(), family, network);
			Ok(Arc::new(rows))
		})
		.await
}

async fn row_entries(ctx: &BridgeContext, chain: &ChainId) -> Result<Vec<RouteEntry>> {
	let rows = family_rows(ctx, chain.family(), chain.network()).await?;
	let resolver = ctx.token_resolver();
	let hub = ChainId::hub(chain.network());

	let mut entries = Vec::new();
	for row in rows.iter().filter(|row| row.chain == *chain) {
		let spoke_token = resolver
			.token_from_address(chain, &row.paired_token_address)
			.await;
		let hub_token = resolver.token_from_address(&hub, &row.hub_token_address).await;

		match (spoke_token, hub_token) {
			(Some(spoke_token), Some(hub_token))
				if spoke_token.belongs_to(chain) && hub_token.belongs_to(&hub) =>
			{
				entries.push(RouteEntry {
					chain: *chain,
					spoke_token,
					hub_token,
					row: Some(row.clone()),
				});
			}
			_ => debug!(
				"Skipping row {} <-> {} on {}: unknown token",
				row.paired_token_address, row.hub_token_address, chain
			),
		}
	}
	Ok(entries)
}

//! Route discovery for listing queries.
//!
//! Every live entry yields its peg-in and peg-out edge. Every pair of
//! entries on different spokes yields a spoke-to-spoke edge when both pair
//! with the same hub token, or unconditionally when swap possibilities are
//! requested (the swap itself is not checked here). The pairwise expansion
//! is quadratic in the number of entries.

use crate::context::BridgeContext;
use crate::supported_routes::{get_supported_routes, RouteEntry};
use bridge_types::{BridgeError, ChainId, KnownRoute, NetworkType, Result, TokenId};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Optional filters of a listing query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteFilter {
	#[serde(default)]
	pub from_chain: Option<ChainId>,
	#[serde(default)]
	pub to_chain: Option<ChainId>,
	#[serde(default)]
	pub from_token: Option<TokenId>,
	#[serde(default)]
	pub to_token: Option<TokenId>,
	#[serde(default)]
	pub include_swap_possibilities: bool,
}

impl RouteFilter {
	pub fn matches(&self, route: &KnownRoute) -> bool {
		self.from_chain.map_or(true, |chain| chain == route.from_chain)
			&& self.to_chain.map_or(true, |chain| chain == route.to_chain)
			&& self
				.from_token
				.as_ref()
				.map_or(true, |token| token == &route.from_token)
			&& self
				.to_token
				.as_ref()
				.map_or(true, |token| token == &route.to_token)
	}

	/// Networks to list: the one implied by the given chains, or both.
	fn networks(&self) -> Result<Vec<NetworkType>> {
		let from = self.from_chain.map(|chain| chain.network());
		let to = self.to_chain.map(|chain| chain.network());
		match (from, to) {
			(Some(a), Some(b)) if a != b => Err(BridgeError::InvalidMethodParameters(format!(
				"from chain is on {} but to chain is on {}",
				a, b
			))),
			(Some(network), _) | (_, Some(network)) => Ok(vec![network]),
			(None, None) => Ok(NetworkType::ALL.to_vec()),
		}
	}
}

/// Every route reachable on `network`. Cached per network and swap flag for
/// the lifetime of the context.
pub async fn detect_possible_routes(
	ctx: &BridgeContext,
	network: NetworkType,
	swap_enabled: bool,
) -> Result<Arc<Vec<KnownRoute>>> {
	let key = format!("{}:swap={}", network, swap_enabled);
	let task_ctx = ctx.clone();
	ctx.caches()
		.possible_routes
		.get_or_compute(key, move || async move {
			let spokes = ChainId::spokes(network);
			let lists = try_join_all(spokes.iter().map(|chain| get_supported_routes(&task_ctx, chain))).await?;
			let entries: Vec<&RouteEntry> = lists.iter().flat_map(|list| list.iter()).collect();

			let routes = expand(&entries, swap_enabled);
			info!(
				"Discovered {} routes on {} from {} entries (swaps {})",
				routes.len(),
				network,
				entries.len(),
				if swap_enabled { "on" } else { "off" }
			);
			Ok(Arc::new(routes))
		})
		.await
}

/// Reachable routes matching `filter`.
pub async fn get_possible_routes(ctx: &BridgeContext, filter: &RouteFilter) -> Result<Vec<KnownRoute>> {
	let networks = filter.networks()?;

	let mut routes = Vec::new();
	for network in networks {
		let discovered = detect_possible_routes(ctx, network, filter.include_swap_possibilities)
			.await
			.map_err(BridgeError::rethrow_rate_limit)?;
		routes.extend(discovered.iter().filter(|route| filter.matches(route)).cloned());
	}

	debug!("{} routes match {:?}", routes.len(), filter);
	Ok(routes)
}

fn expand(entries: &[&RouteEntry], swap_enabled: bool) -> Vec<KnownRoute> {
	let mut seen = HashSet::new();
	let mut routes = Vec::new();
	let mut emit = |route: KnownRoute| {
		if seen.insert(route.clone()) {
			routes.push(route);
		}
	};

	for entry in entries {
		emit(entry.peg_in());
		emit(entry.peg_out());
	}

	for from in entries {
		for to in entries {
			if from.chain == to.chain {
				continue;
			}
			if !swap_enabled && from.hub_token != to.hub_token {
				continue;
			}
			emit(KnownRoute::new(
				from.chain,
				from.spoke_token.clone(),
				to.chain,
				to.spoke_token.clone(),
			));
		}
	}

	routes
}

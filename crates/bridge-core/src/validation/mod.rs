//! Route validation.
//!
//! One checker per source family. Each checker declines requests from other
//! families, so at most one of them can accept a given request; the
//! top-level validator runs them all and accepts if any does.

mod bitcoin;
mod brc20;
mod evm;
mod runes;
mod solana;
mod stacks;
mod tron;

use crate::context::BridgeContext;
use crate::supported_routes::find_entry;
use crate::transit::get_and_check_transit_stacks_tokens;
use bridge_types::{BridgeError, Result, RouteRequest};
use futures::future::{try_join_all, BoxFuture, FutureExt};
use tracing::debug;

/// Whether any path exists for `req`.
pub async fn is_supported_route(ctx: &BridgeContext, req: &RouteRequest) -> Result<bool> {
	if let Some(reason) = structural_rejection(req) {
		debug!("Rejecting {}: {}", req, reason);
		return Ok(false);
	}

	let checks: Vec<BoxFuture<'_, Result<bool>>> = vec![
		bitcoin::check_route(ctx, req).boxed(),
		stacks::check_route(ctx, req).boxed(),
		evm::check_route(ctx, req).boxed(),
		brc20::check_route(ctx, req).boxed(),
		runes::check_route(ctx, req).boxed(),
		solana::check_route(ctx, req).boxed(),
		tron::check_route(ctx, req).boxed(),
	];
	let supported = try_join_all(checks)
		.await
		.map_err(BridgeError::rethrow_rate_limit)?
		.into_iter()
		.any(|accepted| accepted);

	if !supported {
		debug!("No path for {}", req);
	}
	Ok(supported)
}

/// Checks that need no collaborator. Returns the rejection reason.
pub(crate) fn structural_rejection(req: &RouteRequest) -> Option<&'static str> {
	if req.route().is_self_loop() {
		return Some("self-loop");
	}
	if req.from_chain.is_deprecated() || req.to_chain.is_deprecated() {
		return Some("deprecated chain");
	}
	if req.from_chain.network() != req.to_chain.network() {
		return Some("chains on different networks");
	}
	if !req.from_token.belongs_to(&req.from_chain) {
		return Some("origin token foreign to origin chain");
	}
	if !req.to_token.belongs_to(&req.to_chain) {
		return Some("destination token foreign to destination chain");
	}
	if req.from_chain == req.to_chain {
		return Some("origin and destination are the same chain");
	}
	if req.swap_route.is_some() && (req.from_chain.is_hub() || req.to_chain.is_hub()) {
		return Some("swaps only bridge spoke to spoke");
	}
	None
}

async fn check_spoke_to_hub(ctx: &BridgeContext, req: &RouteRequest) -> Result<bool> {
	let entry = find_entry(ctx, &req.from_chain, &req.from_token, &req.to_token).await?;
	Ok(entry.is_some())
}

async fn check_hub_to_spoke(ctx: &BridgeContext, req: &RouteRequest) -> Result<bool> {
	let entry = find_entry(ctx, &req.to_chain, &req.to_token, &req.from_token).await?;
	Ok(entry.is_some())
}

/// No single row spans two spokes: resolve the bounding hub tokens first,
/// which checks each spoke's list against its side of the pair.
async fn check_spoke_to_spoke(ctx: &BridgeContext, req: &RouteRequest) -> Result<bool> {
	let transit = get_and_check_transit_stacks_tokens(ctx, req).await?;
	Ok(transit.is_some())
}

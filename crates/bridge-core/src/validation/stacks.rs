//! Routes leaving the hub: single peg-out hops.

use super::check_hub_to_spoke;
use crate::context::BridgeContext;
use bridge_types::{ChainFamily, Result, RouteRequest};
use tracing::debug;

pub(super) async fn check_route(ctx: &BridgeContext, req: &RouteRequest) -> Result<bool> {
	if !req.from_chain.is_stacks() {
		return Ok(false);
	}

	match req.to_chain.family() {
		ChainFamily::Stacks => {
			debug!("Hub to hub transfers are not bridged: {}", req);
			Ok(false)
		}
		ChainFamily::Bitcoin
		| ChainFamily::Evm
		| ChainFamily::Brc20
		| ChainFamily::Runes
		| ChainFamily::Solana
		| ChainFamily::Tron => check_hub_to_spoke(ctx, req).await,
	}
}

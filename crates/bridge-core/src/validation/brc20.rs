//! Routes leaving a BRC-20 chain.

use super::{check_spoke_to_hub, check_spoke_to_spoke};
use crate::context::BridgeContext;
use bridge_types::{ChainFamily, Result, RouteRequest};

pub(super) async fn check_route(ctx: &BridgeContext, req: &RouteRequest) -> Result<bool> {
	if !req.from_chain.is_brc20() {
		return Ok(false);
	}

	match req.to_chain.family() {
		ChainFamily::Stacks => check_spoke_to_hub(ctx, req).await,
		// One BRC-20 chain per network.
		ChainFamily::Brc20 => Ok(false),
		ChainFamily::Bitcoin
		| ChainFamily::Evm
		| ChainFamily::Runes
		| ChainFamily::Solana
		| ChainFamily::Tron => check_spoke_to_spoke(ctx, req).await,
	}
}

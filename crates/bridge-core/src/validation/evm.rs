//! Routes leaving an EVM chain. EVM to EVM is a regular two-hop path as
//! long as the chains differ.

use super::{check_spoke_to_hub, check_spoke_to_spoke};
use crate::context::BridgeContext;
use bridge_types::{ChainFamily, Result, RouteRequest};

pub(super) async fn check_route(ctx: &BridgeContext, req: &RouteRequest) -> Result<bool> {
	if !req.from_chain.is_evm() {
		return Ok(false);
	}

	match req.to_chain.family() {
		ChainFamily::Stacks => check_spoke_to_hub(ctx, req).await,
		ChainFamily::Bitcoin
		| ChainFamily::Evm
		| ChainFamily::Brc20
		| ChainFamily::Runes
		| ChainFamily::Solana
		| ChainFamily::Tron => check_spoke_to_spoke(ctx, req).await,
	}
}

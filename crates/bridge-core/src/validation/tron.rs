//! Routes leaving Tron.

use super::{check_spoke_to_hub, check_spoke_to_spoke};
use crate::context::BridgeContext;
use bridge_types::{ChainFamily, Result, RouteRequest};

pub(super) async fn check_route(ctx: &BridgeContext, req: &RouteRequest) -> Result<bool> {
	if !req.from_chain.is_tron() {
		return Ok(false);
	}

	match req.to_chain.family() {
		ChainFamily::Stacks => check_spoke_to_hub(ctx, req).await,
		ChainFamily::Tron => Ok(false),
		ChainFamily::Bitcoin
		| ChainFamily::Evm
		| ChainFamily::Brc20
		| ChainFamily::Runes
		| ChainFamily::Solana => check_spoke_to_spoke(ctx, req).await,
	}
}

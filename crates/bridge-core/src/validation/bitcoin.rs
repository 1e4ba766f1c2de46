//! Routes leaving the Bitcoin chain. Only native BTC leaves it, pegged into
//! the hub's BTC token.

use super::{check_spoke_to_hub, check_spoke_to_spoke};
use crate::context::BridgeContext;
use bridge_types::{ChainFamily, Result, RouteRequest, TokenId};

pub(super) async fn check_route(ctx: &BridgeContext, req: &RouteRequest) -> Result<bool> {
	if !req.from_chain.is_bitcoin() {
		return Ok(false);
	}
	if req.from_token != TokenId::btc() {
		return Ok(false);
	}

	match req.to_chain.family() {
		ChainFamily::Stacks => check_spoke_to_hub(ctx, req).await,
		ChainFamily::Bitcoin => Ok(false),
		ChainFamily::Evm
		| ChainFamily::Brc20
		| ChainFamily::Runes
		| ChainFamily::Solana
		| ChainFamily::Tron => check_spoke_to_spoke(ctx, req).await,
	}
}

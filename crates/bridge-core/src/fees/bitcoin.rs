//! Bitcoin hops. Both directions are configured on the hub's BTC token
//! contract; peg-outs also pay the Bitcoin network fee, billed in the hub
//! token.

use super::HopFeeParams;
use crate::context::BridgeContext;
use bridge_types::{
	ChainId, HopDirection, KnownRoute, Result, SpecialFeeDetails, TokenId, TransferProphet,
};
use tracing::debug;

pub(super) async fn fee_info(
	ctx: &BridgeContext,
	hop: &KnownRoute,
	direction: HopDirection,
	special: Option<&SpecialFeeDetails>,
) -> Result<Option<TransferProphet>> {
	let hub = ChainId::hub(hop.from_chain.network());
	let Some(address) = ctx
		.token_resolver()
		.address_from_token(&hub, &TokenId::hub_btc())
		.await
	else {
		debug!("No hub BTC token deployed on {}", hub);
		return Ok(None);
	};

	let Some(config) = ctx
		.on_chain_reader()
		.read_hop_config(&hub, &address, direction)
		.await?
	else {
		return Ok(None);
	};

	let mut params = HopFeeParams::from_on_chain(config, &TokenId::hub_btc());
	if direction == HopDirection::PegIn {
		params.gas_fee = None;
	}
	let params = params.with_special(special, &hop.from_token);
	Ok(Some(params.into_prophet(hop.from_token.clone())))
}

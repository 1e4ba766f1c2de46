//! EVM hops, configured on the bridge endpoint of the EVM chain itself.

use super::HopFeeParams;
use crate::context::BridgeContext;
use bridge_types::{HopDirection, KnownRoute, Result, SpecialFeeDetails, TransferProphet};
use tracing::debug;

pub(super) async fn fee_info(
	ctx: &BridgeContext,
	hop: &KnownRoute,
	direction: HopDirection,
	special: Option<&SpecialFeeDetails>,
) -> Result<Option<TransferProphet>> {
	let (chain, token) = match direction {
		HopDirection::PegIn => (hop.from_chain, &hop.from_token),
		HopDirection::PegOut => (hop.to_chain, &hop.to_token),
	};

	let Some(address) = ctx.token_resolver().address_from_token(&chain, token).await else {
		debug!("No address for {} on {}", token, chain);
		return Ok(None);
	};
	let Some(config) = ctx
		.on_chain_reader()
		.read_hop_config(&chain, &address, direction)
		.await?
	else {
		return Ok(None);
	};

	let params = HopFeeParams::from_on_chain(config, &hop.from_token).with_special(special, &hop.from_token);
	Ok(Some(params.into_prophet(hop.from_token.clone())))
}

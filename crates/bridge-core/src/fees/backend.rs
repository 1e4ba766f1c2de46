//! Hops of the backend-served families (BRC-20, Runes, Solana, Tron), priced
//! from the supported-route row of the pair.

use super::HopFeeParams;
use crate::context::BridgeContext;
use crate::supported_routes::find_entry;
use bridge_types::{
	BridgeError, ChainId, HopDirection, KnownRoute, Result, SpecialFeeDetails, TransferProphet,
};

pub(super) async fn fee_info(
	ctx: &BridgeContext,
	hop: &KnownRoute,
	direction: HopDirection,
	special: Option<&SpecialFeeDetails>,
) -> Result<Option<TransferProphet>> {
	let (spoke, spoke_token, hub_token) = match direction {
		HopDirection::PegIn => (hop.from_chain, &hop.from_token, &hop.to_token),
		HopDirection::PegOut => (hop.to_chain, &hop.to_token, &hop.from_token),
	};

	let Some(row) = find_entry(ctx, &spoke, spoke_token, hub_token)
		.await?
		.and_then(|entry| entry.row)
	else {
		return Ok(None);
	};

	let mut params = match direction {
		HopDirection::PegIn => HopFeeParams::from_row(&row.peg_in),
		HopDirection::PegOut => HopFeeParams::from_row(&row.peg_out),
	};

	if direction == HopDirection::PegOut {
		if let Some(gas) = &row.peg_out_gas_fee {
			let hub = ChainId::hub(spoke.network());
			let token = ctx
				.token_resolver()
				.token_from_address(&hub, &gas.token_address)
				.await
				.ok_or_else(|| {
					BridgeError::Internal(format!(
						"Unknown gas fee token {} for {}",
						gas.token_address, hop
					))
				})?;
			params.gas_fee = Some((token, gas.amount));
		}
	}

	let params = params.with_special(special, &hop.from_token);
	Ok(Some(params.into_prophet(hop.from_token.clone())))
}

//! Per-hop fee quotes.
//!
//! One lookup per directed hop between a spoke and the hub, dispatched on
//! the spoke's family. Results, absent ones included, are cached per hop;
//! the peg-out leg of a swapped path is cached under the swap as well, since
//! venue-specific fee details may replace its parameters.

mod backend;
mod bitcoin;
mod evm;

use crate::context::BridgeContext;
use crate::transit::get_special_fee_details_for_swap_route;
use bridge_types::{
	BridgeError, ChainFamily, Decimal, Fee, HopDirection, KnownRoute, OnChainHopConfig, Result,
	RouteRequest, RowFeeParams, SpecialFeeDetails, SwapRoute, TokenId, TransferProphet,
};
use tracing::debug;

/// Price descriptor of one hop, `None` when the hop's bridge endpoint or
/// backend row does not exist.
pub async fn get_fee_info(
	ctx: &BridgeContext,
	hop: &KnownRoute,
	swap: Option<&SwapRoute>,
) -> Result<Option<TransferProphet>> {
	let direction = match (hop.from_chain.is_hub(), hop.to_chain.is_hub()) {
		(false, true) => HopDirection::PegIn,
		(true, false) => HopDirection::PegOut,
		_ => {
			debug!("{} is not a hop between a spoke and the hub", hop);
			return Ok(None);
		}
	};

	// Only the leg paying out the swapped amount depends on the swap.
	let swap = swap.filter(|_| direction == HopDirection::PegOut).cloned();
	let key = match &swap {
		Some(swap) => format!("{}|{}", hop.signature(), swap.discriminant()),
		None => hop.signature(),
	};

	let task_ctx = ctx.clone();
	let hop = hop.clone();
	ctx.caches()
		.fee_infos
		.get_or_compute(key, move || async move {
			let prophet = compute_fee_info(&task_ctx, &hop, direction, swap).await?;
			match &prophet {
				Some(prophet) => {
					prophet.validate().map_err(|e| {
						BridgeError::Internal(format!("Invalid fee descriptor for {}: {}", hop, e))
					})?;
					debug!(
						"Fee info for {}: paused={} fees={}",
						hop,
						prophet.is_paused,
						prophet.fees.len()
					);
				}
				None => debug!("No fee info for {}", hop),
			}
			Ok(prophet)
		})
		.await
}

async fn compute_fee_info(
	ctx: &BridgeContext,
	hop: &KnownRoute,
	direction: HopDirection,
	swap: Option<SwapRoute>,
) -> Result<Option<TransferProphet>> {
	let special = match swap {
		Some(swap) => {
			let req = RouteRequest::new(hop.clone()).with_swap(swap);
			get_special_fee_details_for_swap_route(ctx, &req).await?
		}
		None => None,
	};

	let spoke = match direction {
		HopDirection::PegIn => hop.from_chain,
		HopDirection::PegOut => hop.to_chain,
	};
	match spoke.family() {
		ChainFamily::Bitcoin => bitcoin::fee_info(ctx, hop, direction, special.as_ref()).await,
		ChainFamily::Evm => evm::fee_info(ctx, hop, direction, special.as_ref()).await,
		ChainFamily::Brc20 | ChainFamily::Runes | ChainFamily::Solana | ChainFamily::Tron => {
			backend::fee_info(ctx, hop, direction, special.as_ref()).await
		}
		ChainFamily::Stacks => Ok(None),
	}
}

/// Normalised fee parameters of one hop, whatever their source.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct HopFeeParams {
	pub paused: bool,
	pub fee_rate: Decimal,
	pub min_fee: Decimal,
	pub min_amount: Option<Decimal>,
	pub max_amount: Option<Decimal>,
	pub gas_fee: Option<(TokenId, Decimal)>,
}

impl HopFeeParams {
	/// On-chain gas fees are billed in the hop's bridge token.
	pub fn from_on_chain(config: OnChainHopConfig, bridge_token: &TokenId) -> Self {
		Self {
			paused: config.is_paused,
			fee_rate: config.fee_rate,
			min_fee: config.min_fee,
			min_amount: config.min_amount,
			max_amount: config.max_amount,
			gas_fee: config.gas_fee.map(|amount| (bridge_token.clone(), amount)),
		}
	}

	pub fn from_row(params: &RowFeeParams) -> Self {
		Self {
			paused: params.paused,
			fee_rate: params.fee_rate,
			min_fee: params.min_fee_amount,
			min_amount: params.min_amount,
			max_amount: params.max_amount,
			gas_fee: None,
		}
	}

	pub fn with_special(mut self, special: Option<&SpecialFeeDetails>, bridge_token: &TokenId) -> Self {
		if let Some(special) = special {
			self.fee_rate = special.fee_rate;
			self.min_fee = special.min_fee_amount;
			if let Some(gas) = special.gas_fee {
				self.gas_fee = Some((bridge_token.clone(), gas));
			}
		}
		self
	}

	/// Zero-valued fees are left out of the descriptor.
	pub fn into_prophet(self, bridge_token: TokenId) -> TransferProphet {
		let mut prophet = TransferProphet::new(bridge_token.clone())
			.paused(self.paused)
			.with_min_bridge_amount(self.min_amount)
			.with_max_bridge_amount(self.max_amount);

		if !self.fee_rate.is_zero() || !self.min_fee.is_zero() {
			prophet = prophet.with_fee(Fee::rate(bridge_token, self.fee_rate, self.min_fee));
		}
		if let Some((token, amount)) = self.gas_fee {
			if !amount.is_zero() {
				prophet = prophet.with_fee(Fee::fixed(token, amount));
			}
		}
		prophet
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{fixture, instant_swap, Fixture};
	use bridge_types::{ChainId, EvmChain, NetworkType, ProviderError, SpecialFeeDetails};
	use rust_decimal_macros::dec;
	use std::time::Duration;

	fn hub() -> ChainId {
		ChainId::hub(NetworkType::Mainnet)
	}

	fn btc_peg_in() -> KnownRoute {
		KnownRoute::new(
			ChainId::Bitcoin(NetworkType::Mainnet),
			TokenId::btc(),
			hub(),
			TokenId::hub_btc(),
		)
	}

	fn sol_peg_out() -> KnownRoute {
		KnownRoute::new(
			hub(),
			TokenId::Stacks("sSOL".into()),
			ChainId::Solana(NetworkType::Mainnet),
			TokenId::Solana("SOL".into()),
		)
	}

	#[test]
	fn test_zero_fees_are_dropped() {
		let prophet = HopFeeParams::default().into_prophet(TokenId::hub_btc());
		assert!(prophet.fees.is_empty());
	}

	#[tokio::test]
	async fn test_bitcoin_peg_in_reads_the_hub() {
		let Fixture { ctx, .. } = fixture();
		let prophet = get_fee_info(&ctx, &btc_peg_in(), None).await.unwrap().unwrap();
		assert_eq!(prophet.bridge_token, TokenId::btc());
		assert_eq!(
			prophet.fees,
			vec![Fee::rate(TokenId::btc(), dec!(0.001), dec!(0.0001))]
		);
	}

	#[tokio::test]
	async fn test_bitcoin_peg_out_adds_network_fee() {
		let Fixture { ctx, .. } = fixture();
		let prophet = get_fee_info(&ctx, &btc_peg_in().reversed(), None)
			.await
			.unwrap()
			.unwrap();
		assert_eq!(prophet.bridge_token, TokenId::hub_btc());
		assert!(prophet
			.fees
			.contains(&Fee::fixed(TokenId::hub_btc(), dec!(0.00002))));
	}

	#[tokio::test]
	async fn test_evm_hop_reads_the_evm_chain() {
		let Fixture { ctx, reader, .. } = fixture();
		let hop = KnownRoute::new(
			ChainId::Evm(EvmChain::Bsc),
			TokenId::Evm("USDT".into()),
			hub(),
			TokenId::Stacks("sUSDT".into()),
		);
		let prophet = get_fee_info(&ctx, &hop, None).await.unwrap().unwrap();
		assert_eq!(prophet.max_bridge_amount, Some(dec!(100000)));
		assert_eq!(reader.hop_reads(), 1);
	}

	#[tokio::test]
	async fn test_row_gas_fee_keeps_its_token() {
		let Fixture { ctx, .. } = fixture();
		let hop = KnownRoute::new(
			hub(),
			TokenId::Stacks("sDOG".into()),
			ChainId::Runes(NetworkType::Mainnet),
			TokenId::Runes("DOG".into()),
		);
		let prophet = get_fee_info(&ctx, &hop, None).await.unwrap().unwrap();
		assert!(prophet
			.fees
			.contains(&Fee::fixed(TokenId::Stacks("STX".into()), dec!(2))));
		assert_eq!(prophet.bridge_token, TokenId::Stacks("sDOG".into()));
	}

	#[tokio::test]
	async fn test_missing_endpoint_is_absent() {
		let Fixture { ctx, .. } = fixture();
		let hop = KnownRoute::new(
			ChainId::Evm(EvmChain::Base),
			TokenId::Evm("cbBTC".into()),
			hub(),
			TokenId::hub_btc(),
		);
		assert!(get_fee_info(&ctx, &hop, None).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_hub_to_hub_is_not_a_hop() {
		let Fixture { ctx, .. } = fixture();
		let hop = KnownRoute::new(hub(), TokenId::hub_btc(), hub(), TokenId::Stacks("sUSDT".into()));
		assert!(get_fee_info(&ctx, &hop, None).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_swap_overrides_peg_out_under_its_own_key() {
		let Fixture { ctx, reader, .. } = fixture();
		let swap = instant_swap("sDOG", "sSOL");
		reader.set_special_fee_details(
			&swap,
			SpecialFeeDetails {
				fee_rate: dec!(0.005),
				min_fee_amount: dec!(0.02),
				gas_fee: Some(dec!(0.001)),
			},
		);

		let plain = get_fee_info(&ctx, &sol_peg_out(), None).await.unwrap().unwrap();
		let swapped = get_fee_info(&ctx, &sol_peg_out(), Some(&swap))
			.await
			.unwrap()
			.unwrap();

		assert_ne!(plain, swapped);
		assert!(swapped.fees.contains(&Fee::rate(
			TokenId::Stacks("sSOL".into()),
			dec!(0.005),
			dec!(0.02)
		)));
		assert!(swapped
			.fees
			.contains(&Fee::fixed(TokenId::Stacks("sSOL".into()), dec!(0.001))));
	}

	#[tokio::test]
	async fn test_concurrent_lookups_read_once() {
		let Fixture { ctx, reader, .. } = fixture();
		reader.set_delay(Duration::from_millis(20));
		let hop = btc_peg_in();
		let (a, b) = tokio::join!(get_fee_info(&ctx, &hop, None), get_fee_info(&ctx, &hop, None));
		assert_eq!(a.unwrap(), b.unwrap());
		assert_eq!(reader.hop_reads(), 1);
	}

	#[tokio::test]
	async fn test_failed_lookup_is_retried() {
		let Fixture { ctx, reader, .. } = fixture();
		reader.fail_with(ProviderError::Network("node down".into()));
		assert!(get_fee_info(&ctx, &btc_peg_in(), None).await.is_err());

		reader.clear_failure();
		assert!(get_fee_info(&ctx, &btc_peg_in(), None).await.unwrap().is_some());
		assert_eq!(reader.hop_reads(), 2);
	}
}

//! Hub tokens bounding a spoke-to-spoke path, and swap-specific lookups.

use crate::context::BridgeContext;
use crate::supported_routes::hub_tokens_for;
use bridge_types::{
	ChainId, Decimal, ProviderError, Result, RouteRequest, SpecialFeeDetails, SwapRoute, TokenId,
};
use tracing::debug;

/// Hub token the origin settles into and hub token the destination is paid
/// out from. Identical unless a swap sits between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitTokens {
	pub first_step_to_hub_token: TokenId,
	pub last_step_from_hub_token: TokenId,
}

/// Resolves and checks the transit tokens of a spoke-to-spoke request.
///
/// Both spokes must list the respective pair. Without a swap the two sides
/// must share a hub token; with one, the origin must pair with the swap's
/// input and the destination with its output. `None` when the request is
/// not spoke-to-spoke or no such pair exists.
pub async fn get_and_check_transit_stacks_tokens(
	ctx: &BridgeContext,
	req: &RouteRequest,
) -> Result<Option<TransitTokens>> {
	if req.from_chain.is_hub() || req.to_chain.is_hub() {
		return Ok(None);
	}

	let (head, tail) = futures::try_join!(
		hub_tokens_for(ctx, &req.from_chain, &req.from_token),
		hub_tokens_for(ctx, &req.to_chain, &req.to_token)
	)?;

	let transit = match &req.swap_route {
		None => head
			.iter()
			.find(|token| tail.contains(token))
			.map(|token| TransitTokens {
				first_step_to_hub_token: token.clone(),
				last_step_from_hub_token: token.clone(),
			}),
		Some(swap) => {
			let swappable = swap.from_token.is_hub_token()
				&& swap.to_token.is_hub_token()
				&& head.contains(&swap.from_token)
				&& tail.contains(&swap.to_token);
			swappable.then(|| TransitTokens {
				first_step_to_hub_token: swap.from_token.clone(),
				last_step_from_hub_token: swap.to_token.clone(),
			})
		}
	};

	if transit.is_none() {
		debug!(
			"No transit hub token for {} (origin pairs {:?}, destination pairs {:?})",
			req,
			head.iter().map(ToString::to_string).collect::<Vec<_>>(),
			tail.iter().map(ToString::to_string).collect::<Vec<_>>()
		);
	}
	Ok(transit)
}

/// Peg-out parameters overriding the default lookup for the leg that pays
/// out a swapped amount. `None` means use the default lookup.
pub async fn get_special_fee_details_for_swap_route(
	ctx: &BridgeContext,
	req: &RouteRequest,
) -> Result<Option<SpecialFeeDetails>> {
	let Some(swap) = req.swap_route.clone() else {
		return Ok(None);
	};

	let key = format!("{}|{}/{}", swap.discriminant(), req.to_chain, req.to_token);
	let reader = ctx.on_chain_reader().clone();
	let to_chain: ChainId = req.to_chain;
	let to_token = req.to_token.clone();
	ctx.caches()
		.special_fees
		.get_or_compute(key, move || async move {
			let details = reader
				.read_special_fee_details(&swap, &to_chain, &to_token)
				.await?;
			if details.is_some() {
				debug!("Special fee details apply to {} via {}", to_chain, swap.discriminant());
			}
			Ok(details)
		})
		.await
}

/// Price of one `swap.from_token` in `swap.to_token`.
pub async fn get_swap_exchange_rate(ctx: &BridgeContext, swap: &SwapRoute) -> Result<Decimal> {
	let reader = ctx.on_chain_reader().clone();
	let swap = swap.clone();
	ctx.caches()
		.exchange_rates
		.get_or_compute(swap.discriminant(), move || async move {
			let rate = reader.read_swap_exchange_rate(&swap).await?;
			if rate <= Decimal::ZERO {
				return Err(ProviderError::Decode(format!(
					"non-positive exchange rate {} for {}",
					rate,
					swap.discriminant()
				))
				.into());
			}
			Ok(rate)
		})
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{fixture, instant_swap, Fixture};
	use bridge_types::{EvmChain, KnownRoute, NetworkType};
	use rust_decimal_macros::dec;

	fn usdt_bsc_to_tron() -> RouteRequest {
		RouteRequest::new(KnownRoute::new(
			ChainId::Evm(EvmChain::Bsc),
			TokenId::Evm("USDT".into()),
			ChainId::Tron(NetworkType::Mainnet),
			TokenId::Tron("USDT".into()),
		))
	}

	fn dog_to_sol() -> RouteRequest {
		RouteRequest::new(KnownRoute::new(
			ChainId::Runes(NetworkType::Mainnet),
			TokenId::Runes("DOG".into()),
			ChainId::Solana(NetworkType::Mainnet),
			TokenId::Solana("SOL".into()),
		))
	}

	#[tokio::test]
	async fn test_shared_hub_token() {
		let Fixture { ctx, .. } = fixture();
		let transit = get_and_check_transit_stacks_tokens(&ctx, &usdt_bsc_to_tron())
			.await
			.unwrap()
			.unwrap();
		assert_eq!(transit.first_step_to_hub_token, TokenId::Stacks("sUSDT".into()));
		assert_eq!(transit.first_step_to_hub_token, transit.last_step_from_hub_token);
	}

	#[tokio::test]
	async fn test_differing_hub_tokens_need_a_swap() {
		let Fixture { ctx, .. } = fixture();
		assert!(get_and_check_transit_stacks_tokens(&ctx, &dog_to_sol())
			.await
			.unwrap()
			.is_none());

		let swapped = dog_to_sol().with_swap(instant_swap("sDOG", "sSOL"));
		let transit = get_and_check_transit_stacks_tokens(&ctx, &swapped)
			.await
			.unwrap()
			.unwrap();
		assert_eq!(transit.first_step_to_hub_token, TokenId::Stacks("sDOG".into()));
		assert_eq!(transit.last_step_from_hub_token, TokenId::Stacks("sSOL".into()));
	}

	#[tokio::test]
	async fn test_swap_must_match_both_sides() {
		let Fixture { ctx, .. } = fixture();
		let swapped = dog_to_sol().with_swap(instant_swap("sUSDT", "sSOL"));
		assert!(get_and_check_transit_stacks_tokens(&ctx, &swapped)
			.await
			.unwrap()
			.is_none());
	}

	#[tokio::test]
	async fn test_special_fee_details_are_cached_per_swap() {
		let Fixture { ctx, reader, .. } = fixture();
		let swap = instant_swap("sDOG", "sSOL");
		reader.set_special_fee_details(
			&swap,
			SpecialFeeDetails {
				fee_rate: dec!(0.002),
				min_fee_amount: dec!(0.01),
				gas_fee: None,
			},
		);

		let req = dog_to_sol().with_swap(swap);
		let first = get_special_fee_details_for_swap_route(&ctx, &req).await.unwrap();
		let second = get_special_fee_details_for_swap_route(&ctx, &req).await.unwrap();
		assert_eq!(first.as_ref().unwrap().fee_rate, dec!(0.002));
		assert_eq!(first, second);
		assert_eq!(reader.special_fee_reads(), 1);

		assert!(get_special_fee_details_for_swap_route(&ctx, &dog_to_sol())
			.await
			.unwrap()
			.is_none());
	}

	#[tokio::test]
	async fn test_exchange_rate_must_be_positive() {
		let Fixture { ctx, reader, .. } = fixture();
		let swap = instant_swap("sDOG", "sSOL");
		reader.set_exchange_rate(&swap, Decimal::ZERO);
		assert!(get_swap_exchange_rate(&ctx, &swap).await.is_err());

		reader.set_exchange_rate(&swap, dec!(0.5));
		assert_eq!(get_swap_exchange_rate(&ctx, &swap).await.unwrap(), dec!(0.5));
	}
}

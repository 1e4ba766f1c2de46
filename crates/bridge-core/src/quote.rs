//! Quote assembly: validate a request, price every hop concurrently and
//! compose the hops into one quote.

use crate::composition::{apply, apply_all, compose_n, HopBreakdown, RealizedFee};
use crate::context::BridgeContext;
use crate::fees::get_fee_info;
use crate::transit::{get_and_check_transit_stacks_tokens, get_swap_exchange_rate};
use crate::validation::is_supported_route;
use bridge_types::{
	BridgeError, ChainFamily, ChainId, Decimal, KnownRoute, Result, RouteRequest, SwapRoute,
	TokenId, TransferProphet,
};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeInfoInput {
	pub from_chain: ChainId,
	pub from_token: TokenId,
	pub to_chain: ChainId,
	pub to_token: TokenId,
	/// In `from_token` units.
	pub amount: Decimal,
	#[serde(default)]
	pub swap_route: Option<SwapRoute>,
}

impl BridgeInfoInput {
	pub fn new(route: KnownRoute, amount: Decimal) -> Self {
		Self {
			from_chain: route.from_chain,
			from_token: route.from_token,
			to_chain: route.to_chain,
			to_token: route.to_token,
			amount,
			swap_route: None,
		}
	}

	pub fn with_swap(mut self, swap: SwapRoute) -> Self {
		self.swap_route = Some(swap);
		self
	}

	pub fn request(&self) -> RouteRequest {
		RouteRequest {
			from_chain: self.from_chain,
			from_token: self.from_token.clone(),
			to_chain: self.to_chain,
			to_token: self.to_token.clone(),
			swap_route: self.swap_route.clone(),
		}
	}
}

/// Aggregated quote for one request.
///
/// Fees and bounds are expressed in `fee_token`, the origin token;
/// `to_amount` is the hop-by-hop net in the destination token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeInfo {
	pub is_paused: bool,
	pub from_chain: ChainId,
	pub from_token: TokenId,
	pub to_chain: ChainId,
	pub to_token: TokenId,
	pub from_amount: Decimal,
	pub to_amount: Decimal,
	pub fee_token: TokenId,
	pub fees: Vec<RealizedFee>,
	/// Sum of the fees billed in `fee_token`.
	pub fee_amount: Decimal,
	pub min_bridge_amount: Option<Decimal>,
	pub max_bridge_amount: Option<Decimal>,
	pub transfer_prophets: Vec<TransferProphet>,
	pub hops: Vec<HopBreakdown>,
}

pub async fn bridge_info_from_bitcoin(ctx: &BridgeContext, input: &BridgeInfoInput) -> Result<BridgeInfo> {
	require_origin(input, ChainFamily::Bitcoin)?;
	bridge_info_inner(ctx, input).await
}

pub async fn bridge_info_from_stacks(ctx: &BridgeContext, input: &BridgeInfoInput) -> Result<BridgeInfo> {
	require_origin(input, ChainFamily::Stacks)?;
	bridge_info_inner(ctx, input).await
}

pub async fn bridge_info_from_evm(ctx: &BridgeContext, input: &BridgeInfoInput) -> Result<BridgeInfo> {
	require_origin(input, ChainFamily::Evm)?;
	bridge_info_inner(ctx, input).await
}

pub async fn bridge_info_from_brc20(ctx: &BridgeContext, input: &BridgeInfoInput) -> Result<BridgeInfo> {
	require_origin(input, ChainFamily::Brc20)?;
	bridge_info_inner(ctx, input).await
}

pub async fn bridge_info_from_runes(ctx: &BridgeContext, input: &BridgeInfoInput) -> Result<BridgeInfo> {
	require_origin(input, ChainFamily::Runes)?;
	bridge_info_inner(ctx, input).await
}

pub async fn bridge_info_from_solana(ctx: &BridgeContext, input: &BridgeInfoInput) -> Result<BridgeInfo> {
	require_origin(input, ChainFamily::Solana)?;
	bridge_info_inner(ctx, input).await
}

pub async fn bridge_info_from_tron(ctx: &BridgeContext, input: &BridgeInfoInput) -> Result<BridgeInfo> {
	require_origin(input, ChainFamily::Tron)?;
	bridge_info_inner(ctx, input).await
}

/// Dispatches on the origin chain's family.
pub async fn bridge_info(ctx: &BridgeContext, input: &BridgeInfoInput) -> Result<BridgeInfo> {
	match input.from_chain.family() {
		ChainFamily::Bitcoin => bridge_info_from_bitcoin(ctx, input).await,
		ChainFamily::Stacks => bridge_info_from_stacks(ctx, input).await,
		ChainFamily::Evm => bridge_info_from_evm(ctx, input).await,
		ChainFamily::Brc20 => bridge_info_from_brc20(ctx, input).await,
		ChainFamily::Runes => bridge_info_from_runes(ctx, input).await,
		ChainFamily::Solana => bridge_info_from_solana(ctx, input).await,
		ChainFamily::Tron => bridge_info_from_tron(ctx, input).await,
	}
}

fn require_origin(input: &BridgeInfoInput, family: ChainFamily) -> Result<()> {
	if input.from_chain.family() != family {
		return Err(BridgeError::InvalidMethodParameters(format!(
			"expected a {} origin chain, got {}",
			family, input.from_chain
		)));
	}
	if input.amount < Decimal::ZERO {
		return Err(BridgeError::InvalidMethodParameters(format!(
			"amount must not be negative, got {}",
			input.amount
		)));
	}
	if !input.from_token.belongs_to(&input.from_chain) {
		return Err(BridgeError::InvalidMethodParameters(format!(
			"{} is not a token of {}",
			input.from_token, input.from_chain
		)));
	}
	if !input.to_token.belongs_to(&input.to_chain) {
		return Err(BridgeError::InvalidMethodParameters(format!(
			"{} is not a token of {}",
			input.to_token, input.to_chain
		)));
	}
	Ok(())
}

async fn bridge_info_inner(ctx: &BridgeContext, input: &BridgeInfoInput) -> Result<BridgeInfo> {
	assemble(ctx, input)
		.await
		.map_err(BridgeError::rethrow_rate_limit)
}

/// Hops of a supported request, with the exchange rates between them.
struct RoutePlan {
	hops: Vec<KnownRoute>,
	exchange_rates: Vec<Decimal>,
}

async fn plan_route(ctx: &BridgeContext, req: &RouteRequest) -> Result<RoutePlan> {
	if req.from_chain.is_hub() || req.to_chain.is_hub() {
		return Ok(RoutePlan {
			hops: vec![req.route()],
			exchange_rates: Vec::new(),
		});
	}

	let transit = get_and_check_transit_stacks_tokens(ctx, req)
		.await?
		.ok_or_else(|| BridgeError::unsupported(req.route(), req.swap_route.clone()))?;
	let hub = ChainId::hub(req.from_chain.network());
	let hops = vec![
		KnownRoute::new(
			req.from_chain,
			req.from_token.clone(),
			hub,
			transit.first_step_to_hub_token,
		),
		KnownRoute::new(
			hub,
			transit.last_step_from_hub_token,
			req.to_chain,
			req.to_token.clone(),
		),
	];

	// A peg-in mints the hub token one-for-one; only a swap changes the
	// denomination between the legs.
	let rate = match &req.swap_route {
		Some(swap) => get_swap_exchange_rate(ctx, swap).await?,
		None => Decimal::ONE,
	};
	Ok(RoutePlan {
		hops,
		exchange_rates: vec![rate],
	})
}

async fn assemble(ctx: &BridgeContext, input: &BridgeInfoInput) -> Result<BridgeInfo> {
	let req = input.request();
	if !is_supported_route(ctx, &req).await? {
		return Err(BridgeError::unsupported(req.route(), req.swap_route.clone()));
	}

	let plan = plan_route(ctx, &req).await?;
	let lookups = plan
		.hops
		.iter()
		.map(|hop| get_fee_info(ctx, hop, req.swap_route.as_ref()));
	let prophets = try_join_all(lookups)
		.await?
		.into_iter()
		.collect::<Option<Vec<_>>>()
		.ok_or_else(|| {
			debug!("A hop of {} has no fee info", req);
			BridgeError::unsupported(req.route(), req.swap_route.clone())
		})?;

	let aggregated = compose_n(&prophets, &plan.exchange_rates)?;
	let trace = apply_all(&prophets, input.amount, &plan.exchange_rates)?;
	let charged = apply(&aggregated.prophet, input.amount);

	let fee_token = aggregated.prophet.bridge_token.clone();
	let fee_amount = charged
		.fees
		.iter()
		.filter(|fee| fee.token == fee_token)
		.map(|fee| fee.amount)
		.sum();

	info!(
		"Quoted {} {} -> {} ({} hops, paused={})",
		req,
		input.amount,
		trace.net_amount,
		prophets.len(),
		aggregated.prophet.is_paused
	);

	Ok(BridgeInfo {
		is_paused: aggregated.prophet.is_paused,
		from_chain: input.from_chain,
		from_token: input.from_token.clone(),
		to_chain: input.to_chain,
		to_token: input.to_token.clone(),
		from_amount: input.amount,
		to_amount: trace.net_amount,
		fee_token,
		fees: charged.fees,
		fee_amount,
		min_bridge_amount: aggregated.prophet.min_bridge_amount,
		max_bridge_amount: aggregated.prophet.max_bridge_amount,
		transfer_prophets: aggregated.transfer_prophets,
		hops: trace.hops,
	})
}

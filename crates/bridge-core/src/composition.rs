//! Fee composition algebra.
//!
//! Pure functions over [`TransferProphet`]s. A composed descriptor is
//! expressed in the first hop's bridge token: later hops' rates and amounts
//! are converted back through `s = (1 - flat) * rate`, where `flat` is the
//! combined rate fee already taken in the first token and `rate` is the
//! cumulative exchange rate into the later hop's token.
//!
//! No rounding happens here; every quantity keeps full decimal precision.

use bridge_types::{
	AggregatedProphet, BridgeError, Decimal, Fee, FixedFee, RateFee, Result, TokenId,
	TransferProphet,
};
use serde::{Deserialize, Serialize};

/// One fee as charged on a concrete amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizedFee {
	pub token: TokenId,
	pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedProphet {
	pub fees: Vec<RealizedFee>,
	pub net_amount: Decimal,
}

/// One hop of an [`apply_all`] trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HopBreakdown {
	pub bridge_token: TokenId,
	pub from_amount: Decimal,
	pub fees: Vec<RealizedFee>,
	pub net_amount: Decimal,
	/// Multiplier from this hop's output into the next hop's input.
	#[serde(default)]
	pub exchange_rate: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedRoute {
	pub hops: Vec<HopBreakdown>,
	/// Net amount of the last hop, in its token.
	pub net_amount: Decimal,
}

/// Charges `prophet`'s fees on `amount`.
///
/// A rate fee realizes `max(minimum, rate * amount)`. Only fees billed in the
/// bridge token reduce the net amount; the others are reported as charged
/// separately. The net amount floors at zero instead of failing.
pub fn apply(prophet: &TransferProphet, amount: Decimal) -> AppliedProphet {
	let fees: Vec<RealizedFee> = prophet
		.fees
		.iter()
		.map(|fee| match fee {
			Fee::Rate(rate) => RealizedFee {
				token: rate.token.clone(),
				amount: rate.minimum_amount.max(rate.rate * amount),
			},
			Fee::Fixed(fixed) => RealizedFee {
				token: fixed.token.clone(),
				amount: fixed.amount,
			},
		})
		.collect();

	let deducted: Decimal = fees
		.iter()
		.filter(|fee| fee.token == prophet.bridge_token)
		.map(|fee| fee.amount)
		.sum();

	AppliedProphet {
		fees,
		net_amount: (amount - deducted).max(Decimal::ZERO),
	}
}

/// Composes two hops; `exchange_rate` prices one unit of `p1`'s bridge
/// token in `p2`'s.
pub fn compose2(p1: &TransferProphet, p2: &TransferProphet, exchange_rate: Decimal) -> Result<AggregatedProphet> {
	Ok(AggregatedProphet {
		prophet: compose_pair(p1, p2, exchange_rate)?,
		transfer_prophets: vec![p1.clone(), p2.clone()],
	})
}

/// Left fold of [`compose2`] over `prophets`. `exchange_rates[k]` is the raw
/// rate between hop `k` and hop `k + 1`; the fold uses their running product.
pub fn compose_n(prophets: &[TransferProphet], exchange_rates: &[Decimal]) -> Result<AggregatedProphet> {
	check_shape(prophets, exchange_rates)?;

	let mut composed = prophets[0].clone();
	let mut cumulative_rate = Decimal::ONE;
	for (next, rate) in prophets[1..].iter().zip(exchange_rates) {
		cumulative_rate *= *rate;
		composed = compose_pair(&composed, next, cumulative_rate)?;
	}

	Ok(AggregatedProphet {
		prophet: composed,
		transfer_prophets: prophets.to_vec(),
	})
}

/// Applies every hop in turn, feeding each hop's net amount, converted by
/// the raw exchange rate, into the next.
pub fn apply_all(prophets: &[TransferProphet], amount: Decimal, exchange_rates: &[Decimal]) -> Result<AppliedRoute> {
	check_shape(prophets, exchange_rates)?;

	let mut hops = Vec::with_capacity(prophets.len());
	let mut current = amount;
	for (index, prophet) in prophets.iter().enumerate() {
		let applied = apply(prophet, current);
		let exchange_rate = exchange_rates.get(index).copied();
		hops.push(HopBreakdown {
			bridge_token: prophet.bridge_token.clone(),
			from_amount: current,
			fees: applied.fees,
			net_amount: applied.net_amount,
			exchange_rate,
		});
		current = applied.net_amount * exchange_rate.unwrap_or(Decimal::ONE);
	}

	Ok(AppliedRoute {
		hops,
		net_amount: current,
	})
}

fn check_shape(prophets: &[TransferProphet], exchange_rates: &[Decimal]) -> Result<()> {
	if prophets.is_empty() {
		return Err(BridgeError::InvalidMethodParameters(
			"at least one transfer prophet is required".into(),
		));
	}
	if exchange_rates.len() + 1 != prophets.len() {
		return Err(BridgeError::InvalidMethodParameters(format!(
			"{} hops need {} exchange rates, got {}",
			prophets.len(),
			prophets.len() - 1,
			exchange_rates.len()
		)));
	}
	Ok(())
}

fn compose_pair(p1: &TransferProphet, p2: &TransferProphet, exchange_rate: Decimal) -> Result<TransferProphet> {
	if exchange_rate <= Decimal::ZERO {
		return Err(BridgeError::InvalidMethodParameters(format!(
			"exchange rate must be positive, got {}",
			exchange_rate
		)));
	}

	let kept = p1
		.bridge_token_rate_fees()
		.fold(Decimal::ONE, |kept, fee| kept * (Decimal::ONE - fee.rate));
	let step1_flat_fee_rate = Decimal::ONE - kept;
	let step1_to_step2_rate = (Decimal::ONE - step1_flat_fee_rate) * exchange_rate;
	if step1_to_step2_rate <= Decimal::ZERO {
		return Err(BridgeError::InvalidMethodParameters(format!(
			"first hop keeps nothing of the amount (flat fee rate {})",
			step1_flat_fee_rate
		)));
	}

	let mut fees = p1.fees.clone();
	fees.extend(
		p2.fees
			.iter()
			.map(|fee| convert_fee(fee, p2, p1, step1_to_step2_rate)),
	);

	let min_bridge_amount = fees
		.iter()
		.filter_map(|fee| match fee {
			Fee::Rate(rate) if rate.token == p1.bridge_token => Some(rate.minimum_amount),
			_ => None,
		})
		.chain(p1.min_bridge_amount)
		.chain(p2.min_bridge_amount.map(|min| min / step1_to_step2_rate))
		.filter(|amount| *amount > Decimal::ZERO)
		.max();

	let converted_max = p2.max_bridge_amount.map(|max| max / step1_to_step2_rate);
	let max_bridge_amount = match (p1.max_bridge_amount, converted_max) {
		(Some(a), Some(b)) => Some(a.min(b)),
		(a, b) => a.or(b),
	};

	Ok(TransferProphet {
		is_paused: p1.is_paused || p2.is_paused,
		bridge_token: p1.bridge_token.clone(),
		min_bridge_amount,
		max_bridge_amount,
		fees,
	})
}

/// Re-expresses a fee of `from`'s bridge token in `into`'s by dividing its
/// rate, minimum and amount by `s`. Fees in other tokens are left alone.
fn convert_fee(fee: &Fee, from: &TransferProphet, into: &TransferProphet, s: Decimal) -> Fee {
	match fee {
		Fee::Rate(rate) if rate.token == from.bridge_token => Fee::Rate(RateFee {
			token: into.bridge_token.clone(),
			rate: rate.rate / s,
			minimum_amount: rate.minimum_amount / s,
		}),
		Fee::Fixed(fixed) if fixed.token == from.bridge_token => Fee::Fixed(FixedFee {
			token: into.bridge_token.clone(),
			amount: fixed.amount / s,
		}),
		other => other.clone(),
	}
}

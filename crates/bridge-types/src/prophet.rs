//! Per-hop price descriptors.
//!
//! A [`TransferProphet`] tells a caller, for one hop, whether the hop is
//! paused, which token it moves, the bounds on the bridged amount and the fees
//! it charges. Fees are usually denominated in the bridge token but need not
//! be: a peg-out may bill its network fee in a different settlement token.

use crate::tokens::TokenId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fee proportional to the bridged amount, floored at `minimum_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateFee {
	pub token: TokenId,
	/// Fraction of the amount, in `[0, 1)`.
	pub rate: Decimal,
	pub minimum_amount: Decimal,
}

/// Flat fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedFee {
	pub token: TokenId,
	pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Fee {
	Rate(RateFee),
	Fixed(FixedFee),
}

impl Fee {
	pub fn rate(token: TokenId, rate: Decimal, minimum_amount: Decimal) -> Self {
		Self::Rate(RateFee {
			token,
			rate,
			minimum_amount,
		})
	}

	pub fn fixed(token: TokenId, amount: Decimal) -> Self {
		Self::Fixed(FixedFee { token, amount })
	}

	pub fn token(&self) -> &TokenId {
		match self {
			Self::Rate(fee) => &fee.token,
			Self::Fixed(fee) => &fee.token,
		}
	}
}

/// Single-hop price descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferProphet {
	pub is_paused: bool,
	pub bridge_token: TokenId,
	#[serde(default)]
	pub min_bridge_amount: Option<Decimal>,
	#[serde(default)]
	pub max_bridge_amount: Option<Decimal>,
	pub fees: Vec<Fee>,
}

impl TransferProphet {
	pub fn new(bridge_token: TokenId) -> Self {
		Self {
			is_paused: false,
			bridge_token,
			min_bridge_amount: None,
			max_bridge_amount: None,
			fees: Vec::new(),
		}
	}

	pub fn paused(mut self, is_paused: bool) -> Self {
		self.is_paused = is_paused;
		self
	}

	pub fn with_fee(mut self, fee: Fee) -> Self {
		self.fees.push(fee);
		self
	}

	pub fn with_min_bridge_amount(mut self, amount: Option<Decimal>) -> Self {
		self.min_bridge_amount = amount;
		self
	}

	pub fn with_max_bridge_amount(mut self, amount: Option<Decimal>) -> Self {
		self.max_bridge_amount = amount;
		self
	}

	/// Rate fees charged in the bridge token itself.
	pub fn bridge_token_rate_fees(&self) -> impl Iterator<Item = &RateFee> {
		self.fees.iter().filter_map(move |fee| match fee {
			Fee::Rate(rate) if rate.token == self.bridge_token => Some(rate),
			_ => None,
		})
	}

	/// Checks the value constraints a descriptor must hold.
	pub fn validate(&self) -> Result<(), String> {
		for fee in &self.fees {
			match fee {
				Fee::Rate(rate) => {
					if rate.rate < Decimal::ZERO || rate.rate >= Decimal::ONE {
						return Err(format!("fee rate {} outside [0, 1)", rate.rate));
					}
					if rate.minimum_amount < Decimal::ZERO {
						return Err(format!("negative minimum fee {}", rate.minimum_amount));
					}
				}
				Fee::Fixed(fixed) => {
					if fixed.amount < Decimal::ZERO {
						return Err(format!("negative fixed fee {}", fixed.amount));
					}
				}
			}
		}
		if let (Some(min), Some(max)) = (self.min_bridge_amount, self.max_bridge_amount) {
			if min > max {
				return Err(format!("min bridge amount {} above max {}", min, max));
			}
		}
		Ok(())
	}
}

/// Descriptor composed from several hops, expressed in the first hop's
/// bridge token, plus the hops it was built from in path order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedProphet {
	#[serde(flatten)]
	pub prophet: TransferProphet,
	pub transfer_prophets: Vec<TransferProphet>,
}

//! Collaborator contracts.
//!
//! The routing core never talks to a backend or a chain directly. It consumes
//! the three traits below, injected into the context at construction time:
//!
//! - [`RouteProvider`]: live route rows reported by the backend, per family.
//! - [`OnChainReader`]: decoded read-only contract calls.
//! - [`TokenResolver`]: mapping between token ids and on-chain addresses.

use crate::chains::{ChainFamily, ChainId, NetworkType};
use crate::errors::ProviderError;
use crate::routes::SwapRoute;
use crate::tokens::TokenId;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Direction of a hop relative to the hub chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HopDirection {
	/// Spoke to hub.
	PegIn,
	/// Hub to spoke.
	PegOut,
}

impl HopDirection {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::PegIn => "pegIn",
			Self::PegOut => "pegOut",
		}
	}
}

/// Fee and limit parameters a backend row carries for one direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowFeeParams {
	pub paused: bool,
	pub fee_rate: Decimal,
	pub min_fee_amount: Decimal,
	#[serde(default)]
	pub min_amount: Option<Decimal>,
	#[serde(default)]
	pub max_amount: Option<Decimal>,
}

/// Network fee a peg-out row bills in a token other than the bridged one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowGasFee {
	pub token_address: String,
	pub amount: Decimal,
}

/// One supported-route row for a spoke chain, as reported by the backend.
/// Token references are still raw addresses; amounts are already unscaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRow {
	pub chain: ChainId,
	pub paired_token_address: String,
	pub hub_token_address: String,
	pub peg_in: RowFeeParams,
	pub peg_out: RowFeeParams,
	#[serde(default)]
	pub peg_out_gas_fee: Option<RowGasFee>,
}

/// Source of live paired-token rows. The backend serves a whole family per
/// network, so rows are fetched at that granularity and carry their chain.
#[async_trait]
pub trait RouteProvider: Send + Sync {
	/// Rows of every chain of `family` on `network`. An empty list means the
	/// family has no live routes there.
	async fn supported_routes(&self, family: ChainFamily, network: NetworkType) -> ProviderResult<Vec<RouteRow>>;
}

/// Decoded bridge-endpoint configuration for one token and direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnChainHopConfig {
	pub is_paused: bool,
	pub fee_rate: Decimal,
	pub min_fee: Decimal,
	#[serde(default)]
	pub min_amount: Option<Decimal>,
	#[serde(default)]
	pub max_amount: Option<Decimal>,
	/// Flat network fee, denominated by the caller's convention for the hop.
	#[serde(default)]
	pub gas_fee: Option<Decimal>,
}

/// Peg-out fee parameters that replace the default lookup when a specific
/// swap venue feeds the peg-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialFeeDetails {
	pub fee_rate: Decimal,
	pub min_fee_amount: Decimal,
	#[serde(default)]
	pub gas_fee: Option<Decimal>,
}

/// Read-only contract calls. Implementations own chain-specific encoding.
#[async_trait]
pub trait OnChainReader: Send + Sync {
	/// Bridge endpoint configuration of `token_address` on `chain`.
	/// `None` when no endpoint is deployed for it.
	async fn read_hop_config(
		&self,
		chain: &ChainId,
		token_address: &str,
		direction: HopDirection,
	) -> ProviderResult<Option<OnChainHopConfig>>;

	/// Venue-specific peg-out override, `None` to use the default lookup.
	async fn read_special_fee_details(
		&self,
		swap: &SwapRoute,
		to_chain: &ChainId,
		to_token: &TokenId,
	) -> ProviderResult<Option<SpecialFeeDetails>>;

	/// Price of one `swap.from_token` in `swap.to_token`.
	async fn read_swap_exchange_rate(&self, swap: &SwapRoute) -> ProviderResult<Decimal>;
}

/// Maps token ids to and from chain-local addresses.
#[async_trait]
pub trait TokenResolver: Send + Sync {
	async fn token_from_address(&self, chain: &ChainId, address: &str) -> Option<TokenId>;

	async fn address_from_token(&self, chain: &ChainId, token: &TokenId) -> Option<String>;
}

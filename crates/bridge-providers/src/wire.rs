//! Wire format of the backend `supported-routes` endpoint.
//!
//! Amounts and rates arrive as integer decimal strings scaled by the family's
//! fixed precision (`"100000"` at precision 8 is `0.001`).

use bridge_types::{
	ChainFamily, ChainId, EvmChain, NetworkType, ProviderError, RouteRow, RowFeeParams, RowGasFee,
};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SupportedRoutesResponse {
	pub routes: Vec<WireRouteRow>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRouteRow {
	/// EVM chain slug; absent for single-chain families.
	#[serde(default)]
	pub chain: Option<String>,
	pub paired_token: String,
	pub hub_token: String,

	#[serde(default)]
	pub peg_in_paused: bool,
	pub peg_in_fee_rate: String,
	pub peg_in_min_fee_amount: String,
	#[serde(default)]
	pub peg_in_min_amount: Option<String>,
	#[serde(default)]
	pub peg_in_max_amount: Option<String>,

	#[serde(default)]
	pub peg_out_paused: bool,
	pub peg_out_fee_rate: String,
	pub peg_out_min_fee_amount: String,
	#[serde(default)]
	pub peg_out_min_amount: Option<String>,
	#[serde(default)]
	pub peg_out_max_amount: Option<String>,
	#[serde(default)]
	pub peg_out_gas_fee_amount: Option<String>,
	#[serde(default)]
	pub peg_out_gas_fee_token: Option<String>,
}

impl WireRouteRow {
	/// Chain this row describes within `family` on `network`. Rows of
	/// single-chain families carry no tag; EVM rows name their chain by slug
	/// and yield `None` when it is untagged, unknown or on another network.
	pub fn chain_on(&self, family: ChainFamily, network: NetworkType) -> Option<ChainId> {
		if let Some(chain) = ChainId::single(family, network) {
			return Some(chain);
		}
		self.chain
			.as_deref()
			.and_then(EvmChain::from_slug)
			.filter(|chain| chain.network() == network)
			.map(ChainId::Evm)
	}

	pub fn decode(&self, chain: ChainId, precision: u32) -> Result<RouteRow, ProviderError> {
		let peg_in = RowFeeParams {
			paused: self.peg_in_paused,
			fee_rate: scaled(&self.peg_in_fee_rate, precision)?,
			min_fee_amount: scaled(&self.peg_in_min_fee_amount, precision)?,
			min_amount: scaled_opt(self.peg_in_min_amount.as_deref(), precision)?,
			max_amount: scaled_opt(self.peg_in_max_amount.as_deref(), precision)?,
		};
		let peg_out = RowFeeParams {
			paused: self.peg_out_paused,
			fee_rate: scaled(&self.peg_out_fee_rate, precision)?,
			min_fee_amount: scaled(&self.peg_out_min_fee_amount, precision)?,
			min_amount: scaled_opt(self.peg_out_min_amount.as_deref(), precision)?,
			max_amount: scaled_opt(self.peg_out_max_amount.as_deref(), precision)?,
		};
		let peg_out_gas_fee = match (&self.peg_out_gas_fee_amount, &self.peg_out_gas_fee_token) {
			(Some(amount), Some(token)) => Some(RowGasFee {
				token_address: token.clone(),
				amount: scaled(amount, precision)?,
			}),
			(None, None) => None,
			_ => {
				return Err(ProviderError::Decode(format!(
					"row {} carries a partial peg-out gas fee",
					self.paired_token
				)))
			}
		};

		Ok(RouteRow {
			chain,
			paired_token_address: self.paired_token.clone(),
			hub_token_address: self.hub_token.clone(),
			peg_in,
			peg_out,
			peg_out_gas_fee,
		})
	}
}

/// Parse an integer string and divide it by `10^precision`.
pub fn scaled(raw: &str, precision: u32) -> Result<Decimal, ProviderError> {
	let value: i128 = raw
		.trim()
		.parse()
		.map_err(|_| ProviderError::Decode(format!("not an integer amount: {:?}", raw)))?;
	if value < 0 {
		return Err(ProviderError::Decode(format!("negative amount: {:?}", raw)));
	}
	Decimal::try_from_i128_with_scale(value, precision)
		.map(|d| d.normalize())
		.map_err(|e| ProviderError::Decode(format!("amount {:?} out of range: {}", raw, e)))
}

fn scaled_opt(raw: Option<&str>, precision: u32) -> Result<Option<Decimal>, ProviderError> {
	raw.map(|raw| scaled(raw, precision)).transpose()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal_macros::dec;

	fn row() -> WireRouteRow {
		serde_json::from_value(serde_json::json!({
			"chain": "bsc",
			"pairedToken": "0xusdt",
			"hubToken": "SP2XD7417HGPRTREMKF748VNEQPDRR0RMANB7X1NK.token-susdt",
			"pegInFeeRate": "100000",
			"pegInMinFeeAmount": "200000000",
			"pegInMaxAmount": "1000000000000",
			"pegOutPaused": true,
			"pegOutFeeRate": "0",
			"pegOutMinFeeAmount": "0",
			"pegOutGasFeeAmount": "5000",
			"pegOutGasFeeToken": "SP2XD7417HGPRTREMKF748VNEQPDRR0RMANB7X1NK.token-abtc"
		}))
		.unwrap()
	}

	#[test]
	fn test_scaled_amounts() {
		assert_eq!(scaled("100000", 8).unwrap(), dec!(0.001));
		assert_eq!(scaled("0", 8).unwrap(), Decimal::ZERO);
		assert_eq!(scaled("1500000000", 9).unwrap(), dec!(1.5));
		assert!(scaled("1.5", 8).is_err());
		assert!(scaled("-1", 8).is_err());
	}

	#[test]
	fn test_decode_row() {
		let decoded = row().decode(ChainId::Evm(EvmChain::Bsc), 8).unwrap();
		assert_eq!(decoded.peg_in.fee_rate, dec!(0.001));
		assert_eq!(decoded.peg_in.min_fee_amount, dec!(2));
		assert_eq!(decoded.peg_in.max_amount, Some(dec!(10000)));
		assert_eq!(decoded.peg_in.min_amount, None);
		assert!(decoded.peg_out.paused);
		assert_eq!(decoded.peg_out_gas_fee.unwrap().amount, dec!(0.00005));
	}

	#[test]
	fn test_partial_gas_fee_is_rejected() {
		let mut wire = row();
		wire.peg_out_gas_fee_token = None;
		assert!(wire.decode(ChainId::Evm(EvmChain::Bsc), 8).is_err());
	}

	#[test]
	fn test_row_chain_tagging() {
		let mut wire = row();
		assert_eq!(
			wire.chain_on(ChainFamily::Evm, NetworkType::Mainnet),
			Some(ChainId::Evm(EvmChain::Bsc))
		);
		assert_eq!(wire.chain_on(ChainFamily::Evm, NetworkType::Testnet), None);
		assert_eq!(
			wire.chain_on(ChainFamily::Runes, NetworkType::Mainnet),
			Some(ChainId::Runes(NetworkType::Mainnet))
		);

		wire.chain = Some("moonbeam".into());
		assert_eq!(wire.chain_on(ChainFamily::Evm, NetworkType::Mainnet), None);
		wire.chain = None;
		assert_eq!(wire.chain_on(ChainFamily::Evm, NetworkType::Mainnet), None);
	}
}

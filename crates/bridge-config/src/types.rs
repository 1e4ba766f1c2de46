//! Configuration types for the bridge SDK core.

use bridge_types::{ChainFamily, ChainId, NetworkType, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fixed precision most families use for fractional amounts.
pub const DEFAULT_PRECISION: u32 = 8;

/// Complete configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BridgeConfig {
	/// SDK identity and defaults
	pub sdk: SdkSettings,
	/// Backend REST API reporting per-family routes
	pub backend: BackendConfig,
	/// Logging output
	#[serde(default)]
	pub logging: LoggingConfig,
	/// Token address book
	#[serde(default)]
	pub tokens: Vec<TokenAddressConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SdkSettings {
	/// Name used in log output
	#[serde(default = "default_sdk_name")]
	pub name: String,
	/// Network used when a caller does not name one
	#[serde(default = "default_network")]
	pub default_network: NetworkType,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
	/// Base URL, without the version segment
	pub base_url: String,
	/// Version path segment
	pub api_version: String,
	/// HTTP timeout in milliseconds
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	/// Decimal places used to scale integer fee strings
	#[serde(default = "default_precision")]
	pub default_precision: u32,
	/// Per-family overrides of `default_precision`
	#[serde(default)]
	pub precision: HashMap<ChainFamily, u32>,
}

impl BackendConfig {
	pub fn precision_for(&self, family: ChainFamily) -> u32 {
		self.precision
			.get(&family)
			.copied()
			.unwrap_or(self.default_precision)
	}
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
	/// trace, debug, info, warn or error
	#[serde(default = "default_log_level")]
	pub level: String,
	/// Emit JSON lines instead of pretty output
	#[serde(default)]
	pub json: bool,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: default_log_level(),
			json: false,
		}
	}
}

/// One address book entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenAddressConfig {
	pub chain: ChainId,
	pub token: TokenId,
	pub address: String,
}

fn default_sdk_name() -> String {
	"bridge-sdk".to_string()
}

fn default_network() -> NetworkType {
	NetworkType::Mainnet
}

fn default_timeout_ms() -> u64 {
	10_000
}

fn default_precision() -> u32 {
	DEFAULT_PRECISION
}

fn default_log_level() -> String {
	"info".to_string()
}

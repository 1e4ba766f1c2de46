// bridge-config/src/lib.rs

use std::collections::HashSet;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

pub mod types;

pub use types::*;

/// Largest fixed precision accepted for any family.
const MAX_PRECISION: u32 = 18;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Supported file formats, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
	Toml,
	Json,
	Yaml,
}

impl ConfigFormat {
	pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Ok(Self::Toml),
			Some("json") => Ok(Self::Json),
			Some("yaml") | Some("yml") => Ok(Self::Yaml),
			_ => Err(ConfigError::ParseError(format!(
				"Unsupported config format: {:?}",
				path
			))),
		}
	}
}

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
	file_path: Option<String>,
	env_prefix: String,
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "BRIDGE_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_string_lossy().to_string());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	pub async fn load(&self) -> Result<BridgeConfig, ConfigError> {
		let file_path = self.file_path.as_ref().ok_or_else(|| {
			ConfigError::FileNotFound("No configuration file specified".to_string())
		})?;
		info!("Loading configuration from {}", file_path);

		let mut config = self.load_from_file(file_path).await?;

		self.apply_env_overrides(&mut config)?;
		Self::validate_config(&config)?;

		Ok(config)
	}

	/// Parse configuration text in the given format, after `${VAR}`
	/// substitution, and validate it.
	pub fn load_from_str(
		&self,
		content: &str,
		format: ConfigFormat,
	) -> Result<BridgeConfig, ConfigError> {
		let substituted = self.substitute_env_vars(content)?;
		let mut config = Self::parse(&substituted, format)?;
		self.apply_env_overrides(&mut config)?;
		Self::validate_config(&config)?;
		Ok(config)
	}

	async fn load_from_file(&self, file_path: &str) -> Result<BridgeConfig, ConfigError> {
		let path = Path::new(file_path);
		if !path.exists() {
			return Err(ConfigError::FileNotFound(file_path.to_string()));
		}
		let format = ConfigFormat::from_path(path)?;
		let content = tokio::fs::read_to_string(path).await?;

		let substituted_content = self.substitute_env_vars(&content)?;
		Self::parse(&substituted_content, format)
	}

	fn parse(content: &str, format: ConfigFormat) -> Result<BridgeConfig, ConfigError> {
		match format {
			ConfigFormat::Toml => {
				toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
			}
			ConfigFormat::Json => {
				serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
			}
			ConfigFormat::Yaml => {
				serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
			}
		}
	}

	fn substitute_env_vars(&self, content: &str) -> Result<String, ConfigError> {
		let mut result = content.to_string();

		// Find and replace ${VAR_NAME} patterns
		let re = regex::Regex::new(r"\$\{([^}]+)\}")
			.map_err(|e| ConfigError::ParseError(e.to_string()))?;

		for cap in re.captures_iter(content) {
			let full_match = &cap[0];
			let var_name = &cap[1];

			let env_value = env::var(var_name)
				.map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

			result = result.replace(full_match, &env_value);
		}

		Ok(result)
	}

	fn apply_env_overrides(&self, config: &mut BridgeConfig) -> Result<(), ConfigError> {
		if let Ok(log_level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) {
			debug!("Overriding log level from environment");
			config.logging.level = log_level;
		}

		if let Ok(url) = env::var(format!("{}BACKEND_URL", self.env_prefix)) {
			debug!("Overriding backend URL from environment");
			config.backend.base_url = url;
		}

		if let Ok(version) = env::var(format!("{}API_VERSION", self.env_prefix)) {
			debug!("Overriding backend API version from environment");
			config.backend.api_version = version;
		}

		if let Ok(timeout) = env::var(format!("{}BACKEND_TIMEOUT_MS", self.env_prefix)) {
			config.backend.timeout_ms = timeout.parse().map_err(|e| {
				ConfigError::ValidationError(format!("Invalid backend timeout: {}", e))
			})?;
		}

		Ok(())
	}

	fn validate_config(config: &BridgeConfig) -> Result<(), ConfigError> {
		if config.backend.base_url.trim().is_empty() {
			return Err(ConfigError::ValidationError(
				"Backend base URL must not be empty".to_string(),
			));
		}

		if config.backend.api_version.trim().is_empty() {
			return Err(ConfigError::ValidationError(
				"Backend API version must not be empty".to_string(),
			));
		}

		let precisions = std::iter::once(config.backend.default_precision)
			.chain(config.backend.precision.values().copied());
		for precision in precisions {
			if precision > MAX_PRECISION {
				return Err(ConfigError::ValidationError(format!(
					"Precision {} exceeds the maximum of {}",
					precision, MAX_PRECISION
				)));
			}
		}

		if !matches!(
			config.logging.level.to_ascii_lowercase().as_str(),
			"trace" | "debug" | "info" | "warn" | "error"
		) {
			return Err(ConfigError::ValidationError(format!(
				"Unknown log level '{}'",
				config.logging.level
			)));
		}

		let mut seen = HashSet::new();
		for entry in &config.tokens {
			if !entry.token.belongs_to(&entry.chain) {
				return Err(ConfigError::ValidationError(format!(
					"Token {} cannot live on chain {}",
					entry.token, entry.chain
				)));
			}
			if !seen.insert((entry.chain, entry.address.to_ascii_lowercase())) {
				return Err(ConfigError::ValidationError(format!(
					"Duplicate address {} on chain {}",
					entry.address, entry.chain
				)));
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bridge_types::{ChainFamily, ChainId, EvmChain, NetworkType, TokenId};
	use std::io::Write;

	const SAMPLE: &str = r#"
[sdk]
name = "test-sdk"
default_network = "testnet"

[backend]
base_url = "https://api.example.org"
api_version = "2024-10-01"

[backend.precision]
solana = 9

[[tokens]]
chain = "evm-bsc"
token = "evm:USDT"
address = "0x55d398326f99059ff775485246999027b3197955"
"#;

	#[test]
	fn test_toml_parsing() {
		let config = ConfigLoader::new()
			.with_env_prefix("BRIDGE_TEST_TOML_")
			.load_from_str(SAMPLE, ConfigFormat::Toml)
			.unwrap();

		assert_eq!(config.sdk.name, "test-sdk");
		assert_eq!(config.sdk.default_network, NetworkType::Testnet);
		assert_eq!(config.backend.timeout_ms, 10_000);
		assert_eq!(config.backend.precision_for(ChainFamily::Solana), 9);
		assert_eq!(config.backend.precision_for(ChainFamily::Brc20), 8);
		assert_eq!(config.logging.level, "info");
		assert_eq!(config.tokens[0].chain, ChainId::Evm(EvmChain::Bsc));
		assert_eq!(config.tokens[0].token, TokenId::Evm("USDT".to_string()));
	}

	#[test]
	fn test_env_substitution() {
		std::env::set_var("BRIDGE_TEST_SUBST_URL", "https://substituted.example.org");
		let content = SAMPLE.replace("https://api.example.org", "${BRIDGE_TEST_SUBST_URL}");
		let config = ConfigLoader::new()
			.with_env_prefix("BRIDGE_TEST_SUBST_")
			.load_from_str(&content, ConfigFormat::Toml)
			.unwrap();
		assert_eq!(config.backend.base_url, "https://substituted.example.org");
	}

	#[test]
	fn test_missing_env_var_is_reported() {
		let content = SAMPLE.replace("https://api.example.org", "${BRIDGE_TEST_DEFINITELY_UNSET}");
		let err = ConfigLoader::new()
			.load_from_str(&content, ConfigFormat::Toml)
			.unwrap_err();
		assert!(matches!(err, ConfigError::EnvVarNotFound(name) if name == "BRIDGE_TEST_DEFINITELY_UNSET"));
	}

	#[test]
	fn test_env_overrides() {
		std::env::set_var("BRIDGE_TEST_OVR_LOG_LEVEL", "debug");
		std::env::set_var("BRIDGE_TEST_OVR_API_VERSION", "v9");
		let config = ConfigLoader::new()
			.with_env_prefix("BRIDGE_TEST_OVR_")
			.load_from_str(SAMPLE, ConfigFormat::Toml)
			.unwrap();
		assert_eq!(config.logging.level, "debug");
		assert_eq!(config.backend.api_version, "v9");
	}

	#[test]
	fn test_rejects_foreign_token_in_address_book() {
		let content = SAMPLE.replace("token = \"evm:USDT\"", "token = \"stacks:sUSDT\"");
		let err = ConfigLoader::new()
			.with_env_prefix("BRIDGE_TEST_FOREIGN_")
			.load_from_str(&content, ConfigFormat::Toml)
			.unwrap_err();
		assert!(matches!(err, ConfigError::ValidationError(_)));
	}

	#[test]
	fn test_rejects_duplicate_addresses() {
		let content = format!(
			"{}\n[[tokens]]\nchain = \"evm-bsc\"\ntoken = \"evm:sUSDT\"\naddress = \"0x55D398326F99059FF775485246999027B3197955\"\n",
			SAMPLE
		);
		let err = ConfigLoader::new()
			.with_env_prefix("BRIDGE_TEST_DUP_")
			.load_from_str(&content, ConfigFormat::Toml)
			.unwrap_err();
		assert!(matches!(err, ConfigError::ValidationError(_)));
	}

	#[test]
	fn test_rejects_excessive_precision() {
		let content = SAMPLE.replace("solana = 9", "solana = 30");
		let err = ConfigLoader::new()
			.with_env_prefix("BRIDGE_TEST_PREC_")
			.load_from_str(&content, ConfigFormat::Toml)
			.unwrap_err();
		assert!(matches!(err, ConfigError::ValidationError(_)));
	}

	#[tokio::test]
	async fn test_load_json_file() {
		let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
		write!(
			file,
			r#"{{
				"sdk": {{}},
				"backend": {{ "base_url": "https://api.example.org", "api_version": "v1" }},
				"logging": {{ "level": "warn", "json": true }}
			}}"#
		)
		.unwrap();

		let config = ConfigLoader::new()
			.with_env_prefix("BRIDGE_TEST_JSON_")
			.with_file(file.path())
			.load()
			.await
			.unwrap();
		assert_eq!(config.sdk.name, "bridge-sdk");
		assert!(config.logging.json);
		assert!(config.tokens.is_empty());
	}

	#[tokio::test]
	async fn test_load_missing_file() {
		let err = ConfigLoader::new()
			.with_file("/definitely/not/here.toml")
			.load()
			.await
			.unwrap_err();
		assert!(matches!(err, ConfigError::FileNotFound(_)));
	}

	#[test]
	fn test_unsupported_extension() {
		let err = ConfigFormat::from_path(Path::new("config.ini")).unwrap_err();
		assert!(matches!(err, ConfigError::ParseError(_)));
	}
}

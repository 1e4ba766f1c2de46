use bridge_config::LoggingConfig;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Crates whose events follow the configured level.
pub const SDK_TARGETS: [&str; 5] = [
	"bridge_types",
	"bridge_config",
	"bridge_monitoring",
	"bridge_providers",
	"bridge_core",
];

/// Level applied to every other target, the HTTP stack included.
const DEPENDENCY_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum TracingError {
	#[error("Invalid log filter {directives:?}: {message}")]
	InvalidFilter { directives: String, message: String },
	#[error("Failed to initialize tracing: {0}")]
	Init(String),
}

/// `EnvFilter` directives for `config`: the configured level on the SDK
/// crates, `warn` everywhere else.
pub fn filter_directives(config: &LoggingConfig) -> String {
	let level = config.level.trim().to_ascii_lowercase();
	std::iter::once(DEPENDENCY_LEVEL.to_string())
		.chain(SDK_TARGETS.iter().map(|target| format!("{}={}", target, level)))
		.collect::<Vec<_>>()
		.join(",")
}

pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TracingError> {
	let directives = filter_directives(config);
	EnvFilter::try_new(&directives).map_err(|e| TracingError::InvalidFilter {
		directives,
		message: e.to_string(),
	})
}

/// Installs the global subscriber. JSON lines when `config.json` is set,
/// compact text otherwise. Fails if a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TracingError> {
	let filter = build_filter(config)?;
	let output = if config.json {
		fmt::layer().json().with_target(true).boxed()
	} else {
		fmt::layer().compact().with_target(true).boxed()
	};

	tracing_subscriber::registry()
		.with(filter)
		.with(output)
		.try_init()
		.map_err(|e| TracingError::Init(e.to_string()))?;

	info!(
		"Tracing initialized at {} ({})",
		config.level,
		if config.json { "json" } else { "text" }
	);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn logging(level: &str, json: bool) -> LoggingConfig {
		LoggingConfig {
			level: level.to_string(),
			json,
		}
	}

	#[test]
	fn test_level_applies_to_sdk_crates_only() {
		let directives = filter_directives(&logging("DEBUG", false));
		assert!(directives.starts_with("warn,"));
		assert!(directives.contains("bridge_core=debug"));
		assert!(directives.contains("bridge_providers=debug"));
		assert!(!directives.contains("reqwest"));
	}

	#[test]
	fn test_filter_is_built_from_config() {
		let filter = build_filter(&logging("trace", true)).unwrap();
		assert!(filter.to_string().contains("bridge_core=trace"));
		assert!(matches!(
			build_filter(&logging("loud", false)),
			Err(TracingError::InvalidFilter { .. })
		));
	}

	#[test]
	fn test_second_init_fails_cleanly() {
		let config = logging("info", false);
		let _ = init_tracing(&config);
		assert!(matches!(init_tracing(&config), Err(TracingError::Init(_))));
	}
}

//! Error types for the bridge routing core.

use crate::routes::{KnownRoute, SwapRoute};
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Failures raised by external collaborators (backend REST API, on-chain
/// readers). Must stay `Clone`: one failed in-flight lookup is handed to
/// every caller awaiting it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
	#[error("Upstream rate limited the request")]
	TooManyRequests { retry_after: Option<Duration> },

	#[error("HTTP error {status}: {message}")]
	Http { status: u16, message: String },

	#[error("Network error: {0}")]
	Network(String),

	#[error("Decode error: {0}")]
	Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
	/// No composable path exists for the requested route.
	#[error("Unsupported bridge route: {route}{}", swap_suffix(.swap_route))]
	UnsupportedBridgeRoute {
		route: KnownRoute,
		swap_route: Option<SwapRoute>,
	},

	/// Structurally invalid caller input, raised before any external call.
	#[error("Invalid method parameters: {0}")]
	InvalidMethodParameters(String),

	/// Upstream throttling, surfaced to the caller with a retry hint.
	#[error("Requests are too frequent{}", retry_suffix(.retry_after))]
	TooFrequentlyRequested { retry_after: Option<Duration> },

	#[error("Provider error: {0}")]
	Provider(#[from] ProviderError),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl BridgeError {
	pub fn unsupported(route: KnownRoute, swap_route: Option<SwapRoute>) -> Self {
		Self::UnsupportedBridgeRoute { route, swap_route }
	}

	/// Maps upstream throttling to the caller-facing error; everything else
	/// passes through unchanged.
	pub fn rethrow_rate_limit(self) -> Self {
		match self {
			Self::Provider(ProviderError::TooManyRequests { retry_after }) => {
				Self::TooFrequentlyRequested { retry_after }
			}
			other => other,
		}
	}
}

fn swap_suffix(swap: &Option<SwapRoute>) -> String {
	swap.as_ref()
		.map(|swap| format!(" (swap {})", swap.discriminant()))
		.unwrap_or_default()
}

fn retry_suffix(retry_after: &Option<Duration>) -> String {
	retry_after
		.map(|after| format!(", retry after {}s", after.as_secs()))
		.unwrap_or_default()
}

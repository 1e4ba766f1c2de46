//! REST client for the backend `supported-routes` endpoint.

use crate::wire::SupportedRoutesResponse;
use async_trait::async_trait;
use bridge_config::BackendConfig;
use bridge_types::{ChainFamily, NetworkType, ProviderError, ProviderResult, RouteProvider, RouteRow};
use reqwest::{header::RETRY_AFTER, Client, Response, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for [`HttpRouteProvider`].
#[derive(Debug, Clone)]
pub struct HttpRouteProviderConfig {
	pub base_url: String,
	pub api_version: String,
	pub timeout_ms: u64,
	pub default_precision: u32,
	pub precision: HashMap<ChainFamily, u32>,
}

impl HttpRouteProviderConfig {
	pub fn precision_for(&self, family: ChainFamily) -> u32 {
		self.precision
			.get(&family)
			.copied()
			.unwrap_or(self.default_precision)
	}
}

impl From<&BackendConfig> for HttpRouteProviderConfig {
	fn from(backend: &BackendConfig) -> Self {
		Self {
			base_url: backend.base_url.clone(),
			api_version: backend.api_version.clone(),
			timeout_ms: backend.timeout_ms,
			default_precision: backend.default_precision,
			precision: backend.precision.clone(),
		}
	}
}

/// Route provider backed by the bridge backend's REST API.
pub struct HttpRouteProvider {
	config: HttpRouteProviderConfig,
	client: Client,
}

impl HttpRouteProvider {
	pub fn new(config: HttpRouteProviderConfig) -> ProviderResult<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(config.timeout_ms))
			.build()
			.map_err(|e| ProviderError::Network(format!("Failed to build HTTP client: {}", e)))?;

		Ok(Self { config, client })
	}

	pub fn from_backend_config(backend: &BackendConfig) -> ProviderResult<Self> {
		Self::new(HttpRouteProviderConfig::from(backend))
	}

	fn endpoint(&self, family: ChainFamily) -> String {
		format!(
			"{}/{}/{}/supported-routes",
			self.config.base_url.trim_end_matches('/'),
			self.config.api_version.trim_matches('/'),
			family.as_str()
		)
	}

	async fn fetch(&self, family: ChainFamily, network: NetworkType) -> ProviderResult<SupportedRoutesResponse> {
		let url = self.endpoint(family);
		debug!("Fetching supported routes from {} on {}", url, network);

		let response = self
			.client
			.get(&url)
			.header("Accept", "application/json")
			.query(&[("network", network.as_str())])
			.send()
			.await
			.map_err(|e| ProviderError::Network(format!("Request to {} failed: {}", url, e)))?;

		let response = check_status(response).await?;

		response
			.json::<SupportedRoutesResponse>()
			.await
			.map_err(|e| ProviderError::Decode(format!("Failed to parse response: {}", e)))
	}
}

async fn check_status(response: Response) -> ProviderResult<Response> {
	let status = response.status();
	if status.is_success() {
		return Ok(response);
	}

	if status == StatusCode::TOO_MANY_REQUESTS {
		let retry_after = response
			.headers()
			.get(RETRY_AFTER)
			.and_then(|value| value.to_str().ok())
			.and_then(|value| value.trim().parse::<u64>().ok())
			.map(Duration::from_secs);
		warn!("Backend rate limited the request, retry after {:?}", retry_after);
		return Err(ProviderError::TooManyRequests { retry_after });
	}

	let message = response
		.text()
		.await
		.unwrap_or_else(|_| "Unknown error".to_string());
	Err(ProviderError::Http {
		status: status.as_u16(),
		message,
	})
}

#[async_trait]
impl RouteProvider for HttpRouteProvider {
	async fn supported_routes(&self, family: ChainFamily, network: NetworkType) -> ProviderResult<Vec<RouteRow>> {
		if !family.is_provider_backed() {
			return Ok(Vec::new());
		}

		let precision = self.config.precision_for(family);
		let response = self.fetch(family, network).await?;

		let mut rows = Vec::with_capacity(response.routes.len());
		for row in &response.routes {
			match row.chain_on(family, network) {
				Some(chain) => rows.push(row.decode(chain, precision)?),
				None => debug!(
					"Skipping {} row {} tagged {:?}: not a {} chain",
					family, row.paired_token, row.chain, network
				),
			}
		}

		debug!("Backend reported {} {} route rows on {}", rows.len(), family, network);
		Ok(rows)
	}
}

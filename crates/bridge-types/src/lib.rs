//! Shared types for the bridge routing and pricing core.
//!
//! Chain and token identity, route shapes, per-hop price descriptors, the
//! error taxonomy and the collaborator traits the core is built against.

pub mod chains;
pub mod errors;
pub mod prophet;
pub mod providers;
pub mod routes;
pub mod tokens;

pub use chains::{ChainFamily, ChainId, EvmChain, NetworkType, ParseIdError, DEPRECATED_CHAINS};
pub use errors::{BridgeError, ProviderError, Result};
pub use prophet::{AggregatedProphet, Fee, FixedFee, RateFee, TransferProphet};
pub use providers::{
	HopDirection, OnChainHopConfig, OnChainReader, ProviderResult, RouteProvider, RouteRow,
	RowFeeParams, RowGasFee, SpecialFeeDetails, TokenResolver,
};
pub use routes::{KnownRoute, RouteRequest, SupportedRoute, SwapRoute, SwapVenue};
pub use rust_decimal::Decimal;
pub use tokens::TokenId;

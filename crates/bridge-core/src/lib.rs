//! Routing and pricing core of the bridge SDK.
//!
//! Given a request to move a token between two chain families this crate
//! decides whether a path exists, validates it against the declared route
//! graph and the live backend configuration, fetches a price descriptor for
//! every hop and composes them into a single quote.
//!
//! All state lives in a [`BridgeContext`]: the injected collaborators, the
//! declared route graph and the per-instance cache tables.

pub mod cache;
pub mod composition;
pub mod context;
pub mod discovery;
pub mod fees;
pub mod graph;
pub mod quote;
pub mod supported_routes;
pub mod tokens;
pub mod transit;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::CacheTable;
pub use composition::{
	apply, apply_all, compose2, compose_n, AppliedProphet, AppliedRoute, HopBreakdown,
	RealizedFee,
};
pub use context::{BridgeContext, BridgeContextBuilder};
pub use discovery::{detect_possible_routes, get_possible_routes, RouteFilter};
pub use fees::get_fee_info;
pub use graph::DeclaredRouteGraph;
pub use quote::{
	bridge_info, bridge_info_from_bitcoin, bridge_info_from_brc20, bridge_info_from_evm,
	bridge_info_from_runes, bridge_info_from_solana, bridge_info_from_stacks,
	bridge_info_from_tron, BridgeInfo, BridgeInfoInput,
};
pub use supported_routes::{get_supported_routes, RouteEntry};
pub use tokens::AddressBook;
pub use transit::{
	get_and_check_transit_stacks_tokens, get_special_fee_details_for_swap_route,
	get_swap_exchange_rate, TransitTokens,
};
pub use validation::is_supported_route;

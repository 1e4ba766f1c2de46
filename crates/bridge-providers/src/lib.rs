//! Backend-facing implementations of the route provider contract.
//!
//! The backend reports live paired-token rows per chain family over REST.
//! [`HttpRouteProvider`] fetches them, scales the fixed-precision integer
//! strings into decimals and narrows the result to the requested chain.

pub mod http;
pub mod wire;

pub use http::{HttpRouteProvider, HttpRouteProviderConfig};

//! Observability setup for the bridge SDK.
//!
//! The routing core emits `tracing` events at every collaborator boundary;
//! this crate installs the subscriber that renders them, driven by the
//! `[logging]` section of the SDK configuration.

pub mod tracing;

pub use crate::tracing::{build_filter, filter_directives, init_tracing, TracingError, SDK_TARGETS};

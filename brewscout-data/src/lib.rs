//! External data adapters for the Brewscout engine.
//!
//! Responsibilities:
//! - Implement the provider traits from `brewscout-core` against real
//!   services.
//! - Encapsulate wire formats so domain code never sees provider JSON.
//!
//! Boundaries:
//! - Do not encode ranking or filtering rules (those live in
//!   `brewscout-scorer` and `brewscout-discovery`).
//! - Keep blocking I/O off async executors; the sync provider traits are
//!   bridged onto a private Tokio runtime.
//!
//! Invariants:
//! - Thread-safe by default.
//! - No global mutable state.
//! - API keys never appear in error values or log lines.
#![forbid(unsafe_code)]

pub mod google;

//! Query execution for Pulse Insights.
//!
//! Isolates the connect/execute/close cycle from resolution and rendering.

pub mod executor;

pub use executor::QueryExecutor;

//! Pulse Insights - a terminal dashboard over the PhonePe Pulse dataset.
//!
//! A user [`selection::Selection`] resolves to one catalogued query
//! ([`catalog`]), which runs on a freshly opened connection
//! ([`query::QueryExecutor`]) and is presented as a table plus a bar chart
//! ([`render`], [`tui`]). [`dashboard::Dashboard`] ties the steps together.

pub mod assets;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod logging;
pub mod query;
pub mod render;
pub mod selection;
pub mod tui;

//! Terminal UI tests.

pub mod headless_test;

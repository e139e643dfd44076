//! TUI widgets.

pub mod chart;
pub mod header;
pub mod sidebar;
pub mod table;

//! CLI command handling

pub mod chart;
pub mod deliver;

pub use chart::*;
pub use deliver::*;

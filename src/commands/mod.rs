//! CLI commands for tracelens

pub mod analyze;
pub mod dispatch;
pub mod input;
pub mod pricing;
pub mod runs;
pub mod steps;
pub mod timeline;
pub mod tokens;

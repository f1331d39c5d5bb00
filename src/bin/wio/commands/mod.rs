//! Command implementations

pub mod build;
pub mod clean;
pub mod generate;
pub mod resolve;
pub mod targets;
pub mod tree;

//! Toolchain detection for generated projects

pub mod check;

pub use check::{check_toolchain, check_toolchains, required_toolchains, Toolchain, ToolchainInfo};

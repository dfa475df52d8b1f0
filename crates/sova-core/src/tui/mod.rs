//! Interactive init flow built on cliclack
//!
//! Only available with the `tui` feature.

mod prompts;

pub use prompts::{run, CreateArgs};

//! Command implementations for hba-cli

pub mod line;
pub mod render;

pub use line::{LineArgs, run_line};
pub use render::{run_check, run_render};

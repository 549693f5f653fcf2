//! CLI command handlers.

mod config;
mod emit;
mod levels;

pub use config::{ConfigOutputFormat, run_config};
pub use emit::{EmitCommandInput, parse_meta, run_emit};
pub use levels::run_levels;

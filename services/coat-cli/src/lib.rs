//! Command-line surface over the `oa_coat` classification engine.

mod cli;
pub mod commands;
pub mod render;

use oa_coat::error::AppError;

pub use render::OutputFormat;

pub fn run() -> Result<(), AppError> {
    cli::run()
}

//! Command dispatch and handlers.

pub mod analyze;
pub mod config;

use anyhow::Result;

use crate::cli::{Command, ConfigAction};

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, quiet: bool) -> Result<()> {
    match command {
        Command::Analyze(args) => analyze::run(&args, quiet),
        Command::Config { action } => match action {
            ConfigAction::Show { project } => config::show(&project),
            ConfigAction::Set(args) => config::set(&args),
        },
        Command::Providers => {
            config::providers();
            Ok(())
        }
    }
}

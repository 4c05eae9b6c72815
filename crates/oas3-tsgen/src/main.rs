#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Stylize;

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod config;
mod generator;
mod ui;
mod utils;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match run(cli.command, &colors).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("{} {}", "Error:".with(colors.error()), format!("{err:#}").with(colors.primary()));
      ExitCode::FAILURE
    }
  }
}

async fn run(command: Commands, colors: &Colors) -> anyhow::Result<()> {
  match command {
    Commands::List { list_command } => match list_command {
      ListCommands::Operations { input } => ui::commands::list_operations(&input, colors).await?,
    },
    Commands::Generate(command) => {
      let config = ui::commands::GenerateConfig::from_command(command);
      ui::commands::generate_code(config, colors).await?;
    }
  }

  Ok(())
}

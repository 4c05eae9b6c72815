use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-tsgen")]
#[command(author, version, about = "OpenAPI to TypeScript model and operation map generator")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from an OpenAPI specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate TypeScript sources from an OpenAPI specification
  Generate(GenerateCommand),
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// What to generate
  #[arg(short, long, value_enum)]
  pub kind: GenerateKind,

  /// Path or http(s) URL of the OpenAPI JSON or YAML specification
  #[arg(short, long, value_name = "FILE|URL")]
  pub input: String,

  /// Project root that configured output directories are relative to
  #[arg(short, long, value_name = "DIR", default_value = ".")]
  pub output: PathBuf,

  /// TOML configuration file; the bundled defaults are used when omitted
  #[arg(short, long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Restrict generation to a module (repeatable); all modules when omitted
  #[arg(short, long = "module", value_name = "MODULE")]
  pub modules: Vec<String>,

  /// Enable verbose output, including informational warnings
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerateKind {
  /// Base models, models and translations
  Models,
  /// Per-module operation maps
  OperationMap,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations with their modules and response shape
  Operations {
    /// Path or http(s) URL of the OpenAPI JSON or YAML specification
    #[arg(short, long, value_name = "FILE|URL")]
    input: String,
  },
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_is_well_formed() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_generate_with_modules() {
    let cli = Cli::parse_from([
      "oas3-tsgen",
      "generate",
      "--kind",
      "operation-map",
      "--input",
      "api.yaml",
      "--module",
      "users",
      "-m",
      "teams",
    ]);

    let Commands::Generate(command) = cli.command else {
      panic!("expected generate");
    };
    assert_eq!(command.kind, GenerateKind::OperationMap);
    assert_eq!(command.input, "api.yaml");
    assert_eq!(command.output, PathBuf::from("."));
    assert_eq!(command.modules, ["users", "teams"]);
    assert!(command.config.is_none());
  }

  #[test]
  fn test_quiet_conflicts_with_verbose() {
    let result = Cli::try_parse_from(["oas3-tsgen", "generate", "-k", "models", "-i", "a.json", "-q", "-v"]);
    assert!(result.is_err());
  }
}

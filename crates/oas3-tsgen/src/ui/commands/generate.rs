use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use itertools::Itertools;

use crate::{
  config::Config,
  generator::{
    document::SchemaDocument,
    metrics::GenerationStats,
    orchestrator::{GenerationOutput, Orchestrator},
  },
  ui::{
    Colors, GenerateCommand, GenerateKind,
    writer::{OutputWriter, WriteReport},
  },
  utils::spec::SpecLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub kind: GenerateKind,
  pub input: String,
  pub output: PathBuf,
  pub config: Option<PathBuf>,
  pub modules: Vec<String>,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> Self {
    let GenerateCommand {
      kind,
      input,
      output,
      config,
      modules,
      verbose,
      quiet,
    } = command;

    let modules = modules.into_iter().filter(|module| !module.is_empty()).unique().collect();

    Self {
      kind,
      input,
      output,
      config,
      modules,
      verbose,
      quiet,
    }
  }

  async fn load_spec(&self) -> anyhow::Result<SchemaDocument> {
    SpecLoader::open(&self.input).await?.parse()
  }

  async fn load_config(&self) -> anyhow::Result<Config> {
    Config::load(self.config.as_deref(), &self.output).await
  }

  fn generate(&self, document: &SchemaDocument, config: &Config) -> anyhow::Result<GenerationOutput> {
    let orchestrator = Orchestrator::new(document, config);
    match self.kind {
      GenerateKind::Models => orchestrator.generate_models(&self.modules),
      GenerateKind::OperationMap => orchestrator.generate_operation_maps(&self.modules),
    }
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn warning(&self, label: &str, message: &str) {
    if !self.config.quiet {
      eprintln!(
        "{} {}",
        label.with(self.colors.warning()),
        message.with(self.colors.primary())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI spec from: {}", self.config.input)
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_config(&self) {
    let source = self
      .config
      .config
      .as_ref()
      .map_or_else(|| "bundled defaults".to_string(), |path| path.display().to_string());
    self.info(&format!("Using configuration: {source}").with(self.colors.primary()).to_string());
  }

  fn log_generating(&self) {
    let message = match self.config.kind {
      GenerateKind::Models => "Generating TypeScript models...",
      GenerateKind::OperationMap => "Generating operation maps...",
    };
    self.info(&message.with(self.colors.primary()).to_string());

    if !self.config.modules.is_empty() {
      self.stat("Modules:", self.config.modules.join(", "));
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn print_report(&self, report: &WriteReport) {
    if self.config.verbose {
      for path in report.written.iter().chain(&report.indexes) {
        self.stat("Wrote:", path.display().to_string());
      }
    }
    for path in &report.preserved {
      self.warning("Preserved:", &format!("{} already exists, not overwritten", path.display()));
    }
  }

  fn print_statistics(&self, stats: &GenerationStats, report: &WriteReport) {
    if self.config.quiet {
      return;
    }

    match self.config.kind {
      GenerateKind::Models => {
        self.stat("Models generated:", stats.models_generated.to_string());
        self.stat("", format!("{} properties", stats.properties_generated));
        self.stat("", format!("{} relations", stats.relations_generated));
        self.stat("", format!("{} enums", stats.enums_generated));
      }
      GenerateKind::OperationMap => {
        self.stat("Modules processed:", stats.modules_processed.to_string());
        self.stat("Operations mapped:", stats.operations_mapped.to_string());
      }
    }

    self.stat("Files written:", (report.written.len() + report.indexes.len()).to_string());
    if !report.preserved.is_empty() {
      self.stat("Files preserved:", report.preserved.len().to_string());
    }
    if stats.skipped_count() > 0 {
      self.stat("Skipped:", stats.skipped_count().to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      if !warning.is_skipped_item() && !self.config.verbose {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      self.warning(label, &warning.to_string());
    }
  }

  fn log_success(&self) {
    if !self.config.quiet {
      let message = match self.config.kind {
        GenerateKind::Models => "Successfully generated TypeScript models",
        GenerateKind::OperationMap => "Successfully generated operation maps",
      };
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        message.with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let document = config.load_spec().await?;
  logger.log_config();
  let settings = config.load_config().await?;

  logger.log_generating();
  let output = config.generate(&document, &settings)?;
  if output.files.is_empty() {
    logger.info(&"Nothing to generate".with(colors.warning()).to_string());
  }

  logger.log_writing();
  let report = OutputWriter::new(&config.output).write(&output).await?;

  logger.print_report(&report);
  logger.print_statistics(&output.stats, &report);
  logger.log_success();
  Ok(())
}

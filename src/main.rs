mod commands;
mod core;
mod gate;
mod manifest;

use clap::{Parser, Subcommand};
use crate::core::context::GateContext;
use crate::core::error::{GateError, ResultExt, print_error};
use std::path::PathBuf;

/// Gate tag-driven deployments and read values from pom.xml
#[derive(Parser)]
#[command(name = "deploy-gate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct GateCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Fail unless the build tag, POM version and POM SCM tag describe one release
  AssertReady {
    /// Print the gate report as JSON
    #[arg(long)]
    json: bool,
    /// List each passed check on stderr
    #[arg(short, long)]
    verbose: bool,
    /// Read the POM version and SCM tag from the manifest when the environment lacks them
    #[arg(long)]
    from_manifest: bool,
    /// Manifest to read with --from-manifest (default: pom.xml)
    #[arg(long, requires = "from_manifest")]
    manifest: Option<PathBuf>,
  },

  /// Print the single value an XPath query selects from the manifest
  PomValue {
    /// XPath query, e.g. /project/version
    query: Option<String>,
    /// Manifest to read (default: pom.xml)
    #[arg(long)]
    manifest: Option<PathBuf>,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = GateCli::parse();

  let cwd = match std::env::current_dir().context("Failed to get current directory") {
    Ok(dir) => dir,
    Err(err) => handle_error(err),
  };

  let result = match cli.command {
    Commands::AssertReady {
      json,
      verbose,
      from_manifest,
      manifest,
    } => GateContext::build(&cwd)
      .and_then(|ctx| commands::run_assert_ready(&ctx, json, verbose, from_manifest, manifest.as_deref())),
    // Builds its own context: a missing query must fail before any file is read
    Commands::PomValue { query, manifest } => commands::run_pom_value(&cwd, query, manifest.as_deref()),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: GateError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}

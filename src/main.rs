mod commands;
mod core;
mod tree;
mod ui;
mod utils;

use clap::{Parser, Subcommand};
use commands::IdentityArgs;
use core::error::{BootstrapError, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Bootstrap a new plugin project from a placeholder template
#[derive(Parser)]
#[command(name = "template-bootstrap")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Show debug diagnostics (RUST_LOG overrides)
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Copy the template and rename packages, classes and identifiers
  New {
    #[command(flatten)]
    identity: IdentityArgs,
    /// Directory to copy the template into (must not already exist)
    #[arg(long)]
    output_dir: PathBuf,
    /// Validate and show the plan without writing anything
    #[arg(long)]
    dry_run: bool,
    /// Output the run report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Show the replacement plan for a new identity
  Plan {
    #[command(flatten)]
    identity: IdentityArgs,
    /// Output the plan in JSON format
    #[arg(long)]
    json: bool,
  },

  /// List the built-in template profiles
  Profiles {
    /// Output profiles in JSON format
    #[arg(long)]
    json: bool,
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

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let result = match cli.command {
    Commands::New {
      identity,
      output_dir,
      dry_run,
      json,
    } => commands::run_new(identity, output_dir, dry_run, json),
    Commands::Plan { identity, json } => commands::run_plan(identity, json),
    Commands::Profiles { json } => commands::run_profiles(json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: BootstrapError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}

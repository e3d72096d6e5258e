mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crossbuild_lib::TargetKind;

use crate::output::{OutputFormat, print_error};

/// Exit code for any failed command.
const FAILURE_EXIT_CODE: u8 = 2;

/// crossbuild - Build juju for windows and darwin on 386 and amd64
#[derive(Parser)]
#[command(name = "crossbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Do not make changes
  #[arg(short, long, global = true)]
  dry_run: bool,

  /// Increase verbosity
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Path to a config file (default: ~/.config/crossbuild/config.toml)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Args)]
struct BuildDirArgs {
  /// The path to the cross build dir (default: ~/crossbuild)
  #[arg(short, long)]
  build_dir: Option<PathBuf>,
}

#[derive(Args)]
struct BuildArgs {
  /// The path to the juju source tarball
  tarball_path: PathBuf,

  #[command(flatten)]
  dirs: BuildDirArgs,

  /// Where to place the package (default: current directory)
  #[arg(short = 'o', long)]
  dest_dir: Option<PathBuf>,

  /// Output format for the build summary
  #[arg(long, value_enum, default_value_t)]
  format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
  /// Setup a cross-compiling environment
  Setup {
    #[command(flatten)]
    dirs: BuildDirArgs,
  },

  /// Build a 386 windows juju client and an installer
  WinClient(BuildArgs),

  /// Build an amd64 windows juju agent
  WinAgent(BuildArgs),

  /// Build an amd64 OS X client and plugins
  OsxClient(BuildArgs),
}

fn main() -> ExitCode {
  let Cli {
    dry_run,
    verbose,
    config,
    command,
  } = Cli::parse();

  let default_level = if verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let build = |target: TargetKind, args: BuildArgs| {
    cmd::cmd_build(&cmd::BuildOptions {
      target,
      tarball: args.tarball_path,
      build_dir: args.dirs.build_dir,
      dest_dir: args.dest_dir,
      config: config.clone(),
      dry_run,
      format: args.format,
    })
  };

  let result = match command {
    Commands::Setup { dirs } => cmd::cmd_setup(config.as_deref(), dirs.build_dir),
    Commands::WinClient(args) => build(TargetKind::WinClient, args),
    Commands::WinAgent(args) => build(TargetKind::WinAgent, args),
    Commands::OsxClient(args) => build(TargetKind::OsxClient, args),
  };

  match result {
    Ok(()) => {
      if verbose {
        println!("Done.");
      }
      ExitCode::SUCCESS
    }
    Err(err) => {
      print_error(&format!("{:#}", err));
      if verbose {
        eprintln!("{:?}", err);
      }
      ExitCode::from(FAILURE_EXIT_CODE)
    }
  }
}

//! devconf command line tool
//!
//! Runs the configuration pipeline once per invocation against the backend
//! selected in the settings.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{debug, error, info};

use devconf::codec::JsonBuffer;
use devconf::common::{init_logger, DevconfError, Result};
use devconf::config::{BackendKind, Settings, CONFIG_FILE_ENV};
use devconf::pipeline::ConfigManager;
use devconf::{APP_NAME, VERSION};

/// Validate, apply and read back device configuration documents
#[derive(Parser, Debug)]
#[command(name = "devconf", version = VERSION, about, long_about = None)]
struct Cli {
    /// Settings file (JSON)
    #[arg(long, global = true, env = CONFIG_FILE_ENV)]
    config_file: Option<PathBuf>,

    /// Southbound backend (memory, kvstore, rest)
    #[arg(long, global = true)]
    backend: Option<BackendKind>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Skip re-validation of documents returned by `get`
    #[arg(long, global = true)]
    no_revalidate: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a configuration document
    Set {
        /// Configuration type, e.g. wireless
        #[arg(value_name = "TYPE")]
        type_name: String,
        /// Document file; standard input when omitted
        file: Option<PathBuf>,
    },
    /// Print the current configuration
    Get {
        /// Configuration type, e.g. wireless
        #[arg(value_name = "TYPE")]
        type_name: String,
        /// Output buffer capacity in bytes, terminator included
        #[arg(long)]
        buffer_size: Option<usize>,
    },
    /// Check a document without applying it
    Validate {
        /// Configuration type, e.g. wireless
        #[arg(value_name = "TYPE")]
        type_name: String,
        /// Document file; standard input when omitted
        file: Option<PathBuf>,
    },
    /// List registered configuration types
    Types,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}: {}", APP_NAME, e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(&cli)?;
    init_logger(&settings.log_level);
    debug!("Starting {} v{} with {:?}", APP_NAME, VERSION, settings);

    let manager = ConfigManager::from_settings(&settings)?;

    match cli.command {
        Command::Set { type_name, file } => {
            let document = read_document(file.as_deref())?;
            manager.try_set(&type_name, &document)?;
            info!("'{}' applied", type_name);
        }
        Command::Get { type_name, buffer_size } => {
            let mut out = JsonBuffer::with_capacity(buffer_size.unwrap_or(settings.get_buffer_size));
            manager.try_get(&type_name, &mut out)?;
            println!("{}", out);
        }
        Command::Validate { type_name, file } => {
            let document = read_document(file.as_deref())?;
            manager.validate(&type_name, &document)?;
            println!("{}: valid", type_name);
        }
        Command::Types => {
            for binding in manager.types().iter() {
                let (apply, fetch) = manager
                    .southbound()
                    .find(binding.name())
                    .map(|s| (s.can_apply(), s.can_fetch()))
                    .unwrap_or((false, false));
                println!(
                    "{}\t{}\tapply={}\tfetch={}",
                    binding.name(),
                    binding.schema_id(),
                    apply,
                    fetch
                );
            }
        }
    }

    Ok(())
}

/// Settings file and environment, then command line overrides
fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(cli.config_file.as_deref())?;

    if let Some(backend) = cli.backend {
        settings.backend = backend;
    }
    if let Some(level) = &cli.log_level {
        settings.log_level = level.clone();
    }
    if cli.no_revalidate {
        settings.revalidate_output = false;
    }

    settings.validate()?;
    Ok(settings)
}

fn read_document(file: Option<&Path>) -> Result<String> {
    let document = match file {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            DevconfError::Other(format!("failed to read {}: {}", path.display(), e))
        })?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(document)
}

//! Atmosphere editor.
//!
//! Inspect the height profiles of an RH 1.5D atmosphere file and replace
//! height ranges of temperature, electron density, vertical velocity or
//! turbulent velocity with straight-line segments, writing the result back
//! to the same file (or a copy).

mod commands;
mod report;
mod script;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use atmos_common::Quantity;
use atmos_editor::EditorConfig;

use report::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "atmos-edit")]
#[command(about = "Inspect and hand-edit atmosphere height profiles")]
struct Args {
    /// Atmosphere file (NetCDF-4 / HDF5)
    #[arg(short, long, env = "ATMOS_FILE")]
    file: PathBuf,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dataset shape and value ranges per time step
    Info,

    /// Print profiles inside a height window and their y-limits
    Show {
        /// Time step
        #[arg(short, long, default_value = "0")]
        time: usize,

        /// Lower window bound in Mm (default from ATMOS_HEIGHT_MIN or 0)
        #[arg(long, allow_negative_numbers = true)]
        height_min: Option<f64>,

        /// Upper window bound in Mm (default from ATMOS_HEIGHT_MAX or 5)
        #[arg(long, allow_negative_numbers = true)]
        height_max: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Replace one height range of a quantity, then save
    Edit {
        /// temperature, electron_density, velocity_z or turbulence
        #[arg(short, long)]
        quantity: Quantity,

        /// Time step
        #[arg(short, long, default_value = "0")]
        time: usize,

        /// Lower boundary height in Mm
        #[arg(long, allow_negative_numbers = true)]
        lower_height: f64,

        /// Value at the lower boundary
        #[arg(long, allow_negative_numbers = true)]
        lower_value: f64,

        /// Upper boundary height in Mm
        #[arg(long, allow_negative_numbers = true)]
        upper_height: f64,

        /// Value at the upper boundary
        #[arg(long, allow_negative_numbers = true)]
        upper_value: f64,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Apply every edit of a YAML edit script in order, then save once
    Apply {
        /// Edit script
        script: PathBuf,

        #[command(flatten)]
        write: WriteArgs,
    },
}

/// Where edits go.
#[derive(ClapArgs, Debug, Clone)]
pub struct WriteArgs {
    /// Apply edits in memory and print the result without saving
    #[arg(long, conflicts_with = "output")]
    pub dry_run: bool,

    /// Copy the input to this path and edit the copy
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the edited profiles after the edits (always on for --dry-run)
    #[arg(long)]
    pub show: bool,

    /// Output format of the edited profiles
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl WriteArgs {
    /// Whether the refreshed profiles are printed.
    pub fn shows_profiles(&self) -> bool {
        self.show || self.dry_run
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json);
    atmos_store::silence_hdf5_errors();

    let mut config = EditorConfig::from_env();
    if let Command::Show {
        height_min,
        height_max,
        ..
    } = &args.command
    {
        config.height_min = height_min.unwrap_or(config.height_min);
        config.height_max = height_max.unwrap_or(config.height_max);
    }

    // Only commands that print the height window depend on it.
    let prints_window = match &args.command {
        Command::Info => false,
        Command::Show { .. } => true,
        Command::Edit { write, .. } | Command::Apply { write, .. } => write.shows_profiles(),
    };
    if prints_window {
        config
            .validate()
            .map_err(|e| anyhow!("invalid configuration: {}", e))?;
    }

    info!(file = %args.file.display(), "Starting atmosphere editor");

    match args.command {
        Command::Info => commands::info(&args.file),
        Command::Show { time, format, .. } => commands::show(&args.file, time, format, &config),
        Command::Edit {
            quantity,
            time,
            lower_height,
            lower_value,
            upper_height,
            upper_value,
            write,
        } => {
            let request = atmos_editor::EditRequest::from_display(
                quantity,
                time,
                (lower_height, lower_value),
                (upper_height, upper_value),
            );
            commands::edit(&args.file, &[request], &write, &config)
        }
        Command::Apply { script, write } => {
            let script = script::EditScript::load(&script)?;
            commands::edit(&args.file, &script.requests(), &write, &config)
        }
    }
}

pub mod descriptor;
pub mod device;


use std::error::Error;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use descriptor::{handle_fixup, handle_inspect, FixupArgs};
use device::{handle_check, handle_devices};

use crate::config::load_fixups;
use crate::fixup::FixupRegistry;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Additional directory to load report fixup definitions from
    #[arg(long = "config-dir", global = true, value_name = "DIR")]
    pub config_dirs: Vec<PathBuf>,
    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List supported devices and their report descriptor fixups
    Devices,
    /// Check connected HID devices for faulty report descriptors (default)
    Check {
        /// Show all HID devices, not only the ones with a known fixup
        #[arg(long, action)]
        all: bool,
        /// HID device sysfs paths or device nodes (e.g. /dev/hidraw0) to check
        /// instead of every connected device
        paths: Vec<String>,
    },
    /// Apply the matching fixup to a report descriptor dump
    Fixup(FixupArgs),
    /// Decode the items of a report descriptor dump
    Inspect {
        /// Report descriptor file (e.g. /sys/bus/hid/devices/*/report_descriptor).
        /// Reads from stdin if omitted or "-".
        path: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions { shell: Shell },
}

pub async fn main_cli(args: Args) -> Result<(), Box<dyn Error>> {
    let cmd = args.cmd.unwrap_or(Commands::Check {
        all: false,
        paths: vec![],
    });

    if let Commands::Completions { shell } = cmd {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        return Ok(());
    }

    let registry = FixupRegistry::builtin().with_fixups(load_fixups(&args.config_dirs));
    log::debug!("Loaded {} report fixups", registry.len());

    match cmd {
        Commands::Devices => handle_devices(&registry)?,
        Commands::Check { all, paths } => handle_check(&registry, all, paths)?,
        Commands::Fixup(fixup_args) => handle_fixup(&registry, fixup_args).await?,
        Commands::Inspect { path } => handle_inspect(path).await?,
        Commands::Completions { .. } => (),
    }

    Ok(())
}

/// Parses a 16-bit hexadecimal value with or without a "0x" prefix
pub fn parse_hex_u16(value: &str) -> Result<u16, String> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u16::from_str_radix(digits, 16).map_err(|e| format!("Invalid hex value '{value}': {e}"))
}

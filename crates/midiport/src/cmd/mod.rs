use clap::{Args, Subcommand, ValueEnum};
use midiport_bridge::PortConfig;
use midiport_frame::{FrameConfig, PayloadEncoding, DEFAULT_MAX_PAYLOAD};

use crate::exit::{CliError, CliResult, USAGE};

pub mod example;
pub mod serve;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the port loop on stdin/stdout.
    Serve,
    /// Show version information.
    Version(VersionArgs),
    /// Run the example routine once and exit.
    Example,
}

pub fn run(command: Command, port: &PortArgs) -> CliResult<i32> {
    match command {
        Command::Serve => serve::run(port),
        Command::Version(args) => version::run(args),
        Command::Example => example::run(),
    }
}

/// How frames arrive from the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FrameParser {
    /// Raw encoded terms, as sent by a native port.
    Port,
    /// Hex-wrapped terms, for hosts that spawn the bridge through an exec library.
    Exec,
}

#[derive(Args, Debug, Clone)]
pub struct PortArgs {
    /// Frame parser to use on stdin.
    #[arg(
        long,
        value_enum,
        default_value = "port",
        global = true,
        env = "MIDIPORT_PARSER"
    )]
    pub parser: FrameParser,

    /// Shorthand for `--parser exec`.
    #[arg(long, global = true, env = "MIDIPORT_HEX")]
    pub hex: bool,

    /// Largest accepted frame payload in bytes.
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_PAYLOAD,
        global = true,
        env = "MIDIPORT_MAX_FRAME_SIZE"
    )]
    pub max_frame_size: usize,
}

impl PortArgs {
    pub fn encoding(&self) -> PayloadEncoding {
        if self.hex || self.parser == FrameParser::Exec {
            PayloadEncoding::Hex
        } else {
            PayloadEncoding::Raw
        }
    }

    pub fn config(&self) -> CliResult<PortConfig> {
        if self.max_frame_size == 0 {
            return Err(CliError::new(USAGE, "--max-frame-size must be at least 1"));
        }
        Ok(PortConfig {
            encoding: self.encoding(),
            frame: FrameConfig {
                max_payload_size: self.max_frame_size,
            },
        })
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum VersionFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
    /// Output format.
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: VersionFormat,
}

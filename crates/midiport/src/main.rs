mod cmd;
mod exit;
mod logging;
mod midi;

use clap::Parser;

use crate::cmd::{Command, PortArgs};
use crate::logging::{init_logging, LogFormat, LogLevel, LogOptions};

#[derive(Parser, Debug)]
#[command(
    name = "midiport",
    version,
    about = "Erlang port bridge for MIDI commands"
)]
struct Cli {
    /// Log output format (stderr).
    #[arg(
        long,
        value_name = "FORMAT",
        default_value = "text",
        global = true,
        env = "MIDIPORT_LOG_FORMAT"
    )]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "info",
        global = true,
        env = "MIDIPORT_LOG_LEVEL"
    )]
    log_level: LogLevel,

    /// Include source file and line in log records.
    #[arg(long, global = true, env = "MIDIPORT_LOG_REPORT_CALLER")]
    log_report_caller: bool,

    #[command(flatten)]
    port: PortArgs,

    /// Defaults to `serve`.
    #[command(subcommand)]
    command: Option<Command>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(LogOptions {
        format: cli.log_format,
        level: cli.log_level,
        report_caller: cli.log_report_caller,
    });

    let command = cli.command.unwrap_or(Command::Serve);
    match cmd::run(command, &cli.port) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

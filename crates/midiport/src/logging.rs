use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Logging flags as parsed from the command line.
#[derive(Copy, Clone, Debug)]
pub struct LogOptions {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Attach source file and line to each record.
    pub report_caller: bool,
}

/// Install the global subscriber. Records go to stderr; stdout carries frames.
pub fn init_logging(options: LogOptions) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(options.level.as_filter())
        .with_ansi(false)
        .with_target(false)
        .with_file(options.report_caller)
        .with_line_number(options.report_caller);

    let installed = match options.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };
    if installed.is_err() {
        eprintln!("warning: a global log subscriber was already installed");
    }
}

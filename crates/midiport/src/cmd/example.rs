use midiport_bridge::ExampleRunner;

use crate::exit::{CliError, CliResult, FAILURE, SUCCESS};
use crate::midi::LoggingExample;

pub fn run() -> CliResult<i32> {
    LoggingExample::default()
        .run()
        .map_err(|err| CliError::new(FAILURE, format!("example failed: {err}")))?;
    println!("ok");
    Ok(SUCCESS)
}

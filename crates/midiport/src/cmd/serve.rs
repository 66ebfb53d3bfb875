use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use midiport_bridge::{Dispatcher, Port, Reply, Shutdown};

use crate::cmd::PortArgs;
use crate::exit::{bridge_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::midi::{LoggingDevices, LoggingExample, LoggingMidi, LIST_DEVICES, PLAY_NOTE};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
/// How long a signalled shutdown waits for the loop to finish a pending `stop`.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

pub fn run(args: &PortArgs) -> CliResult<i32> {
    let config = args.config()?;
    let shutdown = Shutdown::new();
    install_shutdown_handler(shutdown.clone())?;

    let dispatcher = Dispatcher::new(shutdown.clone())
        .with_midi(LoggingMidi)
        .with_example(LoggingExample::default())
        .register("version", |_: &str| {
            Reply::result(env!("CARGO_PKG_VERSION"))
        })
        .register(LIST_DEVICES, LoggingDevices)
        .register(PLAY_NOTE, LoggingDevices);

    tracing::info!(
        encoding = ?config.encoding,
        max_frame_size = config.frame.max_payload_size,
        "port started"
    );

    // The loop runs on its own thread so a signal can end the process while
    // the loop is blocked reading stdin.
    let (done_tx, done_rx) = mpsc::channel();
    thread::Builder::new()
        .name("midiport-port".to_string())
        .spawn(move || {
            let stdin = std::io::stdin().lock();
            let stdout = std::io::stdout().lock();
            let mut port = Port::new(stdin, stdout, dispatcher, config);
            let _ = done_tx.send(port.run());
        })
        .map_err(|err| CliError::new(INTERNAL, format!("port thread spawn failed: {err}")))?;

    let result = loop {
        match done_rx.recv_timeout(POLL_INTERVAL) {
            Ok(result) => break result,
            Err(RecvTimeoutError::Timeout) if shutdown.is_triggered() => {
                match done_rx.recv_timeout(SHUTDOWN_GRACE) {
                    Ok(result) => break result,
                    Err(_) => {
                        tracing::info!("shutdown signalled while waiting for input");
                        return Ok(SUCCESS);
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                return Err(CliError::new(INTERNAL, "port thread exited unexpectedly"));
            }
        }
    };

    match result {
        Ok(()) => {
            tracing::info!("port stopped");
            Ok(SUCCESS)
        }
        Err(err) if err.is_channel_closed() => Ok(SUCCESS),
        Err(err) => Err(bridge_error("port failed", err)),
    }
}

fn install_shutdown_handler(shutdown: Shutdown) -> CliResult<()> {
    ctrlc::set_handler(move || shutdown.trigger()).map_err(|err| {
        CliError::new(INTERNAL, format!("signal handler setup failed: {err}"))
    })
}

#![cfg(all(unix, feature = "cli"))]

use std::io::Write;
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use midiport::frame::{hex_decode, hex_encode};
use midiport::term::{decode, encode, Term};

/// Split captured stdout into frame payloads.
fn frames(stdout: &[u8]) -> Vec<&[u8]> {
    stdout
        .split(|&b| b == b'\n')
        .filter(|line| !line.is_empty())
        .collect()
}

fn spawn(args: &[&str]) -> Child {
    Command::new(env!("CARGO_BIN_EXE_midiport"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("midiport should start")
}

fn message(directive: &str, payload: Term) -> Vec<u8> {
    let term = Term::tuple([Term::atom(directive), payload]);
    let mut bytes = encode(&term).expect("message should encode").to_vec();
    bytes.push(b'\n');
    bytes
}

fn command(verb: &str) -> Vec<u8> {
    message("command", Term::atom(verb))
}

fn hex_line(raw_frame: &[u8]) -> Vec<u8> {
    let payload = raw_frame.strip_suffix(b"\n").unwrap_or(raw_frame);
    let mut line = hex_encode(payload);
    line.push(b'\n');
    line
}

/// Write all input, close stdin, and wait for the process to exit.
fn session(args: &[&str], input: &[u8]) -> Output {
    let mut child = spawn(args);
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input)
        .expect("input should be written");
    wait_with_timeout(child, Duration::from_secs(5))
}

fn wait_with_timeout(mut child: Child, timeout: Duration) -> Output {
    let start = Instant::now();
    loop {
        if child.try_wait().expect("child should be waitable").is_some() {
            return child.wait_with_output().expect("output should be collected");
        }
        if start.elapsed() >= timeout {
            let _ = child.kill();
            panic!("midiport did not exit within {timeout:?}");
        }
        thread::sleep(Duration::from_millis(20));
    }
}

fn reply(tag: &str, value: &str) -> Term {
    Term::tuple([Term::atom(tag), Term::binary(value.as_bytes().to_vec())])
}

fn decoded(stdout: &[u8]) -> Vec<Term> {
    frames(stdout)
        .into_iter()
        .map(|payload| decode(payload).expect("reply should decode"))
        .collect()
}

#[test]
fn ping_is_answered_with_pong_and_close_exits_cleanly() {
    let output = session(&[], &command("ping"));

    assert!(output.status.success(), "status: {:?}", output.status);
    assert_eq!(decoded(&output.stdout), vec![reply("result", "pong")]);
}

#[test]
fn unsupported_command_is_answered_with_error() {
    let output = session(&["serve"], &command("bogus"));

    assert!(output.status.success());
    assert_eq!(
        decoded(&output.stdout),
        vec![reply("error", "Received unsupported command")]
    );
}

#[test]
fn midi_and_unknown_messages_get_no_reply() {
    let mut input = message(
        "midi",
        Term::list([Term::tuple([
            Term::atom("note_on"),
            Term::list([Term::Integer(60), Term::Integer(90)]),
        ])]),
    );
    input.extend(message("unknown", Term::atom("x")));
    input.extend(command("ping"));

    let output = session(&[], &input);

    assert!(output.status.success());
    assert_eq!(decoded(&output.stdout), vec![reply("result", "pong")]);
}

#[test]
fn unknown_directive_is_logged_to_stderr() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_midiport"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("midiport should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(&message("unknown", Term::atom("x")))
        .expect("input should be written");
    let output = wait_with_timeout(child, Duration::from_secs(5));

    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected message type"), "stderr: {stderr}");
}

#[test]
fn garbage_frames_are_skipped() {
    let mut input = b"\x83\x68\n".to_vec();
    input.extend_from_slice(b"not a term\n");
    input.extend(command("ping"));

    let output = session(&[], &input);

    assert!(output.status.success());
    assert_eq!(decoded(&output.stdout), vec![reply("result", "pong")]);
}

#[test]
fn exec_parser_speaks_hex_both_ways() {
    let mut input = hex_line(&command("ping"));
    input.extend(hex_line(&command("example")));

    let output = session(&["--parser", "exec"], &input);

    assert!(output.status.success());
    let replies: Vec<Term> = frames(&output.stdout)
        .into_iter()
        .map(|line| decode(&hex_decode(line).expect("reply should be hex")).unwrap())
        .collect();
    assert_eq!(replies, vec![reply("result", "pong"), reply("result", "ok")]);
}

#[test]
fn version_verb_is_answered_over_the_port() {
    let output = session(&[], &command("version"));

    assert!(output.status.success());
    assert_eq!(
        decoded(&output.stdout),
        vec![reply("result", env!("CARGO_PKG_VERSION"))]
    );
}

#[test]
fn device_verbs_are_answered_without_a_device() {
    let mut input = command("list-devices");
    input.extend(command("play-note"));

    let output = session(&[], &input);

    assert!(output.status.success());
    assert_eq!(
        decoded(&output.stdout),
        vec![reply("result", "none"), reply("result", "ok")]
    );
}

#[test]
fn stop_waits_for_signal_and_writes_nothing() {
    let mut child = spawn(&[]);
    let mut stdin = child.stdin.take().expect("stdin should be piped");
    stdin.write_all(&command("stop")).expect("stop should be written");
    stdin.flush().expect("stdin should flush");

    // Give the loop time to read `stop` and install its signal handler.
    thread::sleep(Duration::from_millis(300));
    assert!(
        child.try_wait().expect("child should be waitable").is_none(),
        "stop must block until signalled"
    );

    let status = Command::new("kill")
        .arg("-TERM")
        .arg(child.id().to_string())
        .status()
        .expect("kill should run");
    assert!(status.success());

    drop(stdin);
    let output = wait_with_timeout(child, Duration::from_secs(5));
    assert!(output.status.success(), "status: {:?}", output.status);
    assert!(output.stdout.is_empty());
}

#[test]
fn version_subcommand_prints_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_midiport"))
        .arg("version")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("midiport {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn example_subcommand_prints_ok() {
    let output = Command::new(env!("CARGO_BIN_EXE_midiport"))
        .args(["--log-level", "error", "example"])
        .output()
        .expect("example should run");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "ok");
}

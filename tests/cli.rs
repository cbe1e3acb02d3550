//! Process-level checks of the `heartbeat-watchdog` binary: CLI overrides and exit status.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const DEADLINE: Duration = Duration::from_secs(10);

/// Config whose port is deliberately unusable, so only `--port` can make it work.
fn write_config(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "heartbeat-watchdog-cli-{}-{}.toml",
        name,
        std::process::id()
    ));
    std::fs::write(
        &path,
        "[listener]\nbind_address = \"127.0.0.1\"\nport = 1\n\n[monitor]\nwindow_ms = 500\ngrace_ms = 100\n",
    )
    .unwrap();
    path
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

fn spawn(config: &Path, port: u16) -> Child {
    Command::new(env!("CARGO_BIN_EXE_heartbeat-watchdog"))
        .arg("--config")
        .arg(config)
        .arg("--port")
        .arg(port.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap()
}

fn wait_with_deadline(child: &mut Child) -> ExitStatus {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return status;
        }
        if start.elapsed() > DEADLINE {
            let _ = child.kill();
            panic!("watchdog process did not exit");
        }
        thread::sleep(Duration::from_millis(20));
    }
}

fn connect_with_retry(port: u16) -> TcpStream {
    let start = Instant::now();
    loop {
        match TcpStream::connect(("127.0.0.1", port)) {
            Ok(stream) => return stream,
            Err(_) if start.elapsed() < DEADLINE => thread::sleep(Duration::from_millis(50)),
            Err(e) => panic!("watchdog never listened on {}: {}", port, e),
        }
    }
}

#[test]
fn silent_peer_gets_notice_and_process_exits_one() {
    let config = write_config("silent");
    let port = free_port();
    let mut child = spawn(&config, port);

    let mut stream = connect_with_retry(port);
    stream.write_all(b"x").unwrap();
    stream.set_read_timeout(Some(DEADLINE)).unwrap();

    let mut notice = [0u8; 8];
    stream.read_exact(&mut notice).unwrap();
    assert_eq!(&notice, b"TIMEOUT\0");

    let status = wait_with_deadline(&mut child);
    assert_eq!(status.code(), Some(1));
    let _ = std::fs::remove_file(config);
}

#[test]
fn occupied_port_exits_two() {
    let config = write_config("occupied");
    let occupant = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupant.local_addr().unwrap().port();

    let mut child = spawn(&config, port);

    let status = wait_with_deadline(&mut child);
    assert_eq!(status.code(), Some(2));
    drop(occupant);
    let _ = std::fs::remove_file(config);
}

#[test]
fn unreadable_config_exits_two() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_heartbeat-watchdog"))
        .arg("--config")
        .arg("/nonexistent/heartbeat-watchdog.toml")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let status = wait_with_deadline(&mut child);
    assert_eq!(status.code(), Some(2));
}

//! Line-based command input feeding the tray event channel.
//!
//! Without a drawing backend the menu cannot be clicked, so `run` reads
//! commands from stdin and forwards them as the same [`TrayEvent`]s the
//! menu would emit.

use std::io::BufRead;
use std::sync::mpsc;

use netbird_manager_tray::TrayEvent;

/// Maps one input line to a tray event. Blank or unknown lines yield `None`.
pub fn parse_command(line: &str) -> Option<TrayEvent> {
    let mut words = line.split_whitespace();
    let command = words.next()?;
    let rest = words.collect::<Vec<_>>().join(" ");

    let event = match command {
        "status" | "show" => TrayEvent::ShowStatus,
        "refresh" => TrayEvent::RefreshStatus,
        "up" | "connect" if !rest.is_empty() => TrayEvent::Connect(rest),
        "down" | "disconnect" => TrayEvent::Disconnect,
        "quit" | "exit" => TrayEvent::QuitRequested,
        _ => {
            tracing::warn!(%line, "unknown command");
            return None;
        }
    };
    Some(event)
}

/// Forwards commands from `reader` until EOF or until the receiver is gone.
///
/// Returns the number of events sent.
pub fn forward_commands<R: BufRead>(reader: R, event_tx: &mpsc::Sender<TrayEvent>) -> usize {
    let mut sent = 0;
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("error reading command: {e}");
                break;
            }
        };
        let Some(event) = parse_command(&line) else {
            continue;
        };
        if event_tx.send(event).is_err() {
            break;
        }
        sent += 1;
    }
    sent
}

/// Reads commands from stdin on a dedicated thread.
pub fn spawn_console(event_tx: mpsc::Sender<TrayEvent>) {
    std::thread::spawn(move || {
        let sent = forward_commands(std::io::stdin().lock(), &event_tx);
        tracing::debug!(sent, "command input closed");
    });
}

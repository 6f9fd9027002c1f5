//! Exit node state reconstructed from the daemon event log.

use std::fmt;

use crate::document::Event;

/// `userMessage` of the event emitted when an exit node route comes up.
pub const EXIT_NODE_CONNECTED_MESSAGE: &str = "Exit node connected.";

/// `userMessage` of the event emitted when an exit node route goes away.
pub const EXIT_NODE_LOST_MESSAGE: &str = "Exit node connection lost.";

/// Exit node as shown in the status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitNodeState {
    ConnectedTo(String),
    NotApplicable,
}

impl fmt::Display for ExitNodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectedTo(name) => f.write_str(name),
            Self::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// The most recent exit node event, before normalization.
enum ExitNodeSignal {
    Connected(String),
    Lost,
}

fn latest_signal(events: &[Event]) -> Option<ExitNodeSignal> {
    events.iter().rev().find_map(|event| {
        match event.user_message.as_deref() {
            Some(EXIT_NODE_CONNECTED_MESSAGE) => {
                let id = event
                    .metadata
                    .as_ref()
                    .and_then(|m| m.id.clone())
                    .unwrap_or_else(|| "Unknown".into());
                Some(ExitNodeSignal::Connected(id))
            }
            Some(EXIT_NODE_LOST_MESSAGE) => Some(ExitNodeSignal::Lost),
            _ => None,
        }
    })
}

/// Returns the exit node named by the latest qualifying event.
///
/// A lost connection reports [`ExitNodeState::NotApplicable`], the same as
/// an empty log, so "never connected" and "recently dropped" look alike.
pub fn derive_exit_node_state(events: &[Event]) -> ExitNodeState {
    match latest_signal(events) {
        Some(ExitNodeSignal::Connected(name)) => ExitNodeState::ConnectedTo(name),
        Some(ExitNodeSignal::Lost) | None => ExitNodeState::NotApplicable,
    }
}

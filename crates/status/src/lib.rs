//! Status snapshot interpreter for the NetBird manager.
//!
//! Everything in this crate is pure: callers hand in the text printed by
//! `netbird status --json` and `netbird profile list`, and get back
//! structured values. No I/O, no logging, no state kept between calls.
//!
//! - [`StatusDocument`] — the decoded status JSON, every field optional
//! - [`build_status_lines`] — the fixed 14-line health summary
//! - [`derive_exit_node_state`] — latest-event-wins exit node reducer
//! - [`derive_connectivity`] — the tray icon's on/off signal
//! - [`parse_profile_list`] — profile names from the list output

mod document;
mod error;
mod exit_node;
mod lines;
mod os_info;
mod profiles;
mod report;

pub use document::{
    Event, EventMetadata, ManagementState, PeerCounts, RelayCounts, SignalState, SshServerState,
    StatusDocument,
};
pub use error::ParseError;
pub use exit_node::{
    EXIT_NODE_CONNECTED_MESSAGE, EXIT_NODE_LOST_MESSAGE, ExitNodeState, derive_exit_node_state,
};
pub use lines::{Health, StatusLine, build_status_lines, classify};
pub use os_info::{DEFAULT_OS_INFO, format_os_info};
pub use profiles::parse_profile_list;
pub use report::{StatusReport, interpret, render_error};

/// Returns whether the management connection is up.
///
/// Only `management.connected` counts; the signal connection is ignored.
pub fn derive_connectivity(doc: &StatusDocument) -> bool {
    doc.management
        .as_ref()
        .and_then(|m| m.connected)
        .unwrap_or(false)
}

/// Parses `raw` and returns [`derive_connectivity`], or `false` when the
/// text is not a valid status document.
pub fn connectivity_from_json(raw: &str) -> bool {
    StatusDocument::from_json(raw)
        .map(|doc| derive_connectivity(&doc))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_follows_management_only() {
        let doc = StatusDocument::from_json(
            r#"{"management":{"connected":false},"signal":{"connected":true}}"#,
        )
        .unwrap();
        assert!(!derive_connectivity(&doc));

        let doc = StatusDocument::from_json(r#"{"management":{"connected":true}}"#).unwrap();
        assert!(derive_connectivity(&doc));
    }

    #[test]
    fn connectivity_defaults_to_false() {
        let doc = StatusDocument::from_json("{}").unwrap();
        assert!(!derive_connectivity(&doc));

        let doc = StatusDocument::from_json(r#"{"management":{}}"#).unwrap();
        assert!(!derive_connectivity(&doc));
    }

    #[test]
    fn connectivity_from_invalid_json_is_false() {
        assert!(!connectivity_from_json("daemon is not running"));
        assert!(!connectivity_from_json(""));
        assert!(connectivity_from_json(r#"{"management":{"connected":true}}"#));
    }

    #[test]
    fn connectivity_is_repeatable() {
        let doc = StatusDocument::from_json(r#"{"management":{"connected":true}}"#).unwrap();
        assert_eq!(derive_connectivity(&doc), derive_connectivity(&doc));
    }
}

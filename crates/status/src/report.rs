//! Rendered status report.

use std::fmt;

use crate::document::StatusDocument;
use crate::error::ParseError;
use crate::exit_node::{ExitNodeState, derive_exit_node_state};
use crate::lines::{StatusLine, build_status_lines};

/// Classified summary plus the derived exit node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub lines: Vec<StatusLine>,
    pub exit_node: ExitNodeState,
}

impl StatusReport {
    /// Builds a report from an already decoded document.
    pub fn from_document(doc: &StatusDocument, os_info: &str) -> Self {
        Self {
            lines: build_status_lines(doc, os_info),
            exit_node: derive_exit_node_state(doc.events()),
        }
    }

    /// Text shown in the status panel, one line per entry, newline
    /// terminated. The exit node line carries no health marker.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        writeln!(f, "Exit Node: {}", self.exit_node)
    }
}

/// Decodes `raw` status JSON and builds the full report.
pub fn interpret(raw: &str, os_info: &str) -> Result<StatusReport, ParseError> {
    let doc = StatusDocument::from_json(raw)?;
    Ok(StatusReport::from_document(&doc, os_info))
}

/// Single-line replacement for the report when the status is unavailable.
pub fn render_error(error: impl fmt::Display) -> String {
    format!("Error getting status: {error}\n")
}

//! Fixed-order status summary and its health classification.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::StatusDocument;

/// Substrings that mark a rendered line as unhealthy. Checked first.
const UNHEALTHY_MARKERS: [&str; 5] = ["0/", "N/A", "Disabled", "false", "Disconnected"];

/// A positive count over a total, e.g. `3/5`.
static POSITIVE_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[1-9]\d*/").expect("valid regex"));

/// Health of a single summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Healthy,
    Unhealthy,
    Neutral,
}

impl Health {
    /// Presentation marker shown before the line, if any.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            Self::Healthy => Some("🟢"),
            Self::Unhealthy => Some("🔴"),
            Self::Neutral => None,
        }
    }
}

/// One labelled line of the status summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub label: &'static str,
    pub value: String,
    pub health: Health,
}

impl StatusLine {
    /// Builds a line and classifies its rendered text.
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        let health = classify(&format!("{label}: {value}"));
        Self {
            label,
            value,
            health,
        }
    }

    /// The line as shown to the user, without the health marker.
    pub fn text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.health.marker() {
            Some(marker) => write!(f, "{marker} {}: {}", self.label, self.value),
            None => write!(f, "{}: {}", self.label, self.value),
        }
    }
}

/// Classifies rendered text by literal substrings.
///
/// Unhealthy markers are checked before healthy ones, so
/// `"Peers count: 0/3 Connected"` is unhealthy.
pub fn classify(text: &str) -> Health {
    if UNHEALTHY_MARKERS.iter().any(|m| text.contains(m)) {
        Health::Unhealthy
    } else if text.contains("Connected")
        || POSITIVE_FRACTION.is_match(text)
        || text.contains("Enabled")
        || text.contains("true")
    {
        Health::Healthy
    } else {
        Health::Neutral
    }
}

fn connected(flag: Option<bool>) -> &'static str {
    if flag.unwrap_or(false) {
        "Connected"
    } else {
        "Disconnected"
    }
}

fn literal_bool(flag: Option<bool>) -> &'static str {
    if flag.unwrap_or(false) { "true" } else { "false" }
}

/// Renders the 14-line summary in canonical order.
///
/// The first line is `OS: {os_info}`; the remaining 13 come from `doc`,
/// with defaults for every absent field.
pub fn build_status_lines(doc: &StatusDocument, os_info: &str) -> Vec<StatusLine> {
    let relays = doc.relays.clone().unwrap_or_default();
    let peers = doc.peers.clone().unwrap_or_default();
    let ssh_enabled = doc.ssh_server.as_ref().and_then(|s| s.enabled);

    vec![
        StatusLine::new("OS", os_info),
        StatusLine::new(
            "Daemon version",
            doc.daemon_version.as_deref().unwrap_or("Unknown"),
        ),
        StatusLine::new(
            "CLI version",
            doc.cli_version.as_deref().unwrap_or("Unknown"),
        ),
        StatusLine::new(
            "Management",
            connected(doc.management.as_ref().and_then(|m| m.connected)),
        ),
        StatusLine::new(
            "Signal",
            connected(doc.signal.as_ref().and_then(|s| s.connected)),
        ),
        StatusLine::new(
            "Relays",
            format!(
                "{}/{} Available",
                relays.available.unwrap_or(0),
                relays.total.unwrap_or(0)
            ),
        ),
        StatusLine::new(
            "Nameservers",
            format!("{} Available", doc.nameserver_count()),
        ),
        StatusLine::new("FQDN", doc.fqdn.as_deref().unwrap_or("")),
        StatusLine::new("NetBird IP", doc.netbird_ip.as_deref().unwrap_or("")),
        StatusLine::new(
            "Interface type",
            if doc.uses_kernel_interface.unwrap_or(false) {
                "Kernel"
            } else {
                "Userspace"
            },
        ),
        StatusLine::new("Quantum resistance", literal_bool(doc.quantum_resistance)),
        StatusLine::new("Lazy connection", literal_bool(doc.lazy_connection_enabled)),
        StatusLine::new(
            "SSH Server",
            if ssh_enabled.unwrap_or(false) {
                "Enabled"
            } else {
                "Disabled"
            },
        ),
        StatusLine::new(
            "Peers count",
            format!(
                "{}/{} Connected",
                peers.connected.unwrap_or(0),
                peers.total.unwrap_or(0)
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 14] = [
        "OS",
        "Daemon version",
        "CLI version",
        "Management",
        "Signal",
        "Relays",
        "Nameservers",
        "FQDN",
        "NetBird IP",
        "Interface type",
        "Quantum resistance",
        "Lazy connection",
        "SSH Server",
        "Peers count",
    ];

    fn labels(lines: &[StatusLine]) -> Vec<&'static str> {
        lines.iter().map(|l| l.label).collect()
    }

    fn line<'a>(lines: &'a [StatusLine], label: &str) -> &'a StatusLine {
        lines.iter().find(|l| l.label == label).unwrap()
    }

    #[test]
    fn unhealthy_wins_over_healthy() {
        assert_eq!(classify("Peers count: 0/3 Connected"), Health::Unhealthy);
        assert_eq!(classify("Management: Disconnected"), Health::Unhealthy);
    }

    #[test]
    fn unhealthy_markers() {
        assert_eq!(classify("Relays: 0/1 Available"), Health::Unhealthy);
        assert_eq!(classify("Exit Node: N/A"), Health::Unhealthy);
        assert_eq!(classify("SSH Server: Disabled"), Health::Unhealthy);
        assert_eq!(classify("Lazy connection: false"), Health::Unhealthy);
    }

    #[test]
    fn healthy_markers() {
        assert_eq!(classify("Signal: Connected"), Health::Healthy);
        assert_eq!(classify("Relays: 2/3 Available"), Health::Healthy);
        assert_eq!(classify("Relays: 11/12 Available"), Health::Healthy);
        assert_eq!(classify("SSH Server: Enabled"), Health::Healthy);
        assert_eq!(classify("Quantum resistance: true"), Health::Healthy);
    }

    #[test]
    fn neutral_lines() {
        assert_eq!(classify("Daemon version: 0.60.9"), Health::Neutral);
        assert_eq!(classify("Interface type: Userspace"), Health::Neutral);
        assert_eq!(classify("FQDN: "), Health::Neutral);
        assert_eq!(classify("OS: arch/x86_64"), Health::Neutral);
    }

    #[test]
    fn empty_document_renders_defaults() {
        let lines = build_status_lines(&StatusDocument::default(), "linux/x86_64");
        assert_eq!(lines.len(), 14);
        assert_eq!(labels(&lines), LABELS);

        let texts: Vec<String> = lines.iter().map(StatusLine::text).collect();
        assert_eq!(
            texts,
            [
                "OS: linux/x86_64",
                "Daemon version: Unknown",
                "CLI version: Unknown",
                "Management: Disconnected",
                "Signal: Disconnected",
                "Relays: 0/0 Available",
                "Nameservers: 0 Available",
                "FQDN: ",
                "NetBird IP: ",
                "Interface type: Userspace",
                "Quantum resistance: false",
                "Lazy connection: false",
                "SSH Server: Disabled",
                "Peers count: 0/0 Connected",
            ]
        );
    }

    #[test]
    fn order_is_fixed_for_full_document() {
        let doc = StatusDocument::from_json(
            r#"{
                "daemonVersion": "0.61.0",
                "cliVersion": "0.61.0",
                "management": {"connected": true},
                "signal": {"connected": true},
                "relays": {"available": 2, "total": 2},
                "dnsServers": [{}, {}, {}],
                "fqdn": "laptop.netbird.cloud",
                "netbirdIp": "100.92.1.4/16",
                "usesKernelInterface": true,
                "quantumResistance": true,
                "lazyConnectionEnabled": true,
                "sshServer": {"enabled": true},
                "peers": {"connected": 4, "total": 5}
            }"#,
        )
        .unwrap();
        let lines = build_status_lines(&doc, "fedora/aarch64");
        assert_eq!(labels(&lines), LABELS);
        // One OS line plus 13 derived from the document.
        assert_eq!(lines[1..].len(), 13);

        assert_eq!(line(&lines, "Management").health, Health::Healthy);
        assert_eq!(line(&lines, "Relays").value, "2/2 Available");
        assert_eq!(line(&lines, "Nameservers").value, "3 Available");
        assert_eq!(line(&lines, "Interface type").value, "Kernel");
        assert_eq!(line(&lines, "Quantum resistance").health, Health::Healthy);
        assert_eq!(line(&lines, "SSH Server").value, "Enabled");
        assert_eq!(line(&lines, "Peers count").value, "4/5 Connected");
        assert_eq!(line(&lines, "Peers count").health, Health::Healthy);
    }

    #[test]
    fn relay_line_with_no_available_relays() {
        let doc =
            StatusDocument::from_json(r#"{"relays":{"available":0,"total":1}}"#).unwrap();
        let lines = build_status_lines(&doc, "linux/x86_64");
        let relays = line(&lines, "Relays");
        assert_eq!(relays.text(), "Relays: 0/1 Available");
        assert_eq!(relays.health, Health::Unhealthy);
    }

    #[test]
    fn classification_uses_rendered_text() {
        // "10/3" contains "0/" and is therefore unhealthy.
        let doc =
            StatusDocument::from_json(r#"{"peers":{"connected":10,"total":30}}"#).unwrap();
        let lines = build_status_lines(&doc, "linux/x86_64");
        assert_eq!(line(&lines, "Peers count").health, Health::Unhealthy);
    }

    #[test]
    fn display_prefixes_marker() {
        assert_eq!(
            StatusLine::new("Signal", "Connected").to_string(),
            "🟢 Signal: Connected"
        );
        assert_eq!(
            StatusLine::new("SSH Server", "Disabled").to_string(),
            "🔴 SSH Server: Disabled"
        );
        assert_eq!(
            StatusLine::new("CLI version", "0.60.9").to_string(),
            "CLI version: 0.60.9"
        );
    }

    #[test]
    fn build_is_repeatable() {
        let doc = StatusDocument::from_json(r#"{"signal":{"connected":true}}"#).unwrap();
        assert_eq!(
            build_status_lines(&doc, "linux/x86_64"),
            build_status_lines(&doc, "linux/x86_64")
        );
    }
}

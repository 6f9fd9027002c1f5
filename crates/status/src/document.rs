//! Typed view of `netbird status --json`.
//!
//! Every field is optional. Missing and `null` values both decode to `None`
//! and are replaced by display defaults when the summary is built.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Point-in-time status snapshot reported by the NetBird daemon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daemon_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management: Option<ManagementState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<SignalState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relays: Option<RelayCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_servers: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netbird_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses_kernel_interface: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum_resistance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lazy_connection_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_server: Option<SshServerState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peers: Option<PeerCounts>,
    /// Daemon event log, oldest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Event>>,
}

/// Management server connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagementState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected: Option<bool>,
}

/// Signal server connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected: Option<bool>,
}

/// Relay availability as an `available/total` ratio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelayCounts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

/// Embedded SSH server state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SshServerState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Peer connectivity as a `connected/total` ratio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerCounts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

/// A single entry of the daemon event log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

/// Event metadata; only `id` is read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl StatusDocument {
    /// Decodes the output of `netbird status --json`.
    ///
    /// The top-level value must be a JSON object; arrays and scalars are
    /// rejected even though they are valid JSON.
    pub fn from_json(raw: &str) -> Result<Self, ParseError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(ParseError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Number of configured nameservers.
    pub fn nameserver_count(&self) -> usize {
        self.dns_servers.as_ref().map_or(0, Vec::len)
    }

    /// Event log, oldest first. Empty when absent.
    pub fn events(&self) -> &[Event] {
        self.events.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_decodes_to_defaults() {
        let doc = StatusDocument::from_json("{}").unwrap();
        assert_eq!(doc, StatusDocument::default());
        assert_eq!(doc.nameserver_count(), 0);
        assert!(doc.events().is_empty());
    }

    #[test]
    fn null_fields_are_treated_as_absent() {
        let doc = StatusDocument::from_json(
            r#"{"management":null,"dnsServers":null,"events":null,"fqdn":null}"#,
        )
        .unwrap();
        assert!(doc.management.is_none());
        assert_eq!(doc.nameserver_count(), 0);
        assert!(doc.events().is_empty());
        assert!(doc.fqdn.is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let doc = StatusDocument::from_json(
            r#"{"publicKey":"abc","networks":null,"forwardingRules":0,"profileName":"home"}"#,
        )
        .unwrap();
        assert_eq!(doc, StatusDocument::default());
    }

    #[test]
    fn camel_case_fields_decode() {
        let doc = StatusDocument::from_json(
            r#"{
                "daemonVersion": "0.60.9",
                "netbirdIp": "100.64.0.7/16",
                "usesKernelInterface": true,
                "lazyConnectionEnabled": false,
                "sshServer": {"enabled": true, "sessions": []},
                "dnsServers": [{"servers": ["1.1.1.1"]}, {"servers": []}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.daemon_version.as_deref(), Some("0.60.9"));
        assert_eq!(doc.netbird_ip.as_deref(), Some("100.64.0.7/16"));
        assert_eq!(doc.uses_kernel_interface, Some(true));
        assert_eq!(doc.lazy_connection_enabled, Some(false));
        assert_eq!(doc.ssh_server.unwrap().enabled, Some(true));
        assert_eq!(doc.dns_servers.map(|d| d.len()), Some(2));
    }

    #[test]
    fn event_metadata_decodes() {
        let doc = StatusDocument::from_json(
            r#"{"events":[{"userMessage":"Exit node connected.","metadata":{"id":"Exit Node (Hinemoa)"}}]}"#,
        )
        .unwrap();
        let event = &doc.events()[0];
        assert_eq!(event.user_message.as_deref(), Some("Exit node connected."));
        assert_eq!(
            event.metadata.as_ref().and_then(|m| m.id.as_deref()),
            Some("Exit Node (Hinemoa)")
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = StatusDocument::from_json("{\"management\":").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(matches!(
            StatusDocument::from_json("[]"),
            Err(ParseError::NotAnObject)
        ));
        assert!(matches!(
            StatusDocument::from_json("42"),
            Err(ParseError::NotAnObject)
        ));
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        let err = StatusDocument::from_json(r#"{"management":{"connected":"yes"}}"#).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }
}

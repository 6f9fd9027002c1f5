//! Tray handle, events, and update types.
//!
//! The actual system tray drawing depends on platform-specific libraries.
//! This module defines the channel-based interface that the controller uses
//! to communicate with the tray, independent of the GUI backend.

use std::path::PathBuf;
use std::sync::mpsc;

use crate::menu::{MenuAction, MenuState};

/// Configuration for the system tray.
#[derive(Debug, Clone)]
pub struct TrayConfig {
    /// Application display name shown in the tray tooltip.
    pub app_name: String,
    /// Icon shown while management is connected.
    pub connected_icon: PathBuf,
    /// Icon shown otherwise.
    pub disconnected_icon: PathBuf,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            app_name: "Netbird Manager".into(),
            connected_icon: PathBuf::from("netbird.png"),
            disconnected_icon: PathBuf::from("netbird-grey.png"),
        }
    }
}

/// Which of the two tray icons is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIcon {
    Connected,
    Disconnected,
}

impl TrayIcon {
    pub fn from_connected(connected: bool) -> Self {
        if connected {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }

    /// Image file for this icon under `config`.
    pub fn path<'a>(&self, config: &'a TrayConfig) -> &'a PathBuf {
        match self {
            Self::Connected => &config.connected_icon,
            Self::Disconnected => &config.disconnected_icon,
        }
    }
}

/// Events emitted by the tray to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayEvent {
    /// User clicked "Show Status".
    ShowStatus,
    /// User pressed "Refresh" in the status panel.
    RefreshStatus,
    /// User clicked "Connect: {profile}".
    Connect(String),
    /// User clicked "Disconnect".
    Disconnect,
    /// User clicked "Quit" in the context menu.
    QuitRequested,
}

impl From<MenuAction> for TrayEvent {
    fn from(action: MenuAction) -> Self {
        match action {
            MenuAction::ShowStatus => Self::ShowStatus,
            MenuAction::Connect(profile) => Self::Connect(profile),
            MenuAction::Disconnect => Self::Disconnect,
            MenuAction::Quit => Self::QuitRequested,
        }
    }
}

/// Updates sent from the controller to the tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayUpdate {
    /// Switch the tray icon and tooltip.
    IconChanged { icon: TrayIcon, tooltip: String },
    /// Rebuild the "Connect:" entries.
    ProfilesChanged(Vec<String>),
    /// Replace the text of the status panel.
    StatusText(String),
    /// Request tray shutdown.
    Shutdown,
}

/// Handle for communicating with the system tray from the controller.
///
/// The tray event loop runs on the main thread and communicates via
/// channels.
pub struct TrayHandle {
    /// Send updates to the tray.
    update_tx: mpsc::Sender<TrayUpdate>,
    /// Receive events from the tray.
    event_rx: mpsc::Receiver<TrayEvent>,
    /// Current menu state (for tracking).
    state: MenuState,
    icon: TrayIcon,
}

impl TrayHandle {
    /// Creates a new tray handle with its channel pair.
    ///
    /// Returns `(handle, event_sender, update_receiver)`; the sender/receiver
    /// pair is given to the tray event loop running on the main thread.
    pub fn new(config: TrayConfig) -> (Self, mpsc::Sender<TrayEvent>, mpsc::Receiver<TrayUpdate>) {
        let (update_tx, update_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let handle = Self {
            update_tx,
            event_rx,
            state: MenuState {
                app_name: config.app_name,
                connected: false,
                profiles: Vec::new(),
            },
            icon: TrayIcon::Disconnected,
        };

        (handle, event_tx, update_rx)
    }

    fn send(&self, update: TrayUpdate) {
        if self.update_tx.send(update).is_err() {
            tracing::debug!("tray update dropped, tray loop is gone");
        }
    }

    /// Switches the icon and tooltip.
    pub fn set_icon(&mut self, icon: TrayIcon, tooltip: impl Into<String>) {
        self.icon = icon;
        self.state.connected = icon == TrayIcon::Connected;
        self.send(TrayUpdate::IconChanged {
            icon,
            tooltip: tooltip.into(),
        });
    }

    /// Replaces the profile list shown in the menu.
    pub fn set_profiles(&mut self, profiles: Vec<String>) {
        self.state.profiles = profiles.clone();
        self.send(TrayUpdate::ProfilesChanged(profiles));
    }

    /// Replaces the status panel text.
    pub fn show_status_text(&self, text: impl Into<String>) {
        self.send(TrayUpdate::StatusText(text.into()));
    }

    /// Requests the tray to shut down.
    pub fn shutdown(&self) {
        self.send(TrayUpdate::Shutdown);
    }

    /// Tries to receive a tray event (non-blocking).
    pub fn try_recv_event(&self) -> Option<TrayEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Returns the current menu state.
    pub fn state(&self) -> &MenuState {
        &self.state
    }

    /// Returns the icon currently shown.
    pub fn icon(&self) -> TrayIcon {
        self.icon
    }
}

//! System tray interface for the NetBird manager.
//!
//! Provides the tray's context menu model, icon state, and the channel pair
//! that connects the manager's controller to whatever draws the tray:
//! - [`TrayEvent`] — events from tray to controller (menu clicks)
//! - [`TrayUpdate`] — updates from controller to tray (icon, profiles, status text)
//!
//! # Platform notes
//! - Linux: StatusNotifierItem via the desktop's tray host (Waybar, KDE, ...)
//! - The tray event loop must run on the main thread on some platforms

mod menu;
mod tray;

pub use menu::{MenuAction, MenuItem, MenuState};
pub use tray::{TrayConfig, TrayEvent, TrayHandle, TrayIcon, TrayUpdate};

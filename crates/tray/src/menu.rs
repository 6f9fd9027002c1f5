//! Dynamic context menu for the system tray.

/// Actions that can be triggered from the tray context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Open the status panel.
    ShowStatus,
    /// Bring the tunnel up with the named profile.
    Connect(String),
    /// Bring the tunnel down.
    Disconnect,
    /// User requested to quit the application.
    Quit,
}

/// A single menu item.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Display text.
    pub label: String,
    /// Whether the item is enabled (clickable).
    pub enabled: bool,
    /// Optional action triggered on click.
    pub action: Option<MenuAction>,
}

impl MenuItem {
    fn action(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            enabled: true,
            action: Some(action),
        }
    }

    // Separator (represented as disabled empty item).
    fn separator() -> Self {
        Self {
            label: String::new(),
            enabled: false,
            action: None,
        }
    }

    /// Returns `true` for separator entries.
    pub fn is_separator(&self) -> bool {
        self.label.is_empty() && self.action.is_none()
    }
}

/// Current state used to build the context menu.
#[derive(Debug, Clone)]
pub struct MenuState {
    /// Application display name.
    pub app_name: String,
    /// Whether the management connection is up.
    pub connected: bool,
    /// Profiles offered as "Connect:" entries, in CLI order.
    pub profiles: Vec<String>,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            app_name: "Netbird Manager".into(),
            connected: false,
            profiles: Vec::new(),
        }
    }
}

impl MenuState {
    /// Builds the menu items from the current state.
    pub fn build_menu(&self) -> Vec<MenuItem> {
        let mut items = vec![
            MenuItem::action("Show Status", MenuAction::ShowStatus),
            MenuItem::separator(),
        ];

        for profile in &self.profiles {
            items.push(MenuItem::action(
                format!("Connect: {profile}"),
                MenuAction::Connect(profile.clone()),
            ));
        }

        items.push(MenuItem::separator());
        items.push(MenuItem::action("Disconnect", MenuAction::Disconnect));
        items.push(MenuItem::separator());
        items.push(MenuItem::action("Quit", MenuAction::Quit));

        items
    }
}

//! Tray controller: wires the netbird CLI, the status interpreter, the
//! notifier, and the tray together.

use std::time::Duration;

use netbird_manager_client::{FetchError, NetbirdCli, detect_os_info};
use netbird_manager_notify::{Notifier, NotifyQueue};
use netbird_manager_status::{StatusDocument, derive_connectivity, interpret, render_error};
use netbird_manager_tray::{TrayConfig, TrayEvent, TrayHandle, TrayIcon, TrayUpdate};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::console::spawn_console;
use crate::jobs::{BusyFlag, JobRunner};

/// How often the tray event channel is polled.
const TRAY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// User-triggered tunnel actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Connect(String),
    Disconnect,
}

impl Action {
    /// Notification shown when the action starts.
    fn progress_message(&self) -> String {
        match self {
            Self::Connect(profile) => format!("Connecting to {profile} profile..."),
            Self::Disconnect => "Disconnecting...".into(),
        }
    }

    /// Notification shown when the action succeeds.
    fn success_message(&self) -> String {
        match self {
            Self::Connect(profile) => format!("Connected to {profile}"),
            Self::Disconnect => "Disconnected".into(),
        }
    }
}

/// Results delivered from background jobs to the controller loop.
#[derive(Debug)]
pub enum Outcome {
    /// Raw result of the periodic status query.
    Connectivity(Result<String, FetchError>),
    /// Rendered text for the status panel.
    Report(String),
    /// A connect/disconnect finished.
    ActionFinished {
        action: Action,
        result: Result<(), FetchError>,
    },
}

/// Maps a status query result to the tray icon and tooltip.
pub fn icon_for(result: &Result<String, FetchError>) -> (TrayIcon, &'static str) {
    let raw = match result {
        Ok(raw) => raw,
        Err(_) => return (TrayIcon::Disconnected, "Netbird Status Unknown"),
    };
    match StatusDocument::from_json(raw) {
        Ok(doc) if derive_connectivity(&doc) => (TrayIcon::Connected, "Netbird Connected"),
        Ok(_) => (TrayIcon::Disconnected, "Netbird Disconnected"),
        Err(_) => (TrayIcon::Disconnected, "Netbird Status Error"),
    }
}

/// Fetches the status and renders the panel text, or an error line.
pub async fn render_status(cli: &NetbirdCli, os_info: &str) -> String {
    let raw = match cli.status_json().await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("error getting status: {e}");
            return render_error(&e);
        }
    };
    match interpret(&raw, os_info) {
        Ok(report) => report.render(),
        Err(e) => {
            tracing::warn!("error parsing status: {e}");
            render_error(&e)
        }
    }
}

/// Long-lived controller owning all cross-job state.
pub struct Controller {
    status_cli: NetbirdCli,
    action_cli: NetbirdCli,
    os_info: String,
    notifier: NotifyQueue,
    tray: TrayHandle,
    jobs: JobRunner,
    refreshing: BusyFlag,
    reporting: BusyFlag,
    outcome_tx: mpsc::UnboundedSender<Outcome>,
    outcome_rx: mpsc::UnboundedReceiver<Outcome>,
}

impl Controller {
    pub fn new(config: &Config, tray: TrayHandle) -> Self {
        Self::with_notifier(config, tray, Notifier::new(&config.app_name))
    }

    /// Creates a controller delivering notifications through `notifier`.
    ///
    /// Must be called within a tokio runtime.
    pub fn with_notifier(config: &Config, tray: TrayHandle, notifier: Notifier) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            status_cli: NetbirdCli::new(&config.netbird_binary, config.status_timeout()),
            action_cli: NetbirdCli::new(&config.netbird_binary, config.action_timeout()),
            os_info: detect_os_info(),
            notifier: notifier.spawn(),
            tray,
            jobs: JobRunner::new(config.max_jobs),
            refreshing: BusyFlag::default(),
            reporting: BusyFlag::default(),
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn tray(&self) -> &TrayHandle {
        &self.tray
    }

    /// Loads the profile list into the menu. Failures leave it empty.
    pub async fn load_profiles(&mut self) {
        match self.status_cli.profiles().await {
            Ok(profiles) => {
                tracing::info!(count = profiles.len(), "profiles loaded");
                self.tray.set_profiles(profiles);
            }
            Err(e) => {
                tracing::warn!("error fetching profiles: {e}");
                self.tray.set_profiles(Vec::new());
            }
        }
    }

    /// Starts a background status query unless one is already running.
    pub fn request_refresh(&self) -> bool {
        let Some(guard) = self.refreshing.try_acquire() else {
            tracing::debug!("status refresh already in flight, skipping");
            return false;
        };
        let cli = self.status_cli.clone();
        let tx = self.outcome_tx.clone();
        self.jobs.spawn(async move {
            let _guard = guard;
            let result = cli.status_json().await;
            let _ = tx.send(Outcome::Connectivity(result));
        });
        true
    }

    /// Starts a background fetch of the status panel text unless one is
    /// already running.
    pub fn request_report(&self) -> bool {
        let Some(guard) = self.reporting.try_acquire() else {
            tracing::debug!("status report already in flight, skipping");
            return false;
        };
        let cli = self.status_cli.clone();
        let os_info = self.os_info.clone();
        let tx = self.outcome_tx.clone();
        self.jobs.spawn(async move {
            let _guard = guard;
            let text = render_status(&cli, &os_info).await;
            let _ = tx.send(Outcome::Report(text));
        });
        true
    }

    /// Announces and starts a connect/disconnect in the background.
    pub fn start_action(&self, action: Action) {
        tracing::info!(?action, "starting action");
        self.notifier.send("Netbird", action.progress_message(), false);

        let cli = self.action_cli.clone();
        let tx = self.outcome_tx.clone();
        self.jobs.spawn(async move {
            let result = match &action {
                Action::Connect(profile) => cli.up(profile).await,
                Action::Disconnect => cli.down().await,
            };
            let _ = tx.send(Outcome::ActionFinished { action, result });
        });
    }

    /// Applies a background result to the tray and notifications.
    pub fn handle_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Connectivity(result) => {
                if let Err(e) = &result {
                    tracing::warn!("error getting status: {e}");
                }
                let (icon, tooltip) = icon_for(&result);
                tracing::info!(?icon, tooltip, "status refreshed");
                self.tray.set_icon(icon, tooltip);
            }
            Outcome::Report(text) => self.tray.show_status_text(text),
            Outcome::ActionFinished { action, result } => match result {
                Ok(()) => {
                    tracing::info!(?action, "action succeeded");
                    self.notifier.send("Netbird", action.success_message(), true);
                    self.request_refresh();
                }
                Err(e) => {
                    tracing::error!(?action, "action failed: {e}");
                    self.notifier.send("Netbird Error", format!("Error: {e}"), true);
                }
            },
        }
    }

    /// Handles a tray event. Returns `false` when the user asked to quit.
    pub fn handle_event(&self, event: TrayEvent) -> bool {
        match event {
            TrayEvent::ShowStatus | TrayEvent::RefreshStatus => {
                self.request_report();
            }
            TrayEvent::Connect(profile) => self.start_action(Action::Connect(profile)),
            TrayEvent::Disconnect => self.start_action(Action::Disconnect),
            TrayEvent::QuitRequested => return false,
        }
        true
    }

    /// Waits for the next background result.
    pub async fn next_outcome(&mut self) -> Option<Outcome> {
        self.outcome_rx.recv().await
    }

    /// Closes the tray and waits for queued notifications.
    pub async fn shutdown(self) {
        self.tray.shutdown();
        self.notifier.shutdown().await;
    }
}

/// Logs tray updates; stands in for a drawing backend.
fn spawn_log_backend(update_rx: std::sync::mpsc::Receiver<TrayUpdate>) {
    std::thread::spawn(move || {
        while let Ok(update) = update_rx.recv() {
            match update {
                TrayUpdate::IconChanged { icon, tooltip } => {
                    tracing::info!(?icon, %tooltip, "tray icon");
                }
                TrayUpdate::ProfilesChanged(profiles) => {
                    tracing::info!(?profiles, "tray profiles");
                }
                TrayUpdate::StatusText(text) => {
                    tracing::info!("status:\n{text}");
                }
                TrayUpdate::Shutdown => break,
            }
        }
    });
}

/// Runs the tray controller until shutdown is requested.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    // -- Tray --
    let tray_config = TrayConfig {
        app_name: config.app_name.clone(),
        connected_icon: config.connected_icon.clone(),
        disconnected_icon: config.disconnected_icon.clone(),
    };
    let (tray_handle, event_tx, update_rx) = TrayHandle::new(tray_config);
    spawn_log_backend(update_rx);
    spawn_console(event_tx);

    // -- SIGINT --
    let sigint_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("SIGINT received, shutting down");
            sigint_cancel.cancel();
        }
    });

    let mut controller = Controller::new(&config, tray_handle);
    controller.load_profiles().await;
    controller.request_refresh();

    tracing::info!(
        interval_sec = config.refresh_interval().as_secs(),
        "manager ready"
    );

    run_loop(&mut controller, config.refresh_interval(), cancel).await;

    // -- Graceful shutdown --
    controller.shutdown().await;

    Ok(())
}

/// Drives the controller until `cancel` fires or a quit event arrives.
pub async fn run_loop(
    controller: &mut Controller,
    refresh_interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(refresh_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // Skip the first immediate tick.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("shutdown signal received");
                break;
            }
            _ = ticker.tick() => {
                controller.request_refresh();
            }
            Some(outcome) = controller.next_outcome() => {
                controller.handle_outcome(outcome);
            }
            _ = tokio::time::sleep(TRAY_POLL_INTERVAL) => {
                let mut quit = false;
                while let Some(event) = controller.tray().try_recv_event() {
                    if !controller.handle_event(event) {
                        quit = true;
                        break;
                    }
                }
                if quit {
                    tracing::info!("quit requested via tray");
                    cancel.cancel();
                }
            }
        }
    }
}

//! Desktop notifications for the NetBird manager.
//!
//! Notifications go through `notify-send -p`, which prints the id of the
//! notification it created. The [`Notifier`] keeps the last id so a
//! follow-up ("Connected to work") can replace the progress message
//! ("Connecting to work profile...") instead of stacking a second bubble.
//!
//! [`Notifier::spawn`] moves the notifier onto its own task so callers can
//! queue notifications without waiting for `notify-send`.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Binary used to deliver notifications.
pub const NOTIFY_SEND: &str = "notify-send";

/// Upper bound for a single `notify-send` call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors produced while delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("failed to run notify-send: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("notify-send failed: {0}")]
    Failed(String),

    #[error("notify-send timed out after {0:?}")]
    Timeout(Duration),
}

/// Sends notifications and remembers the last notification id.
#[derive(Debug, Clone)]
pub struct Notifier {
    program: String,
    leading_args: Vec<String>,
    app_name: String,
    timeout: Duration,
    current_id: Option<String>,
}

impl Notifier {
    /// Creates a notifier that tags notifications with `app_name`.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self::with_program(NOTIFY_SEND, app_name)
    }

    /// Creates a notifier that runs `program` instead of `notify-send`.
    pub fn with_program(program: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self::with_command(program, Vec::new(), app_name)
    }

    /// Creates a notifier that runs `program` with `leading_args` placed
    /// before the `notify-send` arguments.
    pub fn with_command(
        program: impl Into<String>,
        leading_args: Vec<String>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            leading_args,
            app_name: app_name.into(),
            timeout: DEFAULT_TIMEOUT,
            current_id: None,
        }
    }

    /// Sets the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Id of the last notification shown, if any.
    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    /// Shows a notification.
    ///
    /// With `replace`, the previous notification (if any) is replaced.
    /// A call that outlives the timeout is killed.
    pub async fn show(
        &mut self,
        title: &str,
        message: &str,
        replace: bool,
    ) -> Result<(), NotifyError> {
        let args = self.build_args(title, message, replace);
        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, output)
            .await
            .map_err(|_| NotifyError::Timeout(self.timeout))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(NotifyError::Failed(stderr));
        }

        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::debug!(%id, title, "notification shown");
        self.current_id = (!id.is_empty()).then_some(id);
        Ok(())
    }

    /// Moves the notifier onto a background task that shows queued
    /// notifications in order.
    pub fn spawn(mut self) -> NotifyQueue {
        let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();
        let task = tokio::spawn(async move {
            while let Some(n) = rx.recv().await {
                if let Err(e) = self.show(&n.title, &n.message, n.replace).await {
                    tracing::warn!(title = %n.title, "error showing notification: {e}");
                }
            }
            self
        });
        NotifyQueue { tx, task }
    }

    /// Arguments passed to `notify-send`.
    fn build_args(&self, title: &str, message: &str, replace: bool) -> Vec<String> {
        let mut args = vec!["-a".to_string(), self.app_name.clone(), "-p".to_string()];
        if replace && let Some(id) = &self.current_id {
            args.push("-r".into());
            args.push(id.clone());
        }
        args.push(title.into());
        args.push(message.into());
        args
    }
}

/// A queued notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub replace: bool,
}

/// Handle to a notifier running on its own task.
pub struct NotifyQueue {
    tx: mpsc::UnboundedSender<Notification>,
    task: JoinHandle<Notifier>,
}

impl NotifyQueue {
    /// Queues a notification; returns immediately.
    pub fn send(&self, title: impl Into<String>, message: impl Into<String>, replace: bool) {
        let notification = Notification {
            title: title.into(),
            message: message.into(),
            replace,
        };
        if self.tx.send(notification).is_err() {
            tracing::debug!("notification dropped, notifier task is gone");
        }
    }

    /// Waits for queued notifications to be shown and returns the notifier.
    pub async fn shutdown(self) -> Option<Notifier> {
        drop(self.tx);
        self.task.await.ok()
    }
}

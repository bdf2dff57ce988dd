// SPDX-License-Identifier: MPL-2.0
//! A single toast: severity, message key and English text.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Severity level determines how long a toast stays up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// 3 seconds.
    Success,
    /// 5 seconds.
    Warning,
    /// Stays until dismissed.
    Error,
}

impl Severity {
    /// Returns `None` for errors (manual dismiss required).
    #[must_use]
    pub fn auto_dismiss_after(self) -> Option<Duration> {
        match self {
            Severity::Success => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

fn template(key: &str) -> Option<&'static str> {
    Some(match key {
        "notification-folders-load-error" => "Failed to load folders",
        "notification-images-load-error" => "Failed to load images.",
        "notification-image-deleted" => "Image deleted",
        "notification-delete-error" => "Failed to delete image: {error}",
        "notification-download-fallback" => "Download failed, opening the image directly: {url}",
        "error-api-transport" => "The gallery server could not be reached",
        "error-api-status" => "The gallery server returned an error",
        "error-api-malformed" => "The gallery server sent an unexpected response",
        "notification-config-load-error" => "Settings could not be read; defaults are in use",
        "notification-config-save-error" => "Settings could not be saved",
        "notification-state-parse-error" | "notification-state-read-error" => {
            "Window positions could not be read"
        }
        "notification-state-write-error" | "notification-state-create-error" => {
            "Window positions could not be saved"
        }
        "notification-state-path-error" => "No data directory is available for window positions",
        "notification-state-dir-error" => "The data directory could not be created",
        _ => return None,
    })
}

/// A toast shown to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    key: String,
    args: Vec<(String, String)>,
    created_at: Instant,
}

impl Notification {
    fn new(severity: Severity, key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            severity,
            key: key.into(),
            args: Vec::new(),
            created_at: Instant::now(),
        }
    }

    pub fn success(key: impl Into<String>) -> Self {
        Self::new(Severity::Success, key)
    }

    pub fn warning(key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, key)
    }

    pub fn error(key: impl Into<String>) -> Self {
        Self::new(Severity::Error, key)
    }

    /// Fills the `{name}` placeholder of the message.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.key
    }

    /// Displayable English text. Unknown keys are shown as-is.
    #[must_use]
    pub fn text(&self) -> String {
        let Some(template) = template(&self.key) else {
            return self.key.clone();
        };
        self.args
            .iter()
            .fold(template.to_string(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }

    /// Whether the toast has been up longer than its severity allows at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.severity
            .auto_dismiss_after()
            .is_some_and(|after| now.saturating_duration_since(self.created_at) >= after)
    }
}

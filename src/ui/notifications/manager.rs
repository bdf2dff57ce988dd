// SPDX-License-Identifier: MPL-2.0
//! Toast queue of the gallery.
//!
//! At most three toasts are visible; the rest wait in arrival order and move
//! up as visible ones expire or are dismissed.

use super::notification::{Notification, NotificationId, Severity};
use std::collections::VecDeque;
use std::time::Instant;

const MAX_VISIBLE: usize = 3;

/// Keys cleared once a listing succeeds.
const LOAD_ERROR_KEYS: [&str; 2] = [
    "notification-folders-load-error",
    "notification-images-load-error",
];

/// Input from the host's toast layer.
#[derive(Debug, Clone)]
pub enum Message {
    /// Close button clicked.
    Dismiss(NotificationId),
    /// Periodic timer; expires toasts created before `now` minus their lifetime.
    Tick(Instant),
}

#[derive(Debug, Default)]
pub struct Manager {
    visible: Vec<Notification>,
    queue: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `notification`, or queues it while three toasts are up.
    /// Warnings and errors are logged as well.
    pub fn push(&mut self, notification: Notification) {
        match notification.severity() {
            Severity::Warning => log::warn!("{}", notification.text()),
            Severity::Error => log::error!("{}", notification.text()),
            Severity::Success => {}
        }
        self.queue.push_back(notification);
        self.promote();
    }

    pub fn handle_message(&mut self, message: &Message) {
        match *message {
            Message::Dismiss(id) => self.dismiss(id),
            Message::Tick(now) => self.retain(|n| !n.is_expired(now)),
        }
    }

    pub fn dismiss(&mut self, id: NotificationId) {
        self.retain(|n| n.id() != id);
    }

    /// Drops listing errors once a listing has succeeded.
    pub fn clear_load_errors(&mut self) {
        self.retain(|n| !LOAD_ERROR_KEYS.contains(&n.message_key()));
    }

    /// Toasts to draw, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    /// Whether any visible or queued toast uses `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.visible
            .iter()
            .chain(&self.queue)
            .any(|n| n.message_key() == key)
    }

    fn retain(&mut self, keep: impl Fn(&Notification) -> bool) {
        self.visible.retain(&keep);
        self.queue.retain(&keep);
        self.promote();
    }

    fn promote(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            let Some(next) = self.queue.pop_front() else {
                break;
            };
            self.visible.push(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn visible_keys(manager: &Manager) -> Vec<&str> {
        manager.visible().map(Notification::message_key).collect()
    }

    #[test]
    fn successful_listing_clears_load_errors_and_promotes_queue() {
        let mut manager = Manager::new();
        manager.push(Notification::error("notification-folders-load-error"));
        manager.push(Notification::error("notification-images-load-error"));
        manager.push(Notification::error("notification-delete-error"));
        manager.push(Notification::success("notification-image-deleted"));
        assert!(!visible_keys(&manager).contains(&"notification-image-deleted"));

        manager.clear_load_errors();

        assert_eq!(
            visible_keys(&manager),
            ["notification-delete-error", "notification-image-deleted"]
        );
        assert!(!manager.contains_key("notification-images-load-error"));
    }

    #[test]
    fn delete_error_stays_until_dismissed() {
        let mut manager = Manager::new();
        let failed = Notification::error("notification-delete-error").with_arg("error", "HTTP 500");
        let id = failed.id();
        manager.push(failed);
        manager.push(Notification::warning("notification-download-fallback"));

        let much_later = Instant::now() + Duration::from_secs(600);
        manager.handle_message(&Message::Tick(much_later));
        assert_eq!(visible_keys(&manager), ["notification-delete-error"]);

        manager.handle_message(&Message::Dismiss(id));
        assert!(!manager.has_notifications());
    }

    #[test]
    fn fourth_toast_waits_for_a_free_slot() {
        let mut manager = Manager::new();
        for _ in 0..3 {
            manager.push(Notification::error("notification-images-load-error"));
        }
        let deleted = Notification::success("notification-image-deleted");
        manager.push(deleted);
        assert_eq!(manager.visible().count(), 3);
        assert!(manager.contains_key("notification-image-deleted"));

        let first = manager.visible().next().map(Notification::id).expect("visible toast");
        manager.dismiss(first);

        assert_eq!(manager.visible().count(), 3);
        assert!(visible_keys(&manager).contains(&"notification-image-deleted"));
    }

    #[test]
    fn tick_before_lifetime_keeps_success_toast() {
        let mut manager = Manager::new();
        manager.push(Notification::success("notification-image-deleted"));

        manager.handle_message(&Message::Tick(Instant::now()));
        assert!(manager.contains_key("notification-image-deleted"));

        manager.handle_message(&Message::Tick(Instant::now() + Duration::from_secs(3)));
        assert!(!manager.has_notifications());
    }
}

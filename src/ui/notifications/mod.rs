// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Toasts report deletes, listing failures and download fallbacks without
//! blocking interaction. The host draws [`Manager::visible`] and forwards
//! timer ticks and close clicks as [`NotificationMessage`]s.
//!
//! Success toasts last 3s, warnings 5s, errors stay until dismissed.

mod manager;
mod notification;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};

//! Notification hand-off.
//!
//! The server does not deliver push notifications itself; it passes them to
//! a [`Notifier`]. The default one writes them to the log.

use atlas_core::Notification;

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Writes every notification to the log at warn level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        log::warn!("{}: {}", notification.title, notification.body);
    }
}

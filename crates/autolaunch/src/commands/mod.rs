pub mod autostart;
pub mod doctor;
pub mod init;
pub mod run;

use autolaunch_core::{Notifier, log_warn};

/// Shows a notification, logging instead of failing when it can't.
fn notify(notifier: &dyn Notifier, title: &str, message: &str) {
    if let Err(e) = notifier.notify(title, message) {
        eprintln!("Error showing notification: {e}");
        log_warn!("{e}");
    }
}

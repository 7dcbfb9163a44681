use crate::error::NotifyError;

/// Shows transient user-facing status messages (toasts).
///
/// Delivery is best-effort: callers log failures and move on.
pub trait Notifier {
    fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError>;
}

/// A notifier that discards every message.
///
/// Used when notifications are disabled and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

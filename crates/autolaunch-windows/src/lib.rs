/// Autostart entries in the HKCU Run registry key.
pub mod autostart;

/// Detached process creation.
pub mod process;

/// WinRT toast notifications.
pub mod toast;

pub use autostart::RegistryStore;
pub use process::DetachedSpawner;
pub use toast::ToastNotifier;

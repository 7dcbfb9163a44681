use std::path::Path;

use autolaunch_core::{Launcher, Notifier, RunOutcome, log_info};
use autolaunch_windows::DetachedSpawner;

/// Launches the programs listed in `config`.
///
/// Always returns normally: failed launches and a missing program list
/// are reported, not turned into a failing exit code.
pub fn execute(config: &Path, notifier: &dyn Notifier) {
    let spawner = DetachedSpawner;
    let launcher = Launcher::new(config, notifier, &spawner);

    if let RunOutcome::Completed(summary) = launcher.run() {
        log_info!(
            "run finished: {} launched, {} disabled, {} invalid, {} failed",
            summary.launched,
            summary.disabled,
            summary.invalid,
            summary.failed
        );
    }
}

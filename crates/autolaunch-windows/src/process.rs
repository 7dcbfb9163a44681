use std::process::{Command, Stdio};

use autolaunch_core::{LaunchError, Spawner};

/// Windows process creation flags for launched programs.
///
/// `CREATE_NEW_PROCESS_GROUP` (0x200): Ctrl+C in the launcher's console
/// does not reach the child.
///
/// `DETACHED_PROCESS` (0x8): the child does not inherit the launcher's
/// console, so it keeps running after the launcher exits.
///
/// Startup entries are nearly always GUI programs, which ignore both flags'
/// console effects. A console program in the list runs without a console
/// window; `CREATE_NEW_CONSOLE` is not used because the null stdio handles
/// below would leave that window blank anyway.
#[cfg_attr(not(windows), allow(dead_code))]
const DETACH_FLAGS: u32 = DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP;

#[cfg_attr(not(windows), allow(dead_code))]
const DETACHED_PROCESS: u32 = 0x00000008;
#[cfg_attr(not(windows), allow(dead_code))]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x00000200;

/// Starts programs as detached processes and forgets about them.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedSpawner;

impl Spawner for DetachedSpawner {
    fn spawn(&self, path: &str) -> Result<(), LaunchError> {
        let mut command = Command::new(path);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(DETACH_FLAGS);
        }

        let mut child = command
            .spawn()
            .map_err(|e| LaunchError::from_io(path, e))?;

        // Acknowledge the child without blocking; its handle is dropped here.
        let _ = child.try_wait();
        Ok(())
    }
}

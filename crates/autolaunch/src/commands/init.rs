use std::path::Path;

use autolaunch_core::program::SAMPLE_CONFIG;
use autolaunch_core::settings;

/// Creates a sample program list at `config` and the settings file at
/// `~/.config/autolaunch/settings.toml`. Existing files are not overwritten.
pub fn execute(config: &Path) {
    let Some(dir) = settings::config_dir() else {
        eprintln!("Error: could not determine home directory.");
        std::process::exit(1);
    };

    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Error: could not create {}: {e}", dir.display());
        std::process::exit(1);
    }

    write_if_missing(&dir.join("settings.toml"), &settings::template());
    write_if_missing(config, SAMPLE_CONFIG);

    println!("\nEdit the program list, then run 'autolaunch register' to launch it at logon.");
}

/// Writes content to a file only if it doesn't already exist.
fn write_if_missing(path: &Path, content: &str) {
    if path.exists() {
        println!("Already exists: {}", path.display());
        return;
    }

    match std::fs::write(path, content) {
        Ok(()) => println!("Created {}", path.display()),
        Err(e) => eprintln!("Error: could not write {}: {e}", path.display()),
    }
}

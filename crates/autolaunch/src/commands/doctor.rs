use std::path::Path;

use autolaunch_core::{APP_NAME, AutostartStore, ProgramDescriptor, read_config, settings};
use autolaunch_windows::RegistryStore;

/// ANSI escape helpers for doctor output.
const OK: &str = "\x1b[32m[ok]\x1b[0m";
const WARN: &str = "\x1b[33m[warn]\x1b[0m";
const FAIL: &str = "\x1b[31m[fail]\x1b[0m";
const SKIP: &str = "\x1b[90m[skip]\x1b[0m";

pub fn execute(config: &Path) {
    println!();
    check_settings_file();
    check_autostart();
    check_programs(config);
    println!();
}

fn check_settings_file() {
    let Some(path) = settings::settings_path() else {
        println!("  {FAIL} Could not determine settings path");
        return;
    };
    match settings::try_load() {
        Ok(Some(_)) => println!("  {OK} settings.toml is valid ({})", path.display()),
        Ok(None) => println!("  {WARN} settings.toml not found (using defaults)"),
        Err(e) => println!("  {FAIL} settings.toml: {e}"),
    }
}

fn check_autostart() {
    match RegistryStore.query(APP_NAME) {
        Ok(Some(command)) => println!("  {OK} Autostart entry registered: {command}"),
        Ok(None) => println!("  {WARN} Autostart entry not registered"),
        Err(e) => println!("  {FAIL} Autostart: {e}"),
    }
}

fn check_programs(config: &Path) {
    let programs = match read_config(config) {
        Ok(programs) => programs,
        Err(e) => {
            println!("  {FAIL} {e}");
            return;
        }
    };
    if programs.is_empty() {
        println!("  {WARN} {} lists no programs", config.display());
        return;
    }
    println!(
        "  {OK} {} is valid ({} programs)",
        config.display(),
        programs.len()
    );
    for program in &programs {
        println!("    {}", describe(program));
    }
}

/// One status line per program.
fn describe(program: &ProgramDescriptor) -> String {
    let name = &program.name;
    if !program.is_enabled() {
        return format!("{SKIP} {name} is disabled");
    }
    let Some(path) = program.resolve_path() else {
        return format!("{FAIL} {name}: path not specified");
    };
    let delay = program.delay;
    if Path::new(&path).is_file() {
        format!("{OK} {name}: {path} (after {delay}s)")
    } else if !path.contains(['\\', '/']) {
        format!("{WARN} {name}: {path} will be looked up on PATH (after {delay}s)")
    } else {
        format!("{WARN} {name}: {path} not found")
    }
}

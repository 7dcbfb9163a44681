mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use autolaunch_core::{DEFAULT_CONFIG_FILE, Notifier, NullNotifier, settings};
use autolaunch_windows::ToastNotifier;

#[derive(Parser)]
#[command(
    name = "autolaunch",
    version,
    about = "Launches your startup programs in order, with delays"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Do not show toast notifications
    #[arg(long, global = true)]
    no_notify: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch every enabled program in the program list
    Run(ConfigArgs),
    /// Run at logon: add an entry to the user's startup list
    Register(ConfigArgs),
    /// Remove the logon entry
    Unregister,
    /// Show whether the logon entry exists
    Status,
    /// Create a sample program list and the settings file
    Init(ConfigArgs),
    /// Check the settings file and the program list
    Doctor(ConfigArgs),
}

#[derive(Args)]
struct ConfigArgs {
    /// Path to the JSON program list
    #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let settings = settings::load();
    autolaunch_core::log::init(&settings.log);

    let notifier: &dyn Notifier = if cli.no_notify || !settings.notifications.enabled {
        &NullNotifier
    } else {
        &ToastNotifier
    };

    match cli.command {
        Commands::Run(args) => commands::run::execute(&args.config, notifier),
        Commands::Register(args) => commands::autostart::register(&args.config, notifier),
        Commands::Unregister => commands::autostart::unregister(notifier),
        Commands::Status => commands::autostart::status(),
        Commands::Init(args) => commands::init::execute(&args.config),
        Commands::Doctor(args) => commands::doctor::execute(&args.config),
    }
}

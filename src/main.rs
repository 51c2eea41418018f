//! Frostline entry point
//!
//! Parses the command line, loads configuration, save data and levels, then
//! runs the game in the terminal.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use frostline::app::App;
use frostline::input::Action;
use frostline::level::load_levels;
use frostline::logging;
use frostline::platform::TerminalBackend;
use frostline::renderer::Assets;
use frostline::sim::Game;
use frostline::{NAME, SaveData, Settings};

#[derive(Debug, Parser)]
#[command(name = NAME, about = "A side-scrolling platformer", disable_version_flag = true)]
struct Cli {
    /// Print the version and exit
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// List the configurable key actions and exit
    #[arg(short = 'l', long = "list-actions")]
    list_actions: bool,

    /// Request a fullscreen surface
    #[arg(short = 'f', long)]
    fullscreen: bool,

    /// Game data directory (levels, tiles, sprites)
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Config file instead of the per-user default
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file instead of the per-user state directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}: {}", NAME, env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    if cli.list_actions {
        for action in Action::CONFIGURABLE {
            println!("{}", action.as_str());
        }
        return Ok(());
    }

    let log_path = cli.log_file.or_else(logging::default_log_path);
    logging::init(log_path.as_deref());
    log::info!("{} {} starting", NAME, env!("CARGO_PKG_VERSION"));

    let mut settings = match cli.config.or_else(Settings::default_path) {
        Some(path) => Settings::load(&path),
        None => {
            log::warn!("No config directory found, using default settings");
            Settings::default()
        }
    };
    settings.fullscreen = cli.fullscreen;
    if settings.fullscreen {
        log::debug!("Terminal backend always uses the whole terminal");
    }

    let save_path = SaveData::default_path();
    let save = save_path
        .as_deref()
        .map(SaveData::load)
        .unwrap_or_default();

    let levels = load_levels(&cli.data_dir.join("levels"));
    if levels.is_empty() {
        bail!(
            "no levels found in {}",
            cli.data_dir.join("levels").display()
        );
    }

    let mut backend = TerminalBackend::new().context("failed to initialise the terminal")?;
    let user_dir = Assets::default_user_dir();
    let assets = Assets::load(&mut backend, &cli.data_dir, user_dir.as_deref());
    let game = Game::new(levels, save.level, settings.split_screen);

    let mut app = App::new(game, assets, settings.keymap);
    let result = app.run(&mut backend);
    // Restore the terminal before reporting anything
    drop(backend);

    match save_path {
        Some(path) => {
            let progress = SaveData {
                level: app.game.progress,
            };
            if let Err(e) = progress.write(&path) {
                log::error!("Failed to save progress: {}", e);
            }
        }
        None => log::warn!("No state directory found, progress not saved"),
    }

    result.context("terminal backend failed")?;
    Ok(())
}

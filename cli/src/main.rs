mod app;
mod config;
mod terminal;

use clap::{Parser, ValueEnum};
use morpion_engine::config::Validate;
use morpion_engine::logger::{self, LogTarget};
use morpion_engine::tictactoe::GameMode;
use morpion_engine::{SessionRng, log};

use config::get_config_manager;
use terminal::Terminal;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Pvp,
    Easy,
    Hard,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Pvp => GameMode::PlayerVsPlayer,
            ModeArg::Easy => GameMode::VersusEasyBot,
            ModeArg::Hard => GameMode::VersusHardBot,
        }
    }
}

#[derive(Parser)]
#[command(name = "morpion", about = "N-in-a-row against a friend or the computer")]
struct Args {
    /// Play a single match in this mode instead of showing the menu
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Seed for the computer players
    #[arg(long)]
    seed: Option<u64>,

    /// Minimax depth on the 3x3 board
    #[arg(long)]
    classic_depth: Option<usize>,

    /// Minimax depth on the 5x5 board
    #[arg(long)]
    large_depth: Option<usize>,

    /// Path to the YAML config file
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Morpion".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, LogTarget::Stderr);

    let config = get_config_manager(args.config.as_deref()).get_config()?;

    let mut settings = config.search;
    if let Some(depth) = args.classic_depth {
        settings.classic_depth = depth;
    }
    if let Some(depth) = args.large_depth {
        settings.large_depth = depth;
    }
    settings.validate()?;

    let mut rng = match args.seed.or(config.seed) {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Session seed {}, search depths {:?}", rng.seed(), settings);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut terminal = Terminal::new(stdin.lock(), stdout.lock());

    match args.mode.map(GameMode::from).or(config.mode) {
        Some(mode) => {
            app::run_match(&mut terminal, mode, &settings, &mut rng)?;
        }
        None => app::run_menu(&mut terminal, &settings, &mut rng)?,
    }

    Ok(())
}

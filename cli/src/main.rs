use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sweeper_core::{ActionOutcome, Level, Session, SessionConfig};
use web_time::{Instant, SystemTime, UNIX_EPOCH};

use command::Command;
use store::JsonScoreStore;

mod command;
mod logger;
mod render;
mod store;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Level to start on: beginner, medium or expert
    #[arg(short, long, default_value = "beginner")]
    level: String,

    /// Custom board side, overrides --level together with --mines
    #[arg(long, requires = "mines")]
    size: Option<u8>,

    /// Mine count of a custom board
    #[arg(long, requires = "size")]
    mines: Option<u16>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Session settings as JSON, missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    lives: Option<u8>,

    #[arg(long)]
    hints: Option<u8>,

    #[arg(long)]
    safe_clicks: Option<u8>,

    /// Keep at most this many undo steps
    #[arg(long)]
    undo_capacity: Option<usize>,

    /// Where best scores are kept
    #[arg(long, default_value = "sweeper-scores.json")]
    scores: PathBuf,
}

impl Args {
    fn session_config(&self) -> anyhow::Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Could not read {}", path.display()))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("Could not parse {}", path.display()))?
            }
            None => SessionConfig::default(),
        };
        if let Some(lives) = self.lives {
            config.lives = lives;
        }
        if let Some(hints) = self.hints {
            config.hints = hints;
        }
        if let Some(safe_clicks) = self.safe_clicks {
            config.safe_clicks = safe_clicks;
        }
        if self.undo_capacity.is_some() {
            config.undo_capacity = self.undo_capacity;
        }
        Ok(config)
    }

    fn level(&self) -> anyhow::Result<Level> {
        match (self.size, self.mines) {
            (Some(size), Some(mines)) => Ok(Level::custom(size, mines)),
            _ => Level::from_key(&self.level)
                .map_err(|err| anyhow::anyhow!("{}: `{}`", err, self.level)),
        }
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |since| since.as_nanos() as u64)
        })
    }
}

fn describe(outcome: ActionOutcome) -> Option<String> {
    use ActionOutcome::*;

    Some(match outcome {
        NoChange | Revealed(_) | Flagged | Unflagged => return None,
        LifeLost { lives_left } => format!("Boom! {} lives left", lives_left),
        Lost => "Game over".into(),
        Won => "You won!".into(),
        ModeEntered(mode) => format!("{:?} mode", mode),
        AnchorSet((x, y)) => format!("Corner set at ({}, {})", x, y),
        Peeking(kind) => format!("{:?} active", kind),
        MinePlaced { remaining } => format!("{} mines to go", remaining),
        LayoutComplete => "Layout complete, game on".into(),
        Exterminated { removed } => format!("{} mines removed", removed),
        Undone => "Undone".into(),
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(log_level) = args.verbose.log_level() {
        logger::init(log_level.to_level_filter())?;
    }

    let seed = args.seed();
    log::debug!("seed: {}", seed);
    let store = JsonScoreStore::open(&args.scores)?;
    let mut session = Session::with_store(args.level()?, args.session_config()?, seed, store);

    println!("{}", command::HELP);
    println!("{}\n{}", render::board(&session), render::status(&session));

    let stdin = io::stdin();
    let mut last_tick = Instant::now();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush().context("Could not flush stdout")?;

        line.clear();
        if stdin.lock().read_line(&mut line).context("Could not read stdin")? == 0 {
            break;
        }

        let now = Instant::now();
        for reversion in session.advance(now - last_tick) {
            log::trace!("Reverted {:?}", reversion);
        }
        last_tick = now;

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };

        let result = match command {
            Command::Reveal(coords) => session.primary_activate(coords),
            Command::Flag(coords) => session.secondary_activate(coords),
            Command::Powerup(powerup) => session.activate_powerup(powerup),
            Command::Undo => session.request_undo(),
            Command::Restart => {
                session.request_restart();
                Ok(ActionOutcome::NoChange)
            }
            Command::Level(key) => session.select_level(&key).map(|()| ActionOutcome::NoChange),
            Command::Show => Ok(ActionOutcome::NoChange),
            Command::Scores => {
                println!("best times in {}:", session.store().path().display());
                for (key, secs) in session.store().scores().iter() {
                    println!("  {:<10} {}s", key, secs);
                }
                continue;
            }
            Command::Help => {
                println!("{}", command::HELP);
                continue;
            }
            Command::Quit => break,
        };

        match result {
            Ok(outcome) => {
                if let Some(message) = describe(outcome) {
                    println!("{}", message);
                }
                if outcome == ActionOutcome::Won {
                    if let Some(best) = session.best_score() {
                        println!("Best time on {}: {}s", session.level().key, best);
                    }
                }
            }
            Err(err) => println!("{}", err),
        }
        println!("{}\n{}", render::board(&session), render::status(&session));
    }

    log::debug!("Bye");
    Ok(())
}

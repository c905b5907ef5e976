//! Gravity Switcher entry point
//!
//! The browser build is driven from JavaScript through `platform::web`.
//! Natively this runs headless demo games with the autopilot and keeps the
//! high score in a JSON file.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;

    use gravity_switcher::highscores::load_high_score;
    use gravity_switcher::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
    use gravity_switcher::sim::{GameEvent, GamePhase, GameSession, autopilot, tick};
    use gravity_switcher::{Settings, Viewport, consts};

    #[derive(Parser, Debug)]
    #[command(
        name = "gravity-switcher",
        about = "Headless Gravity Switcher runs driven by the autopilot"
    )]
    pub struct Cli {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Number of runs to play
        #[arg(long, default_value_t = 1)]
        runs: u32,

        /// Frame limit per run
        #[arg(long, default_value_t = 20_000)]
        max_ticks: u64,

        #[arg(long, default_value_t = consts::DEFAULT_WIDTH)]
        width: f32,

        #[arg(long, default_value_t = consts::DEFAULT_HEIGHT)]
        height: f32,

        /// JSON file for the high score and sprite (in-memory if omitted)
        #[arg(long)]
        store: Option<PathBuf>,
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        env_logger::init();
        let cli = Cli::parse();

        let mut store: Box<dyn KeyValueStore> = match &cli.store {
            Some(path) => Box::new(JsonFileStore::open(path)?),
            None => Box::new(MemoryStore::new()),
        };

        let seed = cli.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
        let settings = Settings::load(&mut *store);
        log::info!("Gravity Switcher (native) seed {seed}, sprite {}", settings.sprite.as_str());

        let viewport = Viewport::new(cli.width, cli.height);
        let mut session = GameSession::new(seed, viewport, load_high_score(&*store));

        for run in 1..=cli.runs {
            session.trigger();
            let mut confetti = 0;

            while session.phase() == GamePhase::Playing && session.frame_count() < cli.max_ticks {
                if autopilot::should_flip(&session) {
                    session.trigger();
                }
                for event in tick(&mut session, &mut store) {
                    if let GameEvent::NewHighScore { .. } = event {
                        confetti += 1;
                    }
                }
            }

            let ended = if session.phase() == GamePhase::GameOver {
                "crashed"
            } else {
                "frame limit"
            };
            println!(
                "run {run}: score {} after {} frames ({ended}), {confetti} new bests, best {}",
                session.score(),
                session.frame_count(),
                session.high_score()
            );

            // Back to the title screen for the next run
            if session.phase() == GamePhase::GameOver {
                session.trigger();
            } else {
                let next_seed = seed.wrapping_add(run as u64);
                session = GameSession::new(next_seed, viewport, load_high_score(&*store));
            }
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}

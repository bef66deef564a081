use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use pacman_grid::config::load_config;
use pacman_grid::constants::{LOOP_TIME, PACMAN_STEP_INTERVAL};
use pacman_grid::events::Input;
use pacman_grid::formatter::{self, CustomFormatter};
use pacman_grid::game::Session;
use pacman_grid::input::{Bindings, Key};
use pacman_grid::render::render;

fn setup_logging() -> Result<()> {
    // Allow RUST_LOG to override levels; default to info for our crate and warn elsewhere
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{name}=info", name = env!("CARGO_CRATE_NAME"))));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(true)
        .event_format(CustomFormatter)
        .with_env_filter(filter)
        .finish()
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).context("Could not set global default subscriber")
}

pub fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging()?;

    let config = load_config().context("Could not read configuration")?;
    info!(?config, "Configuration loaded");

    let bindings = Bindings::default();
    let mut session = Session::new(config);

    let frame_time = LOOP_TIME.as_secs_f32();
    // Every line of input buys one player step worth of frames.
    let frames_per_turn = (PACMAN_STEP_INTERVAL / frame_time).ceil().max(1.0) as u32;
    let idle = Input::idle();

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", render(&session))?;
    stdout.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read from stdin")?;
        let keys = Key::parse_line(&line);
        let input = bindings.sample(session.phase(), session.is_paused(), &keys);

        for frame in 0..frames_per_turn {
            if !session.is_running() {
                break;
            }
            session.update(frame_time, if frame == 0 { &input } else { &idle });
            formatter::advance_frame();
        }

        for event in session.drain_events() {
            debug!(?event, "Game event");
        }

        if !session.is_running() {
            break;
        }
        write!(stdout, "\n{}", render(&session))?;
        stdout.flush()?;
    }

    info!("Exiting");
    Ok(())
}

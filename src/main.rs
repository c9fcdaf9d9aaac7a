//! Code Hop entry point
//!
//! Line-based terminal front end: type `1`, `2` or `3` and Enter to jump,
//! `r` to restart, `q` to quit. Stdin is read on a helper thread; every game
//! mutation happens on the main thread.

use std::io::BufRead;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use code_hop::session::{Generation, PhaseKind};
use code_hop::{Game, Settings};

/// How often the game clock advances while waiting for input
const FRAME: Duration = Duration::from_millis(50);

/// Fields whose change warrants a reprint
type Shown = (Generation, usize, u32, PhaseKind);

fn main() -> code_hop::Result<()> {
    env_logger::init();

    let settings = Settings::load();
    let catalog = settings.catalog()?;
    let mut game = Game::new(catalog, settings)?;

    let (tx, rx) = mpsc::channel::<String>();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    println!("Code Hop: pick the next line of code. 1/2/3 to jump, r to restart, q to quit.");
    let mut shown: Option<Shown> = None;
    let started = Instant::now();

    loop {
        let current = {
            let session = game.session();
            (
                session.generation(),
                session.level_index(),
                session.score(),
                session.phase().kind(),
            )
        };
        if shown != Some(current) {
            let snapshot = game.snapshot()?;
            log::debug!("{}", serde_json::to_string(&snapshot)?);
            println!("{snapshot}");
            shown = Some(current);
        }

        let received = rx.recv_timeout(FRAME);
        // Catch the game clock up to wall time before handling the key
        let elapsed_ms = started.elapsed().as_millis() as u64;
        game.advance(elapsed_ms.saturating_sub(game.clock_ms()))?;

        match received {
            Ok(line) if line.trim().eq_ignore_ascii_case("q") => break,
            Ok(line) => {
                game.press(&line)?;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    let session = game.session();
    println!(
        "Final score: {} of {}",
        session.score(),
        game.catalog().len()
    );
    Ok(())
}

//! Paper Plane headless runner
//!
//! Drives the engine on a simulated 60 Hz clock with a naive autopilot and
//! prints the outcome. Usage: `paper-plane [easy|medium|hard] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use paper_plane::consts::FRAME_MS;
    use paper_plane::{BoardSize, Difficulty, Engine, EngineConfig, GamePhase, HighScore};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let difficulty = match args.next() {
        Some(arg) => match Difficulty::from_str(&arg) {
            Some(d) => d,
            None => {
                eprintln!("Unknown difficulty '{}', expected easy, medium or hard", arg);
                std::process::exit(2);
            }
        },
        None => Difficulty::Easy,
    };

    let mut config = EngineConfig::new(BoardSize::new(800.0, 450.0), difficulty);
    if let Some(seed) = args.next().and_then(|s| s.parse().ok()) {
        config = config.with_seed(seed);
    }

    let high_score = HighScore::default();
    let mut engine = match Engine::new(config, high_score.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    engine.set_game_over_listener(|report| {
        println!(
            "Game over: score {} ({:?}){}",
            report.final_score,
            report.cause,
            if report.new_high_score { " - new high score!" } else { "" }
        );
    });

    log::info!("Paper Plane (headless) starting, seed {}", engine.seed());
    engine.trigger_impulse();

    // Two simulated minutes at most
    let max_frames = 120 * 60;
    for _ in 0..max_frames {
        autopilot(&mut engine);
        engine.advance(FRAME_MS);
        if engine.phase() == GamePhase::Over {
            break;
        }
    }

    match engine.snapshot().to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Snapshot serialization failed: {}", e),
    }
    println!("High score: {}", high_score.get());
}

/// Flap when sinking below the vertical middle of the next unpassed obstacle's gap side
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(engine: &mut paper_plane::Engine) {
    let world = engine.world();
    let board = *engine.board();
    let actor = world.actor;

    // Fly on whichever side of the nearest obstacle has more room
    let target_y = world
        .obstacles
        .iter()
        .find(|o| !o.passed)
        .map(|o| {
            let above = o.pos.y;
            let below = board.height - (o.pos.y + o.height);
            if above > below {
                above / 2.0
            } else {
                o.pos.y + o.height + below / 2.0
            }
        })
        .unwrap_or(board.height / 2.0);

    if actor.center().y > target_y && actor.velocity >= 0.0 {
        engine.trigger_impulse();
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host in this crate; the library is driven by the embedding page
}

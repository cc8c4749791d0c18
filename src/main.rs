//! Cat Stack entry point
//!
//! Headless demo: runs a scripted session at a fixed timestep with the
//! built-in `SimpleBody` backend, logging events and sound cues. Usage:
//!
//! ```text
//! cat-stack [seed] [tuning.json]
//! ```

use glam::Vec2;

use cat_stack::audio::cue_for;
use cat_stack::consts::SIM_DT;
use cat_stack::sim::{tick, Game, GameEvent, GamePhase, PieceVariant, SimpleBody, TickInput};
use cat_stack::GameTuning;

/// Seconds of scripted play
const DEMO_SECONDS: f32 = 30.0;

fn make_body(variant: &PieceVariant, pos: Vec2) -> Option<SimpleBody> {
    Some(SimpleBody::new(pos, variant.half_extents, variant.mass))
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xCA75);
    let tuning = match args.next() {
        Some(path) => GameTuning::load_from(path.as_ref()),
        None => GameTuning::default(),
    };
    log::info!("starting demo run with seed {seed}");

    let mut game = Game::new(&tuning, seed, make_body);
    let mut input = TickInput::default();
    let mut ticks_since_spawn = 0u32;
    let mut steer_right = false;

    let total_ticks = (DEMO_SECONDS / SIM_DT) as u32;
    for _ in 0..total_ticks {
        if game.phase == GamePhase::GameOver {
            break;
        }

        script_input(&mut input, ticks_since_spawn, steer_right);
        ticks_since_spawn = ticks_since_spawn.saturating_add(1);

        // Step the built-in backend and forward floor impacts
        let impact = game
            .current_piece_mut()
            .and_then(|p| p.body_mut().step(SIM_DT));
        if let Some(speed) = impact {
            if let Some(event) = game.report_impact(speed) {
                log_event(&event);
            }
        }

        for event in tick(&mut game, &input, SIM_DT) {
            if event == GameEvent::PieceSpawned {
                ticks_since_spawn = 0;
                steer_right = !steer_right;
                // Land each new piece on top of what has settled so far
                let floor = game.stack_top_y().unwrap_or(0.0);
                if let Some(piece) = game.current_piece_mut() {
                    piece.body_mut().floor_y = floor;
                }
            }
            log_event(&event);
        }

        // One-shot inputs are consumed by the tick
        input.rotate = false;
        input.drop = false;
        input.pause = false;
    }

    println!(
        "run over: score {}, {} pieces stacked",
        game.score(),
        game.stack().len()
    );
}

/// Scripted play: steer for half a second, rotate, then drop and fast-drop.
fn script_input(input: &mut TickInput, ticks_since_spawn: u32, steer_right: bool) {
    let steering = ticks_since_spawn < (0.5 / SIM_DT) as u32;
    input.left = steering && !steer_right;
    input.right = steering && steer_right;
    input.rotate = ticks_since_spawn == (0.6 / SIM_DT) as u32;
    let drop_tick = (0.75 / SIM_DT) as u32;
    input.drop = ticks_since_spawn == drop_tick || ticks_since_spawn == drop_tick + 30;
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::PieceSpawned => log::info!("spawned a new piece"),
        GameEvent::PieceReleased => log::info!("piece released"),
        GameEvent::Thud { speed } => log::info!("impact at {speed:.2} m/s"),
        GameEvent::PieceSettled { points } => log::info!("piece settled for {points} points"),
        GameEvent::GameOver => log::warn!("a piece hit the kill zone"),
    }
    if let Some(cue) = cue_for(event) {
        log::debug!("audio cue: {cue:?}");
    }
}

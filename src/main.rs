//! Flash Anzan entry point
//!
//! Loads settings, generates one drill batch, and drives the sequencer from
//! a fixed-timestep terminal loop, printing each display change.

use std::thread;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use flash_anzan::audio::{AudioSink, TerminalAudio};
use flash_anzan::consts::TICK_DT;
use flash_anzan::drill::{DisplayPayload, DisplayValue, Sequencer, generate_batch};
use flash_anzan::settings::Settings;

fn main() {
    env_logger::init();

    let settings = Settings::load();
    if let Err(err) = settings.validate() {
        eprintln!("Cannot start drill: {err}");
        std::process::exit(1);
    }
    // Round-trip so a fresh install gets a file to edit
    settings.save();

    let seed: u64 = rand::random();
    log::info!(
        "Starting drill: {} problems x {} operands, {} at level {} (seed {seed})",
        settings.problem_count,
        settings.operands_per_problem,
        settings.operation_mode.as_str(),
        settings.level,
    );

    let mut rng = Pcg32::seed_from_u64(seed);
    let batch = generate_batch(&settings, &mut rng);

    let mut audio = TerminalAudio::new(settings.muted);
    let mut sequencer = Sequencer::new();
    sequencer.begin(batch, settings.level);
    let total = sequencer.problem_count();

    let mut last_payload: Option<DisplayPayload> = None;
    let mut last_time = Instant::now();
    loop {
        let now = Instant::now();
        // Clamp dt so a stalled terminal can't fast-forward the drill
        let dt = now.duration_since(last_time).as_secs_f32().min(0.1);
        last_time = now;

        for cue in sequencer.tick(dt) {
            audio.play(cue);
        }

        let payload = sequencer.display();
        if last_payload.as_ref() != Some(&payload) {
            render(&payload, total);
            last_payload = Some(payload);
        }

        if sequencer.is_complete() {
            break;
        }
        thread::sleep(Duration::from_secs_f32(TICK_DT));
    }
}

/// Print one display payload as a terminal line
fn render(payload: &DisplayPayload, total: usize) {
    let counter = format!("[{}/{}]", payload.problem_index + 1, total);
    match payload.value {
        DisplayValue::GetReady => println!("{counter} Get Ready..."),
        DisplayValue::Operand { value, operator: None } => println!("{counter}     {value}"),
        DisplayValue::Operand {
            value,
            operator: Some(op),
        } => println!("{counter}   {} {value}", op.symbol()),
        DisplayValue::Blank => {}
        DisplayValue::Calculating => println!("{counter} Calculating..."),
        DisplayValue::Answer(answer) => println!("{counter}   = {answer}"),
        DisplayValue::Done => println!("Drill complete."),
    }
}

use macroquad::prelude::*;

mod bird;
mod config;
mod evolution;
mod genome;
mod network;
mod pacing;
mod pipe;
mod renderer;
mod save_load;
mod simulation;
mod stats;
mod ui;

use pacing::TickPacer;
use simulation::SimState;
use stats::{GenerationRecord, TrainingStats};

fn window_conf() -> Conf {
    Conf {
        window_title: "AVIARY — Flappy Neuroevolution".to_string(),
        window_width: 1000,
        window_height: 1024,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

struct CliOptions {
    seed: u64,
    tps: f32,
    population: usize,
    resume: bool,
}

impl CliOptions {
    fn parse() -> Self {
        let mut opts = Self {
            seed: 42,
            tps: config::DEFAULT_TPS,
            population: config::POPULATION_SIZE,
            resume: false,
        };

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => match args.next().and_then(|v| v.parse().ok()) {
                    Some(v) => opts.seed = v,
                    None => eprintln!("[AVIARY] --seed expects an integer"),
                },
                "--tps" => match args.next().and_then(|v| v.parse::<f32>().ok()) {
                    Some(v) if v >= 0.0 => opts.tps = v,
                    _ => eprintln!("[AVIARY] --tps expects a non-negative number"),
                },
                "--population" => match args.next().and_then(|v| v.parse::<usize>().ok()) {
                    Some(v) if v > 0 => opts.population = v,
                    _ => eprintln!("[AVIARY] --population expects a positive integer"),
                },
                "--resume" => opts.resume = true,
                other => eprintln!("[AVIARY] Unknown argument: {other}"),
            }
        }
        opts
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let opts = CliOptions::parse();

    let mut saved_best = 0u32;
    let mut sim = if opts.resume {
        match save_load::load_champion(config::CHAMPION_FILE) {
            Ok(champion) => {
                eprintln!(
                    "[AVIARY] Resuming from champion (gen {}, best {})",
                    champion.generation, champion.best_score
                );
                saved_best = champion.best_score;
                SimState::resume(champion.genome, opts.population, opts.seed)
            }
            Err(e) => {
                eprintln!("[AVIARY] Resume failed: {e}; starting fresh");
                SimState::new(opts.population, opts.seed)
            }
        }
    } else {
        SimState::new(opts.population, opts.seed)
    };

    let mut pacer = TickPacer::new(opts.tps);
    let mut stats = TrainingStats::new();

    loop {
        let frame_time = get_frame_time() as f64;

        if !sim.paused {
            for _ in 0..pacer.ticks_to_run(frame_time) {
                sim.tick();

                if let Some(summary) = sim.take_summary() {
                    stats.record(GenerationRecord {
                        generation: summary.generation,
                        best: summary.best,
                        mean: summary.mean,
                        population: summary.population,
                    });

                    if summary.best > saved_best {
                        match save_load::save_champion(
                            config::CHAMPION_FILE,
                            summary.generation,
                            summary.best,
                            &summary.champion,
                        ) {
                            Ok(()) => {
                                saved_best = summary.best;
                                eprintln!(
                                    "[AVIARY] New champion saved (gen {}, best {})",
                                    summary.generation, summary.best
                                );
                            }
                            Err(e) => eprintln!("[AVIARY] Champion save failed: {e}"),
                        }
                    }
                }
            }
        }

        if is_key_pressed(KeyCode::Space) {
            sim.paused = !sim.paused;
        }

        // Export the training report (Ctrl+S)
        if (is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl))
            && is_key_pressed(KeyCode::S)
        {
            match stats.write_report(config::REPORT_FILE) {
                Ok(()) => eprintln!(
                    "[AVIARY] Report written to {} ({} generations)",
                    config::REPORT_FILE,
                    stats.generations()
                ),
                Err(e) => eprintln!("[AVIARY] Report failed: {e}"),
            }
        }

        renderer::draw(&sim, &pacer);
        ui::draw_ui(&mut sim, &mut pacer, &stats);

        next_frame().await;
    }
}

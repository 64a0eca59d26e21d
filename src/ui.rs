use egui;

use crate::pacing::TickPacer;
use crate::simulation::SimState;
use crate::stats::TrainingStats;

/// Draw the trainer control panel.
pub fn draw_ui(sim: &mut SimState, pacer: &mut TickPacer, stats: &TrainingStats) {
    egui_macroquad::ui(|ctx| {
        egui::Window::new("Trainer")
            .default_pos(egui::pos2(10.0, 140.0))
            .default_size(egui::vec2(260.0, 320.0))
            .resizable(true)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let pause_label = if sim.paused { "Play" } else { "Pause" };
                    if ui.button(pause_label).clicked() {
                        sim.paused = !sim.paused;
                    }

                    let mut tps = pacer.tps();
                    ui.add(
                        egui::Slider::new(&mut tps, 0.0..=600.0)
                            .integer()
                            .text("ticks/s"),
                    );
                    if tps != pacer.tps() {
                        pacer.set_tps(tps);
                    }
                });
                ui.label("ticks/s = 0 runs the sim unthrottled");

                ui.separator();
                ui.label(format!("Generation: {}", sim.generation));
                ui.label(format!("Score: {}", sim.score));
                ui.label(format!(
                    "Alive: {} of {}",
                    sim.alives,
                    sim.population.len()
                ));
                ui.label(format!("Best fitness: {}", stats.best_ever()));

                ui.separator();
                ui.heading("Recent generations");
                if stats.generations() == 0 {
                    ui.label("none finished yet");
                }
                for record in stats.recent(10).iter().rev() {
                    ui.label(format!(
                        "gen {:>4}   best {:>7}   mean {:>9.1}",
                        record.generation, record.best, record.mean
                    ));
                }
            });
    });

    egui_macroquad::draw();
}

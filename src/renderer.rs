use macroquad::prelude::*;

use crate::config;
use crate::pacing::{PacingMode, TickPacer};
use crate::simulation::SimState;

const SKY_COLOR: Color = Color::new(0.32, 0.65, 0.82, 1.0);
const HILL_COLOR: Color = Color::new(0.27, 0.58, 0.74, 1.0);
const PIPE_COLOR: Color = Color::new(0.23, 0.68, 0.28, 1.0);
const PIPE_LIP_COLOR: Color = Color::new(0.17, 0.52, 0.21, 1.0);
const BIRD_COLOR: Color = Color::new(1.0, 0.78, 0.0, 1.0);
const BIRD_OUTLINE: Color = Color::new(0.81, 0.62, 0.0, 1.0);

/// Draw the latest committed world state. Pure consumer: reads the sim,
/// never mutates it.
pub fn draw(sim: &SimState, pacer: &TickPacer) {
    clear_background(SKY_COLOR);

    // Map playfield coordinates (y down, origin top-left) onto the window.
    let cam = Camera2D::from_display_rect(Rect::new(
        0.0,
        config::PLAYFIELD_HEIGHT,
        config::PLAYFIELD_WIDTH,
        -config::PLAYFIELD_HEIGHT,
    ));
    set_camera(&cam);

    draw_background(sim.background_x);
    draw_pipes(sim);
    draw_birds(sim);

    set_default_camera();
    draw_hud(sim, pacer);
}

/// Cosmetic parallax hills, scrolled by the tick engine's offset.
fn draw_background(scroll: f32) {
    let band = 125.0;
    let hill_height = 90.0;
    let offset = scroll % band;

    let mut x = -offset - band;
    while x < config::PLAYFIELD_WIDTH + band {
        draw_circle(
            x + band * 0.5,
            config::PLAYFIELD_HEIGHT,
            hill_height,
            HILL_COLOR,
        );
        x += band;
    }
}

fn draw_pipes(sim: &SimState) {
    let lip = 14.0;
    for (i, pipe) in sim.pipes.iter().enumerate() {
        draw_rectangle(pipe.x, pipe.y, pipe.width, pipe.height, PIPE_COLOR);
        // Even index = top member: lip at its lower edge, facing the gap.
        let lip_y = if i % 2 == 0 {
            pipe.y + pipe.height - lip
        } else {
            pipe.y
        };
        draw_rectangle(pipe.x - 3.0, lip_y, pipe.width + 6.0, lip, PIPE_LIP_COLOR);
    }
}

fn draw_birds(sim: &SimState) {
    for bird in sim.birds.iter().filter(|b| b.alive) {
        let cx = bird.x + bird.width * 0.5;
        let cy = bird.y + bird.height * 0.5;
        let r = bird.height * 0.5;

        draw_circle(cx, cy, r + 1.5, BIRD_OUTLINE);
        draw_circle(cx, cy, r, BIRD_COLOR);

        // Beak tilts with the current fall speed.
        let tilt = (bird.vel_y / 20.0).clamp(-1.0, 1.0) * std::f32::consts::FRAC_PI_2;
        let dir = Vec2::from_angle(tilt);
        let tip = vec2(cx, cy) + dir * (r + 8.0);
        let base = vec2(cx, cy) + dir * (r - 2.0);
        let perp = vec2(-dir.y, dir.x) * 4.0;
        draw_triangle(tip, base + perp, base - perp, BIRD_OUTLINE);

        let eye = vec2(cx + r * 0.35, cy - r * 0.35);
        draw_circle(eye.x, eye.y, 2.5, BLACK);
    }
}

fn draw_hud(sim: &SimState, pacer: &TickPacer) {
    let tc = Color::new(1.0, 1.0, 1.0, 1.0);
    let sh = Color::new(0.0, 0.0, 0.0, 0.5);

    let rate = match pacer.mode() {
        PacingMode::Fixed => format!("{:.0} tps", pacer.tps()),
        PacingMode::Unthrottled => "unthrottled".to_string(),
    };
    let lines = [
        format!("Score : {}", sim.score),
        format!("Best : {}", sim.best_score),
        format!("Generation : {}", sim.generation),
        format!("Population : {} of {}", sim.alives, sim.population.len()),
        format!("Rate : {rate} | {} fps", get_fps()),
    ];

    for (i, line) in lines.iter().enumerate() {
        let y = 25.0 + i as f32 * 22.0;
        draw_text(line, 11.0, y + 1.0, 20.0, sh);
        draw_text(line, 10.0, y, 20.0, tc);
    }

    if sim.paused {
        let pause_text = "PAUSED (Space to resume)";
        let tw = measure_text(pause_text, None, 24, 1.0).width;
        let x = screen_width() * 0.5 - tw * 0.5;
        draw_text(pause_text, x + 1.0, 31.0, 24.0, sh);
        draw_text(pause_text, x, 30.0, 24.0, Color::new(1.0, 0.8, 0.2, 0.9));
    }
}

use crate::config;
use crate::pipe::Pipe;

/// A single controlled bird. Only `y` and `vel_y` change after creation;
/// the horizontal column is fixed for the whole generation.
#[derive(Clone, Debug)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vel_y: f32,
    pub alive: bool,
}

impl Bird {
    pub fn new() -> Self {
        Self {
            x: config::BIRD_X,
            y: config::BIRD_Y,
            width: config::BIRD_WIDTH,
            height: config::BIRD_HEIGHT,
            vel_y: 0.0,
            alive: true,
        }
    }

    /// Replace the vertical velocity with the upward impulse.
    /// Callers gate on `alive`; flapping a dead bird has no meaning.
    pub fn flap(&mut self) {
        self.vel_y = config::FLAP_IMPULSE;
    }

    /// One tick of vertical physics: accumulate gravity, then integrate.
    pub fn step_physics(&mut self) {
        self.vel_y += config::GRAVITY_STEP;
        self.y += self.vel_y;
    }

    /// Dead when the bird leaves the vertical playfield or touches any pipe.
    /// Every pipe is checked, not just the nearest pair.
    pub fn is_dead(&self, playfield_height: f32, pipes: &[Pipe]) -> bool {
        if self.y >= playfield_height || self.y + self.height <= 0.0 {
            return true;
        }
        pipes.iter().any(|pipe| self.overlaps(pipe))
    }

    /// Axis-aligned box overlap: the boxes intersect unless separated on one axis.
    fn overlaps(&self, pipe: &Pipe) -> bool {
        !(self.x > pipe.x + pipe.width
            || self.x + self.width < pipe.x
            || self.y > pipe.y + pipe.height
            || self.y + self.height < pipe.y)
    }
}

use ::rand::Rng;

use crate::config;

/// One vertical barrier segment drifting left at constant speed.
///
/// Pipes only ever enter the world as top/bottom pairs sharing an `x`
/// column; the pair's even/odd position in the pipe list tells top from
/// bottom.
#[derive(Clone, Debug)]
pub struct Pipe {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Pipe {
    /// Spawn a matched top/bottom pair at the right playfield edge.
    ///
    /// The gap offset is uniform in
    /// `[GAP_MARGIN, PLAYFIELD_HEIGHT - GAP_MARGIN - GAP_SIZE]`, so the
    /// aperture never touches the extreme top or bottom margins. The top
    /// pipe spans `[0, offset]`, the bottom spans
    /// `[offset + GAP_SIZE, PLAYFIELD_HEIGHT]`.
    pub fn spawn_pair(rng: &mut impl Rng) -> (Pipe, Pipe) {
        let max_offset = config::PLAYFIELD_HEIGHT - config::GAP_MARGIN - config::GAP_SIZE;
        let offset = rng.gen_range(config::GAP_MARGIN..=max_offset);

        let top = Pipe {
            x: config::PLAYFIELD_WIDTH,
            y: 0.0,
            width: config::PIPE_WIDTH,
            height: offset,
            speed: config::PIPE_SPEED,
        };
        let bottom = Pipe {
            x: config::PLAYFIELD_WIDTH,
            y: offset + config::GAP_SIZE,
            width: config::PIPE_WIDTH,
            height: config::PLAYFIELD_HEIGHT - offset - config::GAP_SIZE,
            speed: config::PIPE_SPEED,
        };
        (top, bottom)
    }

    pub fn advance(&mut self) {
        self.x -= self.speed;
    }

    /// True once the trailing edge has fully passed the left boundary.
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn advances_left_at_constant_speed() {
        let mut pipe = Pipe {
            x: 500.0,
            y: 0.0,
            width: config::PIPE_WIDTH,
            height: 200.0,
            speed: config::PIPE_SPEED,
        };
        pipe.advance();
        pipe.advance();
        assert_eq!(pipe.x, 500.0 - 2.0 * config::PIPE_SPEED);
    }

    #[test]
    fn off_screen_only_after_trailing_edge_passes() {
        let mut pipe = Pipe {
            x: 0.0,
            y: 0.0,
            width: 50.0,
            height: 200.0,
            speed: config::PIPE_SPEED,
        };
        assert!(!pipe.is_off_screen());

        pipe.x = -50.0; // trailing edge exactly on the boundary
        assert!(!pipe.is_off_screen());

        pipe.x = -50.1;
        assert!(pipe.is_off_screen());
    }

    #[test]
    fn spawned_pairs_share_a_column_and_frame_the_gap() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let (top, bottom) = Pipe::spawn_pair(&mut rng);

            assert_eq!(top.x, config::PLAYFIELD_WIDTH);
            assert_eq!(top.x, bottom.x);
            assert_eq!(top.y, 0.0);

            assert!(top.height >= config::GAP_MARGIN);
            assert!(
                top.height <= config::PLAYFIELD_HEIGHT - config::GAP_MARGIN - config::GAP_SIZE
            );

            assert_eq!(bottom.y, top.height + config::GAP_SIZE);
            assert_eq!(bottom.y + bottom.height, config::PLAYFIELD_HEIGHT);
        }
    }
}

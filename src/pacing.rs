use crate::config;

/// Which scheduling policy the pacer is currently applying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacingMode {
    /// Fixed tick rate: one tick per `1/tps` seconds of wall time.
    Fixed,
    /// No pacing: run a bounded batch of ticks per host frame, then yield
    /// back to the frame loop so input and rendering are never starved.
    Unthrottled,
}

/// Tick scheduling for the trainer loop.
///
/// Ticks are always strictly sequential; the pacer only decides how many of
/// them the caller should run before yielding the frame. A target of 0
/// ticks-per-second selects the unthrottled batch mode.
pub struct TickPacer {
    tps: f32,
    accumulator: f64,
}

impl TickPacer {
    pub fn new(tps: f32) -> Self {
        Self {
            tps: tps.max(0.0),
            accumulator: 0.0,
        }
    }

    pub fn tps(&self) -> f32 {
        self.tps
    }

    /// Retarget the tick rate. Accumulated frame debt is dropped so a rate
    /// change never triggers a catch-up burst.
    pub fn set_tps(&mut self, tps: f32) {
        self.tps = tps.max(0.0);
        self.accumulator = 0.0;
    }

    pub fn mode(&self) -> PacingMode {
        if self.tps == 0.0 {
            PacingMode::Unthrottled
        } else {
            PacingMode::Fixed
        }
    }

    /// How many ticks to run for a frame that took `frame_seconds`.
    pub fn ticks_to_run(&mut self, frame_seconds: f64) -> u32 {
        if self.tps == 0.0 {
            return config::UNTHROTTLED_BATCH;
        }

        // Clamp pathological frames (window drag, breakpoints) so the sim
        // does not spiral into an ever-growing catch-up burst.
        self.accumulator += frame_seconds.min(config::MAX_FRAME_DEBT);
        let period = 1.0 / self.tps as f64;
        let ticks = (self.accumulator / period) as u32;
        self.accumulator -= ticks as f64 * period;
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_rate_yields_tps_ticks_per_second() {
        let mut pacer = TickPacer::new(60.0);
        assert_eq!(pacer.mode(), PacingMode::Fixed);

        let mut total = 0;
        for _ in 0..10 {
            total += pacer.ticks_to_run(0.1);
        }
        assert_eq!(total, 60);
    }

    #[test]
    fn sub_period_frames_carry_debt_forward() {
        let mut pacer = TickPacer::new(60.0);
        assert_eq!(pacer.ticks_to_run(1.0 / 120.0), 0);
        assert_eq!(pacer.ticks_to_run(1.0 / 120.0), 1);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut pacer = TickPacer::new(60.0);
        let ticks = pacer.ticks_to_run(10.0);
        assert_eq!(ticks as f64, (config::MAX_FRAME_DEBT * 60.0).floor());
    }

    #[test]
    fn zero_tps_selects_unthrottled_batches() {
        let mut pacer = TickPacer::new(0.0);
        assert_eq!(pacer.mode(), PacingMode::Unthrottled);
        assert_eq!(pacer.ticks_to_run(0.0001), config::UNTHROTTLED_BATCH);
        assert_eq!(pacer.ticks_to_run(5.0), config::UNTHROTTLED_BATCH);
    }

    #[test]
    fn retargeting_drops_accumulated_debt() {
        let mut pacer = TickPacer::new(60.0);
        pacer.ticks_to_run(0.015); // just under one period of debt
        pacer.set_tps(120.0);
        assert_eq!(pacer.ticks_to_run(0.0), 0);
    }
}

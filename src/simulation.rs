use ::rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::bird::Bird;
use crate::config;
use crate::evolution::Population;
use crate::genome::Genome;
use crate::network::Network;
use crate::pipe::Pipe;

/// Snapshot of a finished generation, taken just before the population
/// evolves (after which the fitness slots are gone).
#[derive(Clone, Debug)]
pub struct GenerationSummary {
    pub generation: u32,
    pub best: u32,
    pub mean: f32,
    pub population: usize,
    pub champion: Genome,
}

/// The whole trainer state: population, index-paired controllers and birds,
/// the pipe field, and the generation counters. Single writer; the renderer
/// and UI only read between tick batches.
pub struct SimState {
    pub population: Population,
    pub controllers: Vec<Network>,
    pub birds: Vec<Bird>,
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub generation: u32,
    pub alives: usize,
    pub best_score: u32,
    pub background_x: f32,
    pub paused: bool,
    rng: ChaCha8Rng,
    spawn_timer: u32,
    last_summary: Option<GenerationSummary>,
}

impl SimState {
    pub fn new(population_size: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let population = Population::new(population_size, &mut rng);
        Self::with_population(population, rng)
    }

    /// Start from a saved champion genome instead of a fresh random pool.
    pub fn resume(champion: Genome, population_size: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let population = Population::from_champion(champion, population_size, &mut rng);
        Self::with_population(population, rng)
    }

    pub fn with_population(population: Population, rng: ChaCha8Rng) -> Self {
        let mut sim = Self {
            population,
            controllers: Vec::new(),
            birds: Vec::new(),
            pipes: Vec::new(),
            score: 0,
            generation: 0,
            alives: 0,
            best_score: 0,
            background_x: 0.0,
            paused: false,
            rng,
            spawn_timer: 0,
            last_summary: None,
        };
        sim.start_generation();
        sim
    }

    /// Tear down the old generation and seed the next one: evolve the
    /// population (except on the very first call, which plays the seed pool
    /// as-is), rebuild the controllers, and reset the world.
    fn start_generation(&mut self) {
        if self.generation > 0 {
            self.population.evolve(&mut self.rng);
        }
        assert!(
            !self.population.is_empty(),
            "optimizer produced an empty population"
        );

        self.controllers = self
            .population
            .genomes()
            .iter()
            .map(Network::from_genome)
            .collect();
        self.birds = (0..self.controllers.len()).map(|_| Bird::new()).collect();
        assert_eq!(
            self.birds.len(),
            self.controllers.len(),
            "bird/controller pairing broken at generation start"
        );

        self.pipes.clear();
        self.score = 0;
        self.spawn_timer = 0;
        self.generation += 1;
        self.alives = self.birds.len();
    }

    /// Advance the world by exactly one tick.
    ///
    /// Order matters: cosmetic scroll, gap-fraction scan, the per-bird
    /// decide/integrate/death loop, pipe advance and removal, cadence spawn,
    /// timer and score bookkeeping. If the last bird dies mid-loop the
    /// generation restarts synchronously and the rest of the tick is
    /// abandoned — the surviving steps would only act on discarded state.
    pub fn tick(&mut self) {
        debug_assert_eq!(
            self.birds.len(),
            self.controllers.len(),
            "bird/controller pairing broken mid-generation"
        );

        self.background_x += config::BACKGROUND_SPEED;

        let gap_fraction = self.next_gap_fraction();

        for i in 0..self.birds.len() {
            if !self.birds[i].alive {
                continue;
            }

            let inputs = [self.birds[i].y / config::PLAYFIELD_HEIGHT, gap_fraction];
            let outputs = self.controllers[i].compute(&inputs);
            assert!(
                !outputs.is_empty(),
                "controller {i} returned an empty decision vector"
            );
            if outputs[0] > config::FLAP_THRESHOLD {
                self.birds[i].flap();
            }
            self.birds[i].step_physics();

            if self.birds[i].is_dead(config::PLAYFIELD_HEIGHT, &self.pipes) {
                self.birds[i].alive = false;
                self.alives -= 1;
                self.population.record_fitness(i, self.score);
                if self.alives == 0 {
                    self.finish_generation();
                    return;
                }
            }
        }

        for pipe in &mut self.pipes {
            pipe.advance();
        }
        // Both members of a pair share x, width and speed, so they leave the
        // screen on the same tick and the even/odd pairing parity survives
        // the filter.
        self.pipes.retain(|pipe| !pipe.is_off_screen());

        if self.spawn_timer == 0 {
            let (top, bottom) = Pipe::spawn_pair(&mut self.rng);
            self.pipes.push(top);
            self.pipes.push(bottom);
        }
        self.spawn_timer = (self.spawn_timer + 1) % config::SPAWN_INTERVAL;

        self.score += 1;
    }

    /// Gap input for the controllers: the height fraction of the first top
    /// pipe whose trailing edge has not yet passed the bird column. Defaults
    /// to 0.0 before the first spawn or once every pipe is behind the birds.
    fn next_gap_fraction(&self) -> f32 {
        // Every bird shares the same fixed column, so one scan serves all.
        if !self.birds.iter().any(|b| b.alive) {
            return 0.0;
        }
        for pair in self.pipes.chunks(2) {
            let top = &pair[0];
            if top.x + top.width > config::BIRD_X {
                return top.height / config::PLAYFIELD_HEIGHT;
            }
        }
        0.0
    }

    fn finish_generation(&mut self) {
        let (best_index, best) = self.population.best();
        let summary = GenerationSummary {
            generation: self.generation,
            best,
            mean: self.population.mean_fitness(),
            population: self.population.len(),
            champion: self.population.genomes()[best_index].clone(),
        };
        if best > self.best_score {
            self.best_score = best;
        }
        self.last_summary = Some(summary);

        self.start_generation();
    }

    /// Hand the latest finished-generation summary to the caller, once.
    pub fn take_summary(&mut self) -> Option<GenerationSummary> {
        self.last_summary.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::GENOME_SIZE;

    /// All-0.5 genes decode to all-zero weights: the controller output is
    /// exactly 0.5, which never clears the flap threshold.
    fn never_flap() -> Genome {
        Genome {
            genes: vec![0.5; GENOME_SIZE],
        }
    }

    fn sim_with(genomes: Vec<Genome>, seed: u64) -> SimState {
        SimState::with_population(
            Population::from_genomes(genomes),
            ChaCha8Rng::seed_from_u64(seed),
        )
    }

    /// Park the single bird inside the aperture of whatever pair currently
    /// overlaps its column, so a test can keep it alive indefinitely.
    fn park_in_gap(sim: &mut SimState) {
        let bird = &sim.birds[0];
        let column = sim.pipes.chunks(2).find(|pair| {
            let top = &pair[0];
            top.x < bird.x + bird.width && top.x + top.width > bird.x
        });
        let safe_y = match column {
            Some(pair) => pair[0].height + (config::GAP_SIZE - config::BIRD_HEIGHT) * 0.5,
            None => config::BIRD_Y,
        };
        sim.birds[0].y = safe_y;
        sim.birds[0].vel_y = 0.0;
    }

    #[test]
    fn pairing_sizes_hold_across_generations() {
        let mut sim = sim_with(vec![never_flap(); 5], 21);
        let first_generation = sim.generation;

        for _ in 0..2_000 {
            sim.tick();
            assert_eq!(sim.birds.len(), sim.controllers.len());
            assert_eq!(sim.birds.len(), sim.population.len());
        }
        assert!(sim.generation > first_generation, "no generation ever ended");
    }

    #[test]
    fn pipe_parity_holds_through_spawn_removal_and_restart() {
        let mut sim = sim_with(vec![never_flap(); 3], 22);

        for _ in 0..3_000 {
            sim.tick();
            assert_eq!(sim.pipes.len() % 2, 0);
            for pair in sim.pipes.chunks(2) {
                let (top, bottom) = (&pair[0], &pair[1]);
                assert_eq!(top.y, 0.0);
                assert_eq!(top.x, bottom.x);
                assert_eq!(bottom.y, top.height + config::GAP_SIZE);
            }
        }
    }

    #[test]
    fn score_counts_ticks_and_resets_on_restart() {
        let mut sim = sim_with(vec![never_flap()], 23);

        sim.tick();
        sim.tick();
        assert_eq!(sim.score, 2);

        while sim.take_summary().is_none() {
            sim.tick();
        }
        assert_eq!(sim.score, 0);
    }

    #[test]
    fn never_flapping_bird_falls_through_the_floor() {
        // End-to-end: population of one, no flapping. The bird must cross the
        // bottom boundary, its fitness must equal the shared score at that
        // tick, and a fresh generation must start immediately.
        let mut sim = sim_with(vec![never_flap()], 24);
        assert_eq!(sim.generation, 1);

        let mut ticks = 0u32;
        let summary = loop {
            sim.tick();
            ticks += 1;
            if let Some(summary) = sim.take_summary() {
                break summary;
            }
            assert!(ticks < 1_000, "bird never died");
        };

        // The death tick aborts before the score increment, so the fitness is
        // the count of fully completed ticks before it.
        assert_eq!(summary.generation, 1);
        assert_eq!(summary.best, ticks - 1);
        assert_eq!(summary.population, 1);

        assert_eq!(sim.generation, 2);
        assert_eq!(sim.score, 0);
        assert!(sim.pipes.is_empty());
        assert!(sim.birds.iter().all(|b| b.alive));
        assert_eq!(sim.alives, sim.birds.len());
        assert_eq!(sim.best_score, summary.best);
    }

    #[test]
    fn pipes_spawn_on_the_fixed_cadence() {
        let mut sim = sim_with(vec![never_flap()], 25);

        // First tick spawns the first pair at the right edge (after the
        // advance step, so it has not moved yet).
        park_in_gap(&mut sim);
        sim.tick();
        assert_eq!(sim.pipes.len(), 2);
        assert_eq!(sim.pipes[0].x, config::PLAYFIELD_WIDTH);
        let offset = sim.pipes[0].height;
        assert!(offset >= config::GAP_MARGIN);
        assert!(offset <= config::PLAYFIELD_HEIGHT - config::GAP_MARGIN - config::GAP_SIZE);

        // No further pair until the cadence counter wraps.
        for _ in 0..(config::SPAWN_INTERVAL - 1) {
            park_in_gap(&mut sim);
            sim.tick();
        }
        assert_eq!(sim.pipes.len(), 2);

        park_in_gap(&mut sim);
        sim.tick();
        assert_eq!(sim.pipes.len(), 4);
        assert_eq!(sim.pipes[2].x, config::PLAYFIELD_WIDTH);
    }

    #[test]
    fn off_screen_pipes_are_removed_without_breaking_order() {
        let mut sim = sim_with(vec![never_flap()], 26);

        // Enough ticks for the first pair to cross the whole playfield:
        // x goes from 500 to below -50 in (550 / 3) + 1 advances.
        let crossing = ((config::PLAYFIELD_WIDTH + config::PIPE_WIDTH) / config::PIPE_SPEED) as u32 + 2;
        for _ in 0..crossing {
            park_in_gap(&mut sim);
            sim.tick();
        }

        assert!(sim.pipes.iter().all(|p| !p.is_off_screen()));
        assert_eq!(sim.pipes.len() % 2, 0);
        // Remaining pipes are still ordered oldest-first, left to right.
        for pair in sim.pipes.windows(2) {
            assert!(pair[0].x <= pair[1].x);
        }
    }

    #[test]
    fn fitness_is_recorded_at_the_death_tick() {
        // Two birds: one parked safely by the test, one falling freely. The
        // faller's fitness must match the score at its death, while the
        // survivor's slot stays empty.
        let mut sim = sim_with(vec![never_flap(), never_flap()], 27);

        let mut death_score = None;
        for _ in 0..500 {
            sim.birds[0].y = config::BIRD_Y;
            sim.birds[0].vel_y = 0.0;
            // Keep bird 0 out of pipe columns entirely.
            sim.pipes.clear();

            let score_before = sim.score;
            sim.tick();
            if !sim.birds[1].alive && death_score.is_none() {
                death_score = Some(score_before);
            }
            if death_score.is_some() {
                break;
            }
        }

        let death_score = death_score.expect("free-falling bird never died");
        assert_eq!(sim.population.fitness_of(1), Some(death_score));
        assert_eq!(sim.population.fitness_of(0), None);
        assert_eq!(sim.alives, 1);
        assert_eq!(sim.generation, 1);
    }

    #[test]
    fn gap_fraction_tracks_the_first_pair_ahead_of_the_column() {
        let mut sim = sim_with(vec![never_flap()], 28);

        // Before any spawn there is no upcoming pipe.
        assert_eq!(sim.next_gap_fraction(), 0.0);

        park_in_gap(&mut sim);
        sim.tick();
        let expected = sim.pipes[0].height / config::PLAYFIELD_HEIGHT;
        assert_eq!(sim.next_gap_fraction(), expected);

        // Once the pair's trailing edge passes the bird column it no longer
        // counts, and with nothing else ahead the input falls back to 0.
        for pipe in &mut sim.pipes {
            pipe.x = config::BIRD_X - pipe.width - 1.0;
        }
        assert_eq!(sim.next_gap_fraction(), 0.0);
    }
}

use ::rand::Rng;

use crate::config;
use crate::genome::Genome;

/// The optimizer side of the trainer: an ordered genome collection plus a
/// write-once fitness slot per genome.
///
/// The tick engine never touches genomes directly; it only records a
/// fitness through [`Population::record_fitness`], which keeps the
/// write-once invariant checkable in one place.
pub struct Population {
    genomes: Vec<Genome>,
    fitness: Vec<Option<u32>>,
}

impl Population {
    pub fn new(size: usize, rng: &mut impl Rng) -> Self {
        let genomes = (0..size).map(|_| Genome::random(rng)).collect();
        Self::from_genomes(genomes)
    }

    pub fn from_genomes(genomes: Vec<Genome>) -> Self {
        assert!(
            !genomes.is_empty(),
            "population must hold at least one genome"
        );
        let fitness = vec![None; genomes.len()];
        Self { genomes, fitness }
    }

    /// Seed a run from a saved champion: one exact clone plus mutants.
    pub fn from_champion(champion: Genome, size: usize, rng: &mut impl Rng) -> Self {
        assert!(size > 0, "population must hold at least one genome");
        let mut genomes = Vec::with_capacity(size);
        genomes.push(champion.clone());
        while genomes.len() < size {
            genomes.push(champion.mutate(rng));
        }
        Self::from_genomes(genomes)
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Record the final fitness for one controller. Exactly one write per
    /// controller per generation; a second write is a tick-engine bug.
    pub fn record_fitness(&mut self, index: usize, score: u32) {
        let slot = &mut self.fitness[index];
        assert!(
            slot.is_none(),
            "fitness for controller {index} written twice in one generation"
        );
        *slot = Some(score);
    }

    pub fn fitness_of(&self, index: usize) -> Option<u32> {
        self.fitness[index]
    }

    /// Best (index, fitness) of a fully scored generation.
    pub fn best(&self) -> (usize, u32) {
        self.ranked()[0]
    }

    pub fn mean_fitness(&self) -> f32 {
        let total: u64 = self.ranked().iter().map(|&(_, f)| f as u64).sum();
        total as f32 / self.genomes.len() as f32
    }

    fn ranked(&self) -> Vec<(usize, u32)> {
        let mut ranked: Vec<(usize, u32)> = self
            .fitness
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let f = slot.unwrap_or_else(|| {
                    panic!("controller {i} has no recorded fitness; generation is not over")
                });
                (i, f)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Build the next generation in place: clone the elites, breed mutated
    /// crossover children from them, and top up with fresh randoms. Clears
    /// every fitness slot for the new generation.
    pub fn evolve(&mut self, rng: &mut impl Rng) {
        let size = self.genomes.len();
        let ranked = self.ranked();

        let elite_count = ((size as f32 * config::ELITE_FRACTION).ceil() as usize).clamp(1, size);
        let fresh_count =
            ((size as f32 * config::FRESH_FRACTION).round() as usize).min(size - elite_count);

        let mut next = Vec::with_capacity(size);
        for &(index, _) in ranked.iter().take(elite_count) {
            next.push(self.genomes[index].clone());
        }
        while next.len() < size - fresh_count {
            let a = ranked[rng.gen_range(0..elite_count)].0;
            let b = ranked[rng.gen_range(0..elite_count)].0;
            let child = self.genomes[a].crossover(&self.genomes[b], rng).mutate(rng);
            next.push(child);
        }
        while next.len() < size {
            next.push(Genome::random(rng));
        }

        self.genomes = next;
        self.fitness = vec![None; size];
    }
}

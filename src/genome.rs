use ::rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config;

/// Total genome floats: input->hidden weights and biases, then
/// hidden->output weights and biases.
pub const GENOME_SIZE: usize = (config::NETWORK_INPUTS + 1) * config::NETWORK_HIDDEN
    + (config::NETWORK_HIDDEN + 1) * config::NETWORK_OUTPUTS;

const HIDDEN_WEIGHTS: usize = config::NETWORK_INPUTS * config::NETWORK_HIDDEN;
const HIDDEN_BIASES: usize = config::NETWORK_HIDDEN;
const OUTPUT_WEIGHTS: usize = config::NETWORK_HIDDEN * config::NETWORK_OUTPUTS;

/// Flat controller genome.
///
/// Raw genes are normalized to [0, 1]; decoding maps them into the signed
/// weight range. Layout:
/// `[hidden weights] [hidden biases] [output weights] [output biases]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genome {
    pub genes: Vec<f32>,
}

impl Genome {
    pub fn random(rng: &mut impl Rng) -> Self {
        let genes = (0..GENOME_SIZE).map(|_| rng.gen_range(0.0..1.0)).collect();
        Self { genes }
    }

    /// Per-gene point mutation, clamped back into [0, 1].
    pub fn mutate(&self, rng: &mut impl Rng) -> Self {
        let mut child = self.clone();
        for gene in &mut child.genes {
            if rng.gen::<f32>() < config::MUTATION_RATE {
                *gene += rng.gen_range(-config::MUTATION_SIGMA..config::MUTATION_SIGMA);
                *gene = gene.clamp(0.0, 1.0);
            }
        }
        child
    }

    /// Uniform crossover: each gene is drawn from one parent or the other.
    pub fn crossover(&self, other: &Genome, rng: &mut impl Rng) -> Self {
        let genes = self
            .genes
            .iter()
            .zip(&other.genes)
            .map(|(a, b)| if rng.gen::<bool>() { *a } else { *b })
            .collect();
        Self { genes }
    }

    // --- Decoding. Maps [0,1] -> [-WEIGHT_RANGE, WEIGHT_RANGE]. ---

    fn decode(&self, index: usize) -> f32 {
        (self.genes[index] - 0.5) * 2.0 * config::WEIGHT_RANGE
    }

    /// Weight from input `i` into hidden neuron `h`.
    pub fn hidden_weight(&self, h: usize, i: usize) -> f32 {
        self.decode(h * config::NETWORK_INPUTS + i)
    }

    pub fn hidden_bias(&self, h: usize) -> f32 {
        self.decode(HIDDEN_WEIGHTS + h)
    }

    /// Weight from hidden neuron `h` into output neuron `o`.
    pub fn output_weight(&self, o: usize, h: usize) -> f32 {
        self.decode(HIDDEN_WEIGHTS + HIDDEN_BIASES + o * config::NETWORK_HIDDEN + h)
    }

    pub fn output_bias(&self, o: usize) -> f32 {
        self.decode(HIDDEN_WEIGHTS + HIDDEN_BIASES + OUTPUT_WEIGHTS + o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn random_genes_stay_normalized() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let genome = Genome::random(&mut rng);
        assert_eq!(genome.genes.len(), GENOME_SIZE);
        assert!(genome.genes.iter().all(|g| (0.0..1.0).contains(g)));
    }

    #[test]
    fn mutation_preserves_length_and_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let parent = Genome::random(&mut rng);
        for _ in 0..50 {
            let child = parent.mutate(&mut rng);
            assert_eq!(child.genes.len(), GENOME_SIZE);
            assert!(child.genes.iter().all(|g| (0.0..=1.0).contains(g)));
        }
    }

    #[test]
    fn crossover_only_draws_from_parents() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let a = Genome {
            genes: vec![0.0; GENOME_SIZE],
        };
        let b = Genome {
            genes: vec![1.0; GENOME_SIZE],
        };
        let child = a.crossover(&b, &mut rng);
        assert!(child.genes.iter().all(|g| *g == 0.0 || *g == 1.0));
        // With 9 coin flips a degenerate all-one-parent child is unlikely but
        // legal; just check the gene pool, not the mix.
    }

    #[test]
    fn neutral_gene_decodes_to_zero_weight() {
        let genome = Genome {
            genes: vec![0.5; GENOME_SIZE],
        };
        assert_eq!(genome.hidden_weight(0, 0), 0.0);
        assert_eq!(genome.hidden_bias(1), 0.0);
        assert_eq!(genome.output_weight(0, 1), 0.0);
        assert_eq!(genome.output_bias(0), 0.0);
    }

    #[test]
    fn decode_covers_the_signed_weight_range() {
        let mut genome = Genome {
            genes: vec![0.0; GENOME_SIZE],
        };
        assert_eq!(genome.hidden_weight(0, 0), -config::WEIGHT_RANGE);
        genome.genes[0] = 1.0;
        assert_eq!(genome.hidden_weight(0, 0), config::WEIGHT_RANGE);
    }
}

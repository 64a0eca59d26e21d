use crate::config;
use crate::genome::Genome;

/// Fixed-topology feedforward controller decoded from a genome.
///
/// Two inputs (normalized bird altitude, next gap fraction), one hidden
/// layer, one sigmoid output read as a flap decision.
#[derive(Clone, Debug)]
pub struct Network {
    hidden_weights: Vec<f32>,
    hidden_biases: Vec<f32>,
    output_weights: Vec<f32>,
    output_biases: Vec<f32>,
}

impl Network {
    pub fn from_genome(genome: &Genome) -> Self {
        let inputs = config::NETWORK_INPUTS;
        let hidden = config::NETWORK_HIDDEN;
        let outputs = config::NETWORK_OUTPUTS;

        let mut hidden_weights = vec![0.0; hidden * inputs];
        let mut hidden_biases = vec![0.0; hidden];
        let mut output_weights = vec![0.0; outputs * hidden];
        let mut output_biases = vec![0.0; outputs];

        for h in 0..hidden {
            for i in 0..inputs {
                hidden_weights[h * inputs + i] = genome.hidden_weight(h, i);
            }
            hidden_biases[h] = genome.hidden_bias(h);
        }
        for o in 0..outputs {
            for h in 0..hidden {
                output_weights[o * hidden + h] = genome.output_weight(o, h);
            }
            output_biases[o] = genome.output_bias(o);
        }

        Self {
            hidden_weights,
            hidden_biases,
            output_weights,
            output_biases,
        }
    }

    /// Forward pass. The output vector always has `NETWORK_OUTPUTS` elements;
    /// a wrong-sized input is a programming error, not a recoverable state.
    pub fn compute(&self, inputs: &[f32]) -> Vec<f32> {
        assert_eq!(
            inputs.len(),
            config::NETWORK_INPUTS,
            "controller expects {} inputs, got {}",
            config::NETWORK_INPUTS,
            inputs.len()
        );

        let n_inputs = config::NETWORK_INPUTS;
        let n_hidden = config::NETWORK_HIDDEN;

        let mut hidden = vec![0.0; n_hidden];
        for h in 0..n_hidden {
            let mut sum = self.hidden_biases[h];
            for (i, input) in inputs.iter().enumerate() {
                sum += self.hidden_weights[h * n_inputs + i] * input;
            }
            hidden[h] = sigmoid(sum);
        }

        (0..config::NETWORK_OUTPUTS)
            .map(|o| {
                let mut sum = self.output_biases[o];
                for (h, activation) in hidden.iter().enumerate() {
                    sum += self.output_weights[o * n_hidden + h] * activation;
                }
                sigmoid(sum)
            })
            .collect()
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

use serde::{Deserialize, Serialize};

use crate::genome::{Genome, GENOME_SIZE};

const CHAMPION_VERSION: u32 = 1;

/// On-disk champion checkpoint: the best genome seen so far plus enough
/// context to report where it came from.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChampionFile {
    version: u32,
    pub generation: u32,
    pub best_score: u32,
    pub genome: Genome,
}

pub fn save_champion(
    path: &str,
    generation: u32,
    best_score: u32,
    genome: &Genome,
) -> Result<(), String> {
    let file = ChampionFile {
        version: CHAMPION_VERSION,
        generation,
        best_score,
        genome: genome.clone(),
    };
    let bytes = bincode::serialize(&file).map_err(|e| format!("champion encode failed: {e}"))?;
    std::fs::write(path, bytes).map_err(|e| format!("champion write failed: {e}"))
}

pub fn load_champion(path: &str) -> Result<ChampionFile, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("champion read failed: {e}"))?;
    let file: ChampionFile =
        bincode::deserialize(&bytes).map_err(|e| format!("champion decode failed: {e}"))?;

    if file.version != CHAMPION_VERSION {
        return Err(format!(
            "champion file version {} is not supported (expected {CHAMPION_VERSION})",
            file.version
        ));
    }
    if file.genome.genes.len() != GENOME_SIZE {
        return Err(format!(
            "champion genome has {} genes, expected {GENOME_SIZE}",
            file.genome.genes.len()
        ));
    }
    Ok(file)
}

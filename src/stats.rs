use serde::Serialize;

/// One finished generation, as recorded for graphs and reports.
#[derive(Clone, Debug, Serialize)]
pub struct GenerationRecord {
    pub generation: u32,
    pub best: u32,
    pub mean: f32,
    pub population: usize,
}

#[derive(Serialize)]
struct TrainingReport<'a> {
    generations: usize,
    best_ever: u32,
    records: &'a [GenerationRecord],
}

/// Fitness history across the whole run.
pub struct TrainingStats {
    records: Vec<GenerationRecord>,
    best_ever: u32,
}

impl TrainingStats {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            best_ever: 0,
        }
    }

    pub fn record(&mut self, record: GenerationRecord) {
        if record.best > self.best_ever {
            self.best_ever = record.best;
        }
        self.records.push(record);
    }

    pub fn best_ever(&self) -> u32 {
        self.best_ever
    }

    pub fn generations(&self) -> usize {
        self.records.len()
    }

    /// The most recent `n` records, oldest first.
    pub fn recent(&self, n: usize) -> &[GenerationRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Dump the whole history as pretty JSON.
    pub fn write_report(&self, path: &str) -> Result<(), String> {
        let report = TrainingReport {
            generations: self.records.len(),
            best_ever: self.best_ever,
            records: &self.records,
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("report encode failed: {e}"))?;
        std::fs::write(path, json).map_err(|e| format!("report write failed: {e}"))
    }
}

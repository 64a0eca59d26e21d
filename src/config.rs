// All tunable simulation constants in one place.

// Playfield
pub const PLAYFIELD_WIDTH: f32 = 500.0;
pub const PLAYFIELD_HEIGHT: f32 = 512.0;
pub const BACKGROUND_SPEED: f32 = 0.5;

// Birds
pub const BIRD_X: f32 = 80.0;
pub const BIRD_Y: f32 = 250.0;
pub const BIRD_WIDTH: f32 = 40.0;
pub const BIRD_HEIGHT: f32 = 30.0;
pub const GRAVITY_STEP: f32 = 0.3;
pub const FLAP_IMPULSE: f32 = -6.0;
pub const FLAP_THRESHOLD: f32 = 0.5;

// Pipes
pub const PIPE_WIDTH: f32 = 50.0;
pub const PIPE_SPEED: f32 = 3.0;
pub const SPAWN_INTERVAL: u32 = 90;
pub const GAP_SIZE: f32 = 120.0;
pub const GAP_MARGIN: f32 = 50.0;

// Controller network
pub const NETWORK_INPUTS: usize = 2;
pub const NETWORK_HIDDEN: usize = 2;
pub const NETWORK_OUTPUTS: usize = 1;
pub const WEIGHT_RANGE: f32 = 8.0;

// Evolution
pub const POPULATION_SIZE: usize = 50;
pub const ELITE_FRACTION: f32 = 0.2;
pub const FRESH_FRACTION: f32 = 0.2;
pub const MUTATION_RATE: f32 = 0.1;
pub const MUTATION_SIGMA: f32 = 0.3;

// Pacing
pub const DEFAULT_TPS: f32 = 60.0;
pub const UNTHROTTLED_BATCH: u32 = 500;
pub const MAX_FRAME_DEBT: f64 = 0.25;

// Files
pub const CHAMPION_FILE: &str = "aviary_champion.bin";
pub const REPORT_FILE: &str = "aviary_report.json";

use maxsat::{GeneratorParams, Heuristics};
use std::path::PathBuf;
use std::time::Duration;

pub enum Config {
    Solve(SolveConfig),
    Generate(GenerateConfig),
}

pub struct SolveConfig {
    pub inputs:       Vec<PathBuf>,
    pub dimacs:       bool,
    pub heuristics:   Heuristics,
    pub max_duration: Option<Duration>,
    pub output:       Option<PathBuf>,
    pub return_code:  bool,
}

pub struct GenerateConfig {
    pub params: GeneratorParams,
    pub seed:   Option<u64>,
    pub output: Option<PathBuf>,
}
